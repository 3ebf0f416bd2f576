//! Offset-based paging window.

use serde::{Deserialize, Serialize};

const MAX_LIMIT: u64 = 100;

/// `limit`/`skip` window used by feed-style list endpoints.
///
/// - `limit`: 1–100, default 50
/// - `skip`: ≥ 0, default 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub skip: u64,
}

fn default_limit() -> u64 {
    50
}

impl Default for Window {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            skip: 0,
        }
    }
}

impl Window {
    /// Clamp `limit` to the valid range 1–100.
    ///
    /// Call after deserializing from query params to enforce bounds.
    pub fn clamped(self) -> Self {
        Self {
            limit: self.limit.clamp(1, MAX_LIMIT),
            skip: self.skip,
        }
    }
}
