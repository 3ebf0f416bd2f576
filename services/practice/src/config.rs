use serde::Deserialize;

use docket_core::config::Config;

/// Practice service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct PracticeConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3120). Env var: `PRACTICE_PORT`.
    #[serde(default = "default_port")]
    pub practice_port: u16,
    /// Canonical appointment slot labels, in display order. Env var: `APPOINTMENT_SLOTS`
    /// (comma-separated).
    #[serde(default = "default_slots")]
    pub appointment_slots: Vec<String>,
    /// Allow any origin. Env var: `CORS_PERMISSIVE`.
    #[serde(default = "default_cors_permissive")]
    pub cors_permissive: bool,
}

impl Config for PracticeConfig {}

fn default_port() -> u16 {
    3120
}

fn default_slots() -> Vec<String> {
    ["9:00 AM", "10:30 AM", "12:00 PM", "2:30 PM", "4:00 PM", "5:30 PM"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

fn default_cors_permissive() -> bool {
    true
}

impl PracticeConfig {
    /// Slot labels with surrounding whitespace removed and blanks dropped.
    pub fn slots(&self) -> Vec<String> {
        self.appointment_slots
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    }
}
