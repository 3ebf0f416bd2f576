//! Account types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role tag on a user account.
///
/// Wire format: lowercase string (`client`, `lawyer`, `admin`).
/// Gates which entities a user may be referenced as (a case's client must be a `Client`, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    #[default]
    Client,
    Lawyer,
    Admin,
}

impl AccountType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Lawyer => "lawyer",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known account types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown account type: {0}")]
pub struct UnknownAccountType(pub String);

impl FromStr for AccountType {
    type Err = UnknownAccountType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Self::Client),
            "lawyer" => Ok(Self::Lawyer),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownAccountType(other.to_owned())),
        }
    }
}
