use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Role carried by every identity and every token.
///
/// The wire and storage spelling is the variant name. Historical spellings
/// are accepted on input only (see [`Role::from_str`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Administrator,
    SalesExecutive,
}

/// Error for role strings outside the known vocabulary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct UnknownRoleError(pub String);

impl Role {
    /// Canonical spelling used in tokens and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "Administrator",
            Role::SalesExecutive => "SalesExecutive",
        }
    }

    pub fn is_administrator(&self) -> bool {
        matches!(self, Role::Administrator)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::SalesExecutive
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRoleError;

    /// Parse a role, normalizing the spellings seen in older data
    /// (`admin`, `agent`, `Sales Executive`, ...). Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "administrator" | "admin" => Ok(Role::Administrator),
            "salesexecutive" | "sales executive" | "sales_executive" | "agent" => {
                Ok(Role::SalesExecutive)
            }
            _ => Err(UnknownRoleError(s.to_string())),
        }
    }
}
