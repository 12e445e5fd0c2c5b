use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Shipper,
    Driver,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Shipper => "SHIPPER",
            Role::Driver => "DRIVER",
        }
    }

    /// The party on the other side of a job from this role.
    pub fn counterpart(&self) -> Role {
        match self {
            Role::Shipper => Role::Driver,
            Role::Driver => Role::Shipper,
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SHIPPER" => Ok(Role::Shipper),
            "DRIVER" => Ok(Role::Driver),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
