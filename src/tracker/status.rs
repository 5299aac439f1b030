use std::{fmt::Display, str::FromStr};

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

/// What the user did on a certain day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    Office,
    #[serde(rename = "WFH")]
    WorkFromHome,
    Leave,
    Holiday,
    /// Nothing was chosen yet.
    #[default]
    #[serde(rename = "No Selection")]
    Unset,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Office,
        Status::WorkFromHome,
        Status::Leave,
        Status::Holiday,
        Status::Unset,
    ];

    /// Days that count towards the attendance policy.
    pub fn is_attended(&self) -> bool {
        matches!(self, Status::Office | Status::Leave | Status::Holiday)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Office => "Office",
            Status::WorkFromHome => "WFH",
            Status::Leave => "Leave",
            Status::Holiday => "Holiday",
            Status::Unset => "No Selection",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Status {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "office" | "o" => Ok(Status::Office),
            "wfh" | "w" | "home" => Ok(Status::WorkFromHome),
            "leave" | "l" => Ok(Status::Leave),
            "holiday" | "h" => Ok(Status::Holiday),
            "unset" | "none" | "u" | "no selection" => Ok(Status::Unset),
            _ => Err(anyhow!(
                "Unknown status {s}. Expected one of office, wfh, leave, holiday, unset"
            )),
        }
    }
}
