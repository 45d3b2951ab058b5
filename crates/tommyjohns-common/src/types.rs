//! Domain types for surgery records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TjError;

/// A player identifier as it appears in the dataset's id column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// League level at the time of surgery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeagueLevel {
    /// Flag value `Y`
    Majors,
    /// Flag value `N`
    Minors,
}

impl LeagueLevel {
    /// The literal flag used in the dataset.
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Majors => "Y",
            Self::Minors => "N",
        }
    }
}

impl FromStr for LeagueLevel {
    type Err = TjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Y" => Ok(Self::Majors),
            "N" => Ok(Self::Minors),
            other => Err(TjError::data(format!(
                "unknown league level flag '{other}' (expected 'Y' or 'N')"
            ))),
        }
    }
}

impl fmt::Display for LeagueLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Majors => f.write_str("majors"),
            Self::Minors => f.write_str("minors"),
        }
    }
}

/// One row of the surgery dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurgeryRecord {
    pub player_id: PlayerId,
    pub surgery_date: Option<NaiveDate>,
    pub level: LeagueLevel,
    pub age: Option<f64>,
    /// Months between surgery and return to play
    pub recovery_months: Option<f64>,
}

impl SurgeryRecord {
    pub fn is_major_leaguer(&self) -> bool {
        self.level == LeagueLevel::Majors
    }
}
