//! Habit-tracking activity primitives.
//!
//! A "tap" is one append-only log entry for one of three habit kinds. Taps of
//! the same kind by the same user must be at least three seconds apart; the
//! three kinds rate-limit independently.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::UserId;

/// Minimum spacing between two taps of the same kind by the same user.
pub const TAP_RATE_LIMIT_SECONDS: i64 = 3;

/// The three tracked habit kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    Resist,
    Smoked,
    Sport,
}

impl ActivityKind {
    /// Stable wire code persisted in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Resist => "RESIST",
            Self::Smoked => "SMOKED",
            Self::Sport => "SPORT",
        }
    }

    /// All kinds, in count-bucket order.
    pub fn all() -> [Self; 3] {
        [Self::Resist, Self::Smoked, Self::Sport]
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown activity code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseActivityKindError(pub String);

impl fmt::Display for ParseActivityKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown activity kind: {}", self.0)
    }
}

impl std::error::Error for ParseActivityKindError {}

impl FromStr for ActivityKind {
    type Err = ParseActivityKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RESIST" => Ok(Self::Resist),
            "SMOKED" => Ok(Self::Smoked),
            "SPORT" => Ok(Self::Sport),
            other => Err(ParseActivityKindError(other.to_owned())),
        }
    }
}

/// One appended habit event. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: i32,
    pub user_id: UserId,
    pub kind: ActivityKind,
    pub logged_at: DateTime<Utc>,
}

/// Per-kind totals for one user, with untapped kinds reporting zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityCounts {
    pub resist: i64,
    pub smoked: i64,
    pub sport: i64,
}

impl ActivityCounts {
    /// Fold grouped-count rows into the fixed three buckets.
    ///
    /// The repository returns one row per kind the user has ever tapped;
    /// absent kinds default to zero.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (ActivityKind, i64)>) -> Self {
        let mut counts = Self::default();
        for (kind, count) in pairs {
            match kind {
                ActivityKind::Resist => counts.resist = count,
                ActivityKind::Smoked => counts.smoked = count,
                ActivityKind::Sport => counts.sport = count,
            }
        }
        counts
    }

    /// Total for one kind.
    pub fn get(self, kind: ActivityKind) -> i64 {
        match kind {
            ActivityKind::Resist => self.resist,
            ActivityKind::Smoked => self.smoked,
            ActivityKind::Sport => self.sport,
        }
    }
}
