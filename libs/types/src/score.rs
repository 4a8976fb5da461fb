//! Security score shown on the customer dashboard
//!
//! Lower means riskier. Local copy of a server-side value, updated
//! optimistically after transfers and fraud reports.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Score points removed by each filed fraud report
pub const REPORT_SCORE_PENALTY: u8 = 8;

/// Score a session starts with
pub const INITIAL_SECURITY_SCORE: u8 = 11;

/// Integer score clamped to [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecurityScore(u8);

impl SecurityScore {
    pub const MIN: SecurityScore = SecurityScore(0);
    pub const MAX: SecurityScore = SecurityScore(100);

    /// Build from any integer, clamping into range
    pub fn new(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Lower the score by `points`, floored at zero
    pub fn penalized(self, points: u8) -> Self {
        Self(self.0.saturating_sub(points))
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::for_score(*self)
    }
}

impl Default for SecurityScore {
    fn default() -> Self {
        Self(INITIAL_SECURITY_SCORE)
    }
}

impl fmt::Display for SecurityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/100", self.0)
    }
}

/// Display band of the security score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreBand {
    /// Score below 30
    HighRisk,
    /// Score from 30 to 59
    MediumRisk,
    /// Score 60 and above
    LowRisk,
}

impl ScoreBand {
    pub fn for_score(score: SecurityScore) -> Self {
        match score.value() {
            0..=29 => ScoreBand::HighRisk,
            30..=59 => ScoreBand::MediumRisk,
            _ => ScoreBand::LowRisk,
        }
    }
}
