//! Tournament format and scoring configuration.

use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};

/// How partners are chosen each round.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Random partner rotation; individual points accumulate across partners.
    #[default]
    Americano,
    /// Ranking-based pairing: top and bottom of each quartet play the middle pair.
    Mexicano,
}

/// When a court's match is over.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ScoringMode {
    /// Finished once both teams together scored `target` points.
    TotalPoints { target: u32 },
    /// Finished once either team reaches `target`.
    FirstTo { target: u32 },
    /// Finished once the round clock runs past `duration_secs`; raw scores are
    /// rescaled to `norm_base` points at settlement.
    TimeBound { duration_secs: u64, norm_base: u32 },
}

impl Default for ScoringMode {
    fn default() -> Self {
        ScoringMode::TotalPoints { target: 24 }
    }
}

impl ScoringMode {
    /// Score threshold for point-based modes.
    pub fn target(&self) -> Option<u32> {
        match *self {
            ScoringMode::TotalPoints { target } | ScoringMode::FirstTo { target } => Some(target),
            ScoringMode::TimeBound { .. } => None,
        }
    }
}

/// Longest time-bound round accepted: one week.
pub const MAX_ROUND_SECS: u64 = 7 * 24 * 3600;

/// Round window as a chrono duration, if it is within `MAX_ROUND_SECS`.
pub fn round_limit(duration_secs: u64) -> Option<chrono::Duration> {
    if duration_secs > MAX_ROUND_SECS {
        return None;
    }
    i64::try_from(duration_secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
}

/// Settings fixed for the lifetime of one tournament.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    #[serde(default)]
    pub format: Format,
    #[serde(default)]
    pub scoring: ScoringMode,
    /// Physical courts available. `None` fills as many courts as the roster allows.
    #[serde(default)]
    pub max_courts: Option<usize>,
}

impl TournamentConfig {
    pub fn new(format: Format, scoring: ScoringMode) -> Self {
        Self {
            format,
            scoring,
            max_courts: None,
        }
    }

    pub fn with_max_courts(self, max_courts: usize) -> Self {
        Self {
            max_courts: Some(max_courts),
            ..self
        }
    }

    /// Reject zero targets, zero-length time windows and an empty court cap.
    pub fn validate(&self) -> Result<(), TournamentError> {
        match self.scoring {
            ScoringMode::TotalPoints { target: 0 } | ScoringMode::FirstTo { target: 0 } => {
                return Err(TournamentError::InvalidScoringConfig(
                    "target must be greater than 0".into(),
                ));
            }
            ScoringMode::TimeBound { duration_secs: 0, .. } => {
                return Err(TournamentError::InvalidScoringConfig(
                    "time-bound rounds need a positive duration".into(),
                ));
            }
            ScoringMode::TimeBound { duration_secs, .. }
                if round_limit(duration_secs).is_none() =>
            {
                return Err(TournamentError::InvalidScoringConfig(
                    "round duration is too long".into(),
                ));
            }
            ScoringMode::TimeBound { norm_base: 0, .. } => {
                return Err(TournamentError::InvalidScoringConfig(
                    "normalization base must be greater than 0".into(),
                ));
            }
            _ => {}
        }
        if self.max_courts == Some(0) {
            return Err(TournamentError::InvalidScoringConfig(
                "at least one court is required".into(),
            ));
        }
        Ok(())
    }
}
