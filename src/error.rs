use thiserror::Error;

use crate::state::TeamId;

/// Everything the engine can reject. All components fail fast: malformed
/// input is reported to the caller, never papered over with defaults.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("cannot schedule {teams} teams: {reason}")]
    InvalidSchedule { teams: usize, reason: &'static str },

    #[error("invalid strength rating {value}: must be positive and finite")]
    InvalidStrength { value: f64 },

    #[error("match {home_id} vs {away_id} in week {week} has only one side of the score set")]
    InconsistentMatchState {
        week: u32,
        home_id: TeamId,
        away_id: TeamId,
    },

    #[error("no {what} supplied")]
    EmptyInput { what: &'static str },

    #[error("no fixture with home team {home_id} in week {week}")]
    MatchNotFound { week: u32, home_id: TeamId },
}
