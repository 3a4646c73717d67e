use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub type TeamId = u32;

/// A league team. `strength` is a relative quality scalar in (0.0, 1.0];
/// it drives both simulated scoring rates and the prediction model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub short_name: String,
    pub strength: f64,
}

impl Team {
    pub fn new(
        id: TeamId,
        name: impl Into<String>,
        short_name: impl Into<String>,
        strength: f64,
    ) -> Result<Self, EngineError> {
        check_strength(strength)?;
        Ok(Self {
            id,
            name: name.into(),
            short_name: short_name.into(),
            strength,
        })
    }

    /// Strength tuning after creation goes through the same validation.
    pub fn set_strength(&mut self, strength: f64) -> Result<(), EngineError> {
        check_strength(strength)?;
        self.strength = strength;
        Ok(())
    }
}

pub(crate) fn check_strength(value: f64) -> Result<(), EngineError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(EngineError::InvalidStrength { value });
    }
    Ok(())
}

/// One scheduled match. The outcome fields are private so a fixture is
/// always either pending (no goals, not finished) or fully scored; a
/// half-recorded score cannot be constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub home_id: TeamId,
    pub away_id: TeamId,
    /// 1-based round number, contiguous across the whole schedule.
    pub week: u32,
    home_goals: Option<u8>,
    away_goals: Option<u8>,
    finished: bool,
}

impl Fixture {
    pub fn pending(home_id: TeamId, away_id: TeamId, week: u32) -> Self {
        Self {
            home_id,
            away_id,
            week,
            home_goals: None,
            away_goals: None,
            finished: false,
        }
    }

    /// Build an already-played fixture, e.g. when importing match history.
    pub fn with_result(
        home_id: TeamId,
        away_id: TeamId,
        week: u32,
        home_goals: u8,
        away_goals: u8,
    ) -> Self {
        let mut fixture = Self::pending(home_id, away_id, week);
        fixture.record_result(home_goals, away_goals);
        fixture
    }

    /// Restore a fixture from externally stored outcome fields, rejecting a
    /// half-recorded score. This is the boundary check for callers that do
    /// not go through `pending`/`with_result`.
    pub fn from_stored(
        home_id: TeamId,
        away_id: TeamId,
        week: u32,
        home_goals: Option<u8>,
        away_goals: Option<u8>,
    ) -> Result<Self, EngineError> {
        match (home_goals, away_goals) {
            (Some(h), Some(a)) => Ok(Self::with_result(home_id, away_id, week, h, a)),
            (None, None) => Ok(Self::pending(home_id, away_id, week)),
            _ => Err(EngineError::InconsistentMatchState {
                week,
                home_id,
                away_id,
            }),
        }
    }

    pub fn record_result(&mut self, home_goals: u8, away_goals: u8) {
        self.home_goals = Some(home_goals);
        self.away_goals = Some(away_goals);
        self.finished = true;
    }

    pub fn reset(&mut self) {
        self.home_goals = None;
        self.away_goals = None;
        self.finished = false;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// `(home_goals, away_goals)` for a finished fixture, `None` if pending.
    pub fn result(&self) -> Option<(u8, u8)> {
        match (self.finished, self.home_goals, self.away_goals) {
            (true, Some(h), Some(a)) => Some((h, a)),
            _ => None,
        }
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_id == team_id || self.away_id == team_id
    }

    /// Opponent of `team_id` in this fixture, if the team plays in it.
    pub fn opponent_of(&self, team_id: TeamId) -> Option<TeamId> {
        if self.home_id == team_id {
            Some(self.away_id)
        } else if self.away_id == team_id {
            Some(self.home_id)
        } else {
            None
        }
    }
}

/// One standings table row. Always derived from the match list in full,
/// never mutated incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    pub team_id: TeamId,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
    /// 1-based rank under the (points, goal difference, goals for) ordering.
    pub position: u32,
}

impl StandingRow {
    pub fn zeroed(team_id: TeamId) -> Self {
        Self {
            team_id,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            position: 0,
        }
    }
}

/// Final-table projection for one team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRow {
    pub team_id: TeamId,
    pub current_points: u32,
    /// Current points plus expected points from remaining fixtures. Equals
    /// `current_points` once the season is complete.
    pub projected_points: f64,
    pub championship_probability: f64,
}

/// Projection rows in standings order, plus season progress shared by all
/// rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionTable {
    pub rows: Vec<PredictionRow>,
    pub season_complete: bool,
    pub matches_completed: usize,
    pub total_matches: usize,
}
