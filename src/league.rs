use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::predict::project_table;
use crate::schedule::generate_weeks;
use crate::simulate::simulate_score;
use crate::standings::compute_standings;
use crate::state::{Fixture, PredictionTable, StandingRow, Team, TeamId};

/// Team data as supplied by an import, before an id is assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamEntry {
    pub name: String,
    pub short_name: String,
    pub strength: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleSummary {
    pub total_fixtures: usize,
    pub total_weeks: usize,
    pub teams_count: usize,
    pub rounds: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClearSummary {
    pub teams_deleted: usize,
    pub fixtures_deleted: usize,
}

/// An in-memory season: the teams, the fixture list, and the operations a
/// season goes through (generate, simulate, edit, reset, query).
///
/// The heavy lifting is delegated to the pure components; the league only
/// owns the current team and match lists. It does no locking: concurrent
/// callers need their own snapshot of the data.
#[derive(Debug, Clone)]
pub struct League {
    teams: Vec<Team>,
    fixtures: Vec<Fixture>,
    next_team_id: TeamId,
}

impl Default for League {
    fn default() -> Self {
        Self::new()
    }
}

impl League {
    pub fn new() -> Self {
        Self {
            teams: Vec::new(),
            fixtures: Vec::new(),
            next_team_id: 1,
        }
    }

    /// Start from an existing team list, e.g. [`crate::seed::seed_teams`].
    pub fn with_teams(teams: Vec<Team>) -> Self {
        let next_team_id = teams.iter().map(|t| t.id).max().map_or(1, |id| id + 1);
        Self {
            teams,
            fixtures: Vec::new(),
            next_team_id,
        }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    pub fn fixtures_for_week(&self, week: u32) -> Vec<&Fixture> {
        self.fixtures.iter().filter(|f| f.week == week).collect()
    }

    /// Earliest week that still has a pending match.
    pub fn next_pending_week(&self) -> Option<u32> {
        self.fixtures
            .iter()
            .filter(|f| !f.is_finished())
            .map(|f| f.week)
            .min()
    }

    pub fn add_team(
        &mut self,
        name: impl Into<String>,
        short_name: impl Into<String>,
        strength: f64,
    ) -> Result<TeamId, EngineError> {
        let team = Team::new(self.next_team_id, name, short_name, strength)?;
        let id = team.id;
        self.teams.push(team);
        self.next_team_id += 1;
        Ok(id)
    }

    /// Bulk team import. Entries whose name or short code already exists are
    /// skipped rather than duplicated; invalid strength values fail the
    /// whole import.
    pub fn import_teams(&mut self, entries: &[TeamEntry]) -> Result<ImportSummary, EngineError> {
        let mut imported = 0;
        let mut skipped = 0;
        for entry in entries {
            let exists = self
                .teams
                .iter()
                .any(|t| t.name == entry.name || t.short_name == entry.short_name);
            if exists {
                skipped += 1;
                continue;
            }
            self.add_team(entry.name.clone(), entry.short_name.clone(), entry.strength)?;
            imported += 1;
        }
        info!("imported {imported} teams, skipped {skipped}");
        Ok(ImportSummary {
            imported,
            skipped,
            total: entries.len(),
        })
    }

    /// Remove a team and every fixture it appears in. Returns whether the
    /// team existed.
    pub fn remove_team(&mut self, team_id: TeamId) -> bool {
        let before = self.teams.len();
        self.teams.retain(|t| t.id != team_id);
        if self.teams.len() == before {
            return false;
        }
        self.fixtures.retain(|f| !f.involves(team_id));
        true
    }

    /// Drop all teams and fixtures.
    pub fn clear(&mut self) -> ClearSummary {
        let summary = ClearSummary {
            teams_deleted: self.teams.len(),
            fixtures_deleted: self.fixtures.len(),
        };
        self.teams.clear();
        self.fixtures.clear();
        self.next_team_id = 1;
        summary
    }

    /// Generate the round-robin schedule for the current teams.
    ///
    /// With `clear_existing` the current fixture list is replaced and weeks
    /// start at 1; otherwise the new block is appended after the last
    /// scheduled week.
    pub fn generate_fixtures(
        &mut self,
        rounds: u32,
        clear_existing: bool,
    ) -> Result<ScheduleSummary, EngineError> {
        let team_ids: Vec<TeamId> = self.teams.iter().map(|t| t.id).collect();
        let weeks = generate_weeks(&team_ids, rounds)?;

        let first_week = if clear_existing {
            self.fixtures.clear();
            1
        } else {
            self.fixtures.iter().map(|f| f.week).max().unwrap_or(0) + 1
        };

        let total_weeks = weeks.len();
        let mut total_fixtures = 0;
        for (offset, week) in weeks.iter().enumerate() {
            let week_no = first_week + offset as u32;
            for &(home, away) in week {
                self.fixtures.push(Fixture::pending(home, away, week_no));
                total_fixtures += 1;
            }
        }

        info!(
            "scheduled {total_fixtures} fixtures over {total_weeks} weeks (rounds: {rounds}, clear: {clear_existing})"
        );
        Ok(ScheduleSummary {
            total_fixtures,
            total_weeks,
            teams_count: self.teams.len(),
            rounds,
        })
    }

    /// The schedule that `generate_fixtures` would produce, without touching
    /// league state.
    pub fn preview_fixtures(&self, rounds: u32) -> Result<Vec<Vec<(TeamId, TeamId)>>, EngineError> {
        let team_ids: Vec<TeamId> = self.teams.iter().map(|t| t.id).collect();
        generate_weeks(&team_ids, rounds)
    }

    /// Simulate every pending match of the earliest unfinished week. Returns
    /// the week simulated, or `None` when the season is already complete.
    pub fn simulate_next_week<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Option<u32>, EngineError> {
        let Some(week) = self.next_pending_week() else {
            return Ok(None);
        };
        self.simulate_week(week, rng)?;
        Ok(Some(week))
    }

    /// Simulate every remaining pending match. Returns the number of matches
    /// played.
    pub fn simulate_all<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize, EngineError> {
        let mut played = 0;
        while let Some(week) = self.next_pending_week() {
            played += self.simulate_week(week, rng)?;
        }
        Ok(played)
    }

    fn simulate_week<R: Rng + ?Sized>(
        &mut self,
        week: u32,
        rng: &mut R,
    ) -> Result<usize, EngineError> {
        let mut played = 0;
        for index in 0..self.fixtures.len() {
            let fixture = &self.fixtures[index];
            if fixture.week != week || fixture.is_finished() {
                continue;
            }
            let home = self.strength_of(fixture.home_id);
            let away = self.strength_of(fixture.away_id);
            let (Some(home), Some(away)) = (home, away) else {
                // A fixture can only reference a removed team if the caller
                // bypassed remove_team; skip rather than invent a score.
                continue;
            };
            let (home_goals, away_goals) = simulate_score(home, away, rng)?;
            self.fixtures[index].record_result(home_goals, away_goals);
            played += 1;
        }
        debug!("simulated week {week}: {played} matches");
        Ok(played)
    }

    fn strength_of(&self, team_id: TeamId) -> Option<f64> {
        self.teams.iter().find(|t| t.id == team_id).map(|t| t.strength)
    }

    /// Manually enter or overwrite a result. The fixture is addressed by
    /// `(week, home_id)`, which is unique since no team plays twice in a
    /// week.
    pub fn set_result(
        &mut self,
        week: u32,
        home_id: TeamId,
        home_goals: u8,
        away_goals: u8,
    ) -> Result<(), EngineError> {
        let fixture = self.fixture_mut(week, home_id)?;
        fixture.record_result(home_goals, away_goals);
        Ok(())
    }

    /// Reset a single match back to pending.
    pub fn reset_result(&mut self, week: u32, home_id: TeamId) -> Result<(), EngineError> {
        let fixture = self.fixture_mut(week, home_id)?;
        fixture.reset();
        Ok(())
    }

    /// Reset the whole season to pending. Returns how many results were
    /// wiped.
    pub fn reset_all_results(&mut self) -> usize {
        let mut wiped = 0;
        for fixture in &mut self.fixtures {
            if fixture.is_finished() {
                fixture.reset();
                wiped += 1;
            }
        }
        info!("reset {wiped} match results");
        wiped
    }

    fn fixture_mut(&mut self, week: u32, home_id: TeamId) -> Result<&mut Fixture, EngineError> {
        self.fixtures
            .iter_mut()
            .find(|f| f.week == week && f.home_id == home_id)
            .ok_or(EngineError::MatchNotFound { week, home_id })
    }

    /// Current standings, recomputed in full from the match list.
    pub fn standings(&self) -> Result<Vec<StandingRow>, EngineError> {
        compute_standings(&self.teams, &self.fixtures)
    }

    /// Final-table projection for the current state of the season.
    pub fn predictions(&self) -> Result<PredictionTable, EngineError> {
        project_table(&self.teams, &self.fixtures)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::seed::seed_teams;

    fn seeded_league() -> League {
        League::with_teams(seed_teams())
    }

    #[test]
    fn import_skips_duplicate_names_and_codes() {
        let mut league = seeded_league();
        let entries = vec![
            TeamEntry {
                name: "Chelsea".to_string(),
                short_name: "XXX".to_string(),
                strength: 0.5,
            },
            TeamEntry {
                name: "Newcastle".to_string(),
                short_name: "NEW".to_string(),
                strength: 0.7,
            },
        ];
        let summary = league.import_teams(&entries).unwrap();
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.total, 2);
        assert_eq!(league.teams().len(), 5);
    }

    #[test]
    fn import_rejects_invalid_strength() {
        let mut league = League::new();
        let entries = vec![TeamEntry {
            name: "Broken".to_string(),
            short_name: "BRK".to_string(),
            strength: 0.0,
        }];
        assert!(league.import_teams(&entries).is_err());
    }

    #[test]
    fn remove_team_drops_its_fixtures() {
        let mut league = seeded_league();
        league.generate_fixtures(1, true).unwrap();
        assert_eq!(league.fixtures().len(), 6);

        let victim = league.teams()[0].id;
        assert!(league.remove_team(victim));
        assert!(league.fixtures().iter().all(|f| !f.involves(victim)));
        assert_eq!(league.fixtures().len(), 3);
        assert!(!league.remove_team(victim));
    }

    #[test]
    fn generate_append_continues_week_numbers() {
        let mut league = seeded_league();
        league.generate_fixtures(1, true).unwrap();
        let summary = league.generate_fixtures(1, false).unwrap();
        assert_eq!(summary.total_weeks, 3);

        let max_week = league.fixtures().iter().map(|f| f.week).max().unwrap();
        assert_eq!(max_week, 6);
        assert_eq!(league.fixtures().len(), 12);
    }

    #[test]
    fn preview_does_not_mutate() {
        let league = seeded_league();
        let weeks = league.preview_fixtures(2).unwrap();
        assert_eq!(weeks.len(), 6);
        assert!(league.fixtures().is_empty());
    }

    #[test]
    fn simulate_next_week_only_touches_earliest_pending_week() {
        let mut league = seeded_league();
        league.generate_fixtures(2, true).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let week = league.simulate_next_week(&mut rng).unwrap();
        assert_eq!(week, Some(1));
        assert!(league.fixtures_for_week(1).iter().all(|f| f.is_finished()));
        assert!(league.fixtures_for_week(2).iter().all(|f| !f.is_finished()));
        assert_eq!(league.next_pending_week(), Some(2));
    }

    #[test]
    fn edit_and_reset_round_trip() {
        let mut league = seeded_league();
        league.generate_fixtures(1, true).unwrap();
        let fixture = league.fixtures()[0].clone();

        league.set_result(fixture.week, fixture.home_id, 2, 1).unwrap();
        let updated = league.fixtures_for_week(fixture.week);
        assert_eq!(
            updated
                .iter()
                .find(|f| f.home_id == fixture.home_id)
                .unwrap()
                .result(),
            Some((2, 1))
        );

        league.reset_result(fixture.week, fixture.home_id).unwrap();
        assert_eq!(league.next_pending_week(), Some(1));

        let missing = league.set_result(99, fixture.home_id, 1, 1);
        assert!(matches!(missing, Err(EngineError::MatchNotFound { .. })));
    }

    #[test]
    fn reset_all_results_restores_pending_schedule() {
        let mut league = seeded_league();
        league.generate_fixtures(1, true).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let played = league.simulate_all(&mut rng).unwrap();
        assert_eq!(played, 6);

        let wiped = league.reset_all_results();
        assert_eq!(wiped, 6);
        assert_eq!(league.next_pending_week(), Some(1));
        assert!(league.fixtures().iter().all(|f| !f.is_finished()));
    }
}
