use log::debug;

use crate::error::EngineError;
use crate::state::{Fixture, TeamId};

/// Generate a balanced round-robin schedule with the circle method.
///
/// Returns one inner `Vec` per week, each holding `(home, away)` pairings.
/// A single round-robin over `M` teams takes `M - 1` weeks of `M / 2`
/// matches; `rounds > 1` repeats the block with home/away swapped on every
/// other repeat so double round-robins mirror sides exactly. Week blocks are
/// appended back to back, so week numbers stay contiguous.
///
/// Odd team counts are rejected outright: a bye slot would silently drop
/// matches and break the `rounds * M * (M - 1) / 2` fixture-count guarantee.
pub fn generate_weeks(
    team_ids: &[TeamId],
    rounds: u32,
) -> Result<Vec<Vec<(TeamId, TeamId)>>, EngineError> {
    if team_ids.len() < 2 {
        return Err(EngineError::InvalidSchedule {
            teams: team_ids.len(),
            reason: "at least 2 teams are required",
        });
    }
    if team_ids.len() % 2 != 0 {
        return Err(EngineError::InvalidSchedule {
            teams: team_ids.len(),
            reason: "an even number of teams is required (byes are not supported)",
        });
    }
    if rounds < 1 {
        return Err(EngineError::InvalidSchedule {
            teams: team_ids.len(),
            reason: "at least 1 round is required",
        });
    }

    let block = single_round_robin(team_ids);

    let mut weeks = Vec::with_capacity(block.len() * rounds as usize);
    for repeat in 0..rounds {
        if repeat % 2 == 0 {
            weeks.extend(block.iter().cloned());
        } else {
            // Mirror sides on every other repeat to balance home advantage.
            weeks.extend(
                block
                    .iter()
                    .map(|week| week.iter().map(|&(h, a)| (a, h)).collect()),
            );
        }
    }

    debug!(
        "generated schedule: {} teams, {} rounds, {} weeks",
        team_ids.len(),
        rounds,
        weeks.len()
    );
    Ok(weeks)
}

/// `generate_weeks` flattened into pending fixtures, with week numbers
/// starting at `first_week`.
pub fn generate_fixtures(
    team_ids: &[TeamId],
    rounds: u32,
    first_week: u32,
) -> Result<Vec<Fixture>, EngineError> {
    let weeks = generate_weeks(team_ids, rounds)?;
    let mut fixtures = Vec::with_capacity(weeks.iter().map(Vec::len).sum());
    for (offset, week) in weeks.iter().enumerate() {
        let week_no = first_week + offset as u32;
        for &(home, away) in week {
            fixtures.push(Fixture::pending(home, away, week_no));
        }
    }
    Ok(fixtures)
}

/// Circle method: fix the last slot, rotate the remaining `M - 1` slots, and
/// pair them up by symmetric distance from the rotation point.
fn single_round_robin(team_ids: &[TeamId]) -> Vec<Vec<(TeamId, TeamId)>> {
    let count = team_ids.len();
    let total_weeks = count - 1;
    let matches_per_week = count / 2;

    let mut weeks = Vec::with_capacity(total_weeks);
    for round in 0..total_weeks {
        let mut week = Vec::with_capacity(matches_per_week);
        for slot in 0..matches_per_week {
            let home = (round + slot) % (count - 1);
            let away = if slot == 0 {
                // The fixed slot plays whichever team rotated in this week.
                count - 1
            } else {
                (count - 1 - slot + round) % (count - 1)
            };
            week.push((team_ids[home], team_ids[away]));
        }
        weeks.push(week);
    }
    weeks
}
