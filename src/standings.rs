use std::cmp::Ordering;

use crate::error::EngineError;
use crate::state::{Fixture, StandingRow, Team, TeamId};

pub const POINTS_WIN: u32 = 3;
pub const POINTS_DRAW: u32 = 1;

/// Compute the full standings table from scratch.
///
/// Every row is reduced from the finished matches alone, so the table is
/// consistent no matter in which order results were entered, edited or
/// reset. Rows are ordered by points, then goal difference, then goals
/// scored, all descending; ties on all three keys fall back to team id so
/// the ordering is deterministic (an explicit resolution, not a fairness
/// claim). `position` is the 1-based rank in that order.
pub fn compute_standings(
    teams: &[Team],
    fixtures: &[Fixture],
) -> Result<Vec<StandingRow>, EngineError> {
    if teams.is_empty() {
        return Err(EngineError::EmptyInput { what: "teams" });
    }

    let mut rows: Vec<StandingRow> = teams
        .iter()
        .map(|team| reduce_team(team.id, fixtures))
        .collect();

    rows.sort_by(compare_rows);
    for (index, row) in rows.iter_mut().enumerate() {
        row.position = index as u32 + 1;
    }
    Ok(rows)
}

fn compare_rows(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then(b.goal_difference.cmp(&a.goal_difference))
        .then(b.goals_for.cmp(&a.goals_for))
        .then(a.team_id.cmp(&b.team_id))
}

/// Fold one team's finished matches into a standings row. The away
/// perspective swaps the goal columns.
fn reduce_team(team_id: TeamId, fixtures: &[Fixture]) -> StandingRow {
    let mut row = StandingRow::zeroed(team_id);

    for fixture in fixtures {
        let Some((home_goals, away_goals)) = fixture.result() else {
            continue;
        };
        let (scored, conceded) = if fixture.home_id == team_id {
            (home_goals, away_goals)
        } else if fixture.away_id == team_id {
            (away_goals, home_goals)
        } else {
            continue;
        };

        row.played += 1;
        row.goals_for += u32::from(scored);
        row.goals_against += u32::from(conceded);
        match scored.cmp(&conceded) {
            Ordering::Greater => {
                row.won += 1;
                row.points += POINTS_WIN;
            }
            Ordering::Equal => {
                row.drawn += 1;
                row.points += POINTS_DRAW;
            }
            Ordering::Less => row.lost += 1,
        }
    }

    row.goal_difference = row.goals_for as i32 - row.goals_against as i32;
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: TeamId) -> Team {
        Team::new(id, format!("Team {id}"), format!("T{id}"), 0.5).unwrap()
    }

    #[test]
    fn empty_team_list_is_rejected() {
        let err = compute_standings(&[], &[]).unwrap_err();
        assert_eq!(err, EngineError::EmptyInput { what: "teams" });
    }

    #[test]
    fn reduces_home_win_and_away_draw() {
        // Team 1: home 3-1 win, then away 2-2 draw.
        let teams = vec![team(1), team(2), team(3)];
        let fixtures = vec![
            Fixture::with_result(1, 2, 1, 3, 1),
            Fixture::with_result(3, 1, 2, 2, 2),
        ];

        let rows = compute_standings(&teams, &fixtures).unwrap();
        let row = rows.iter().find(|r| r.team_id == 1).unwrap();
        assert_eq!(row.played, 2);
        assert_eq!(row.won, 1);
        assert_eq!(row.drawn, 1);
        assert_eq!(row.lost, 0);
        assert_eq!(row.goals_for, 5);
        assert_eq!(row.goals_against, 3);
        assert_eq!(row.goal_difference, 2);
        assert_eq!(row.points, 4);
    }

    #[test]
    fn pending_fixtures_do_not_count() {
        let teams = vec![team(1), team(2)];
        let fixtures = vec![Fixture::pending(1, 2, 1)];
        let rows = compute_standings(&teams, &fixtures).unwrap();
        assert!(rows.iter().all(|r| r.played == 0 && r.points == 0));
    }

    #[test]
    fn goals_for_breaks_equal_points_and_difference() {
        // Both teams win once by the same margin; team 2 scores more.
        let teams = vec![team(1), team(2), team(3), team(4)];
        let fixtures = vec![
            Fixture::with_result(1, 3, 1, 1, 0),
            Fixture::with_result(2, 4, 1, 3, 2),
        ];

        let rows = compute_standings(&teams, &fixtures).unwrap();
        assert_eq!(rows[0].team_id, 2);
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[1].team_id, 1);
        assert_eq!(rows[1].position, 2);
    }

    #[test]
    fn full_ties_keep_team_id_order() {
        let teams = vec![team(9), team(4), team(7)];
        let rows = compute_standings(&teams, &[]).unwrap();
        let order: Vec<TeamId> = rows.iter().map(|r| r.team_id).collect();
        assert_eq!(order, vec![4, 7, 9]);
        let positions: Vec<u32> = rows.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }
}
