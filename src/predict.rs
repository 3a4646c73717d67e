use std::collections::HashMap;

use crate::error::EngineError;
use crate::standings::compute_standings;
use crate::state::{Fixture, PredictionRow, PredictionTable, Team, TeamId};

// Model constants. These are policy values kept for output compatibility
// with the scoring rules this engine replaces, not calibrated quantities.
pub const LOGISTIC_SLOPE: f64 = 5.0;
pub const WIN_PROB_FLOOR: f64 = 0.1;
pub const WIN_PROB_CEILING: f64 = 0.9;
pub const DRAW_PROB: f64 = 0.25;

/// Project the final table: expected points per team plus a coarse
/// championship likelihood, in standings order.
///
/// The season counts as complete once every scheduled match is finished and
/// at least one match exists; in that case projections collapse to the
/// current points and the table leader gets probability 1.0.
pub fn project_table(teams: &[Team], fixtures: &[Fixture]) -> Result<PredictionTable, EngineError> {
    let standings = compute_standings(teams, fixtures)?;

    let total_matches = fixtures.len();
    let matches_completed = fixtures.iter().filter(|f| f.is_finished()).count();
    let season_complete = total_matches > 0 && matches_completed == total_matches;

    let rows = if season_complete {
        standings
            .iter()
            .map(|standing| PredictionRow {
                team_id: standing.team_id,
                current_points: standing.points,
                projected_points: f64::from(standing.points),
                championship_probability: if standing.position == 1 { 1.0 } else { 0.0 },
            })
            .collect()
    } else {
        let strengths: HashMap<TeamId, f64> =
            teams.iter().map(|t| (t.id, t.strength)).collect();

        let projected: HashMap<TeamId, f64> = standings
            .iter()
            .map(|standing| {
                let points =
                    projected_points(standing.team_id, standing.points, fixtures, &strengths);
                (standing.team_id, points)
            })
            .collect();

        standings
            .iter()
            .map(|standing| {
                let own = projected[&standing.team_id];
                let better = projected
                    .values()
                    .filter(|&&other| other > own)
                    .count();
                PredictionRow {
                    team_id: standing.team_id,
                    current_points: standing.points,
                    projected_points: own,
                    championship_probability: championship_probability(better),
                }
            })
            .collect()
    };

    Ok(PredictionTable {
        rows,
        season_complete,
        matches_completed,
        total_matches,
    })
}

/// Current points plus the expected points of every remaining fixture the
/// team is involved in.
fn projected_points(
    team_id: TeamId,
    current_points: u32,
    fixtures: &[Fixture],
    strengths: &HashMap<TeamId, f64>,
) -> f64 {
    let Some(&own_strength) = strengths.get(&team_id) else {
        return f64::from(current_points);
    };

    let mut total = f64::from(current_points);
    for fixture in fixtures {
        if fixture.is_finished() {
            continue;
        }
        let Some(opponent_id) = fixture.opponent_of(team_id) else {
            continue;
        };
        let Some(&opponent_strength) = strengths.get(&opponent_id) else {
            continue;
        };
        total += expected_points(own_strength, opponent_strength);
    }
    total
}

/// `3 * p_win + DRAW_PROB`: the draw always contributes its fixed mass of
/// one point, independent of the win probability. The three outcome
/// probabilities are deliberately not required to sum to 1.
fn expected_points(strength: f64, opponent_strength: f64) -> f64 {
    3.0 * win_probability(strength, opponent_strength) + DRAW_PROB
}

/// Logistic in the strength difference, clamped so no forecast is ever a
/// deterministic 0% or 100%.
pub fn win_probability(strength: f64, opponent_strength: f64) -> f64 {
    let raw = 1.0 / (1.0 + (-LOGISTIC_SLOPE * (strength - opponent_strength)).exp());
    raw.clamp(WIN_PROB_FLOOR, WIN_PROB_CEILING)
}

/// Step table over the number of teams strictly ahead on projected points.
/// Ties are not special-cased beyond the strict comparison.
pub fn championship_probability(better_count: usize) -> f64 {
    match better_count {
        0 => 0.8,
        1 => 0.3,
        2 => 0.1,
        _ => 0.01,
    }
}
