use rand::Rng;

use crate::error::EngineError;
use crate::state::{Team, check_strength};

/// Flat boost added to the home side's strength before rates are computed.
pub const HOME_ADVANTAGE: f64 = 0.1;
/// Scales the strength ratio into an expected-goals rate.
pub const GOAL_RATE_SCALE: f64 = 1.5;
/// Scores are capped here so a near-zero opponent strength cannot produce
/// unbounded goal counts.
pub const MAX_GOALS: u8 = 6;

/// Simulate one match outcome from the two sides' strength ratings.
///
/// Each side's goal count is an independent Poisson draw with rate
/// `strength / opponent_strength * GOAL_RATE_SCALE`, after the home side
/// receives `HOME_ADVANTAGE`. The result is intentionally randomized per
/// call; pass a seeded generator for reproducible runs.
pub fn simulate_score<R: Rng + ?Sized>(
    home_strength: f64,
    away_strength: f64,
    rng: &mut R,
) -> Result<(u8, u8), EngineError> {
    check_strength(home_strength)?;
    check_strength(away_strength)?;

    let home_strength = home_strength + HOME_ADVANTAGE;
    let home_goals = poisson_goals(home_strength / away_strength * GOAL_RATE_SCALE, rng);
    let away_goals = poisson_goals(away_strength / home_strength * GOAL_RATE_SCALE, rng);
    Ok((home_goals, away_goals))
}

/// `simulate_score` over two teams' ratings.
pub fn simulate_fixture<R: Rng + ?Sized>(
    home: &Team,
    away: &Team,
    rng: &mut R,
) -> Result<(u8, u8), EngineError> {
    simulate_score(home.strength, away.strength, rng)
}

/// Knuth's multiplication method: multiply uniform draws until the product
/// falls to `e^-lambda`; the number of draws minus one is Poisson(lambda).
fn poisson_goals<R: Rng + ?Sized>(lambda: f64, rng: &mut R) -> u8 {
    let limit = (-lambda).exp();
    let mut draws = 0u32;
    let mut product = 1.0f64;
    loop {
        draws += 1;
        product *= rng.r#gen::<f64>();
        if product <= limit {
            break;
        }
    }
    (draws - 1).min(MAX_GOALS as u32) as u8
}
