use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use league_sim::league::{League, TeamEntry};
use league_sim::seed::seed_teams;
use league_sim::state::TeamId;

struct Args {
    teams_path: Option<PathBuf>,
    rounds: u32,
    seed: Option<u64>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        teams_path: None,
        rounds: 2,
        seed: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--rounds" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--rounds needs a value"))?;
                args.rounds = value.parse()?;
            }
            "--seed" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--seed needs a value"))?;
                args.seed = Some(value.parse()?);
            }
            other => args.teams_path = Some(PathBuf::from(other)),
        }
    }
    Ok(args)
}

// This binary is intentionally simple: seed or load a league, play a full
// season, and print the tables. It is meant for eyeballing model behavior,
// not for serving anything.
fn main() -> anyhow::Result<()> {
    let args = parse_args()?;

    let mut league = match &args.teams_path {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            let entries: Vec<TeamEntry> = serde_json::from_str(&raw)?;
            let mut league = League::new();
            let summary = league.import_teams(&entries)?;
            println!(
                "Imported {} teams ({} skipped) from {}",
                summary.imported,
                summary.skipped,
                path.display()
            );
            league
        }
        None => League::with_teams(seed_teams()),
    };

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    println!("Simulation seed: {seed}");

    let summary = league.generate_fixtures(args.rounds, true)?;
    println!(
        "Scheduled {} fixtures over {} weeks for {} teams\n",
        summary.total_fixtures, summary.total_weeks, summary.teams_count
    );

    let names: HashMap<TeamId, String> = league
        .teams()
        .iter()
        .map(|t| (t.id, t.short_name.clone()))
        .collect();

    // Play half the season, show the projection, then finish it.
    let halfway = (summary.total_weeks / 2).max(1);
    for _ in 0..halfway {
        if let Some(week) = league.simulate_next_week(&mut rng)? {
            for fixture in league.fixtures_for_week(week) {
                if let Some((h, a)) = fixture.result() {
                    println!(
                        "Week {:>2}: {} {h}-{a} {}",
                        week, names[&fixture.home_id], names[&fixture.away_id]
                    );
                }
            }
        }
    }

    println!("\nProjection after week {halfway}:");
    let table = league.predictions()?;
    for row in &table.rows {
        println!(
            "  {:<4} points {:>3}  projected {:>6.2}  title {:>5.1}%",
            names[&row.team_id],
            row.current_points,
            row.projected_points,
            row.championship_probability * 100.0
        );
    }

    league.simulate_all(&mut rng)?;

    println!("\nFinal table:");
    println!("  Pos Team  Pld   W   D   L   GF   GA   GD  Pts");
    for row in league.standings()? {
        println!(
            "  {:>3} {:<4} {:>4} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
            row.position,
            names[&row.team_id],
            row.played,
            row.won,
            row.drawn,
            row.lost,
            row.goals_for,
            row.goals_against,
            row.goal_difference,
            row.points
        );
    }

    let table = league.predictions()?;
    if table.season_complete {
        let champion = table
            .rows
            .iter()
            .find(|r| r.championship_probability == 1.0)
            .map(|r| names[&r.team_id].as_str())
            .unwrap_or("?");
        println!("\nSeason complete. Champion: {champion}");
    }

    Ok(())
}
