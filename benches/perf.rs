use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use league_sim::league::League;
use league_sim::predict::project_table;
use league_sim::schedule::generate_weeks;
use league_sim::standings::compute_standings;
use league_sim::state::{Team, TeamId};

fn bench_teams(count: u32) -> Vec<Team> {
    (1..=count)
        .map(|id| {
            Team::new(
                id,
                format!("Team {id}"),
                format!("T{id:02}"),
                0.3 + 0.6 * f64::from(id) / f64::from(count),
            )
            .expect("bench strengths are valid")
        })
        .collect()
}

fn bench_schedule_generate(c: &mut Criterion) {
    let ids: Vec<TeamId> = (1..=20).collect();
    c.bench_function("schedule_generate_20_teams_double", |b| {
        b.iter(|| {
            let weeks = generate_weeks(black_box(&ids), black_box(2)).unwrap();
            black_box(weeks.len());
        })
    });
}

fn bench_full_season(c: &mut Criterion) {
    let teams = bench_teams(20);
    c.bench_function("full_season_20_teams", |b| {
        b.iter(|| {
            let mut league = League::with_teams(teams.clone());
            league.generate_fixtures(2, true).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            let played = league.simulate_all(&mut rng).unwrap();
            black_box(played);
        })
    });
}

fn bench_standings_compute(c: &mut Criterion) {
    let teams = bench_teams(20);
    let mut league = League::with_teams(teams.clone());
    league.generate_fixtures(2, true).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    league.simulate_all(&mut rng).unwrap();
    let fixtures = league.fixtures().to_vec();

    c.bench_function("standings_compute_20_teams", |b| {
        b.iter(|| {
            let rows = compute_standings(black_box(&teams), black_box(&fixtures)).unwrap();
            black_box(rows.len());
        })
    });
}

fn bench_prediction_project(c: &mut Criterion) {
    let teams = bench_teams(20);
    let mut league = League::with_teams(teams.clone());
    league.generate_fixtures(2, true).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    // Half-played season exercises the remaining-fixture projection path.
    for _ in 0..19 {
        league.simulate_next_week(&mut rng).unwrap();
    }
    let fixtures = league.fixtures().to_vec();

    c.bench_function("prediction_project_20_teams", |b| {
        b.iter(|| {
            let table = project_table(black_box(&teams), black_box(&fixtures)).unwrap();
            black_box(table.rows.len());
        })
    });
}

criterion_group!(
    perf,
    bench_schedule_generate,
    bench_full_season,
    bench_standings_compute,
    bench_prediction_project
);
criterion_main!(perf);
