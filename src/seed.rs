use crate::state::Team;

/// Canned four-team demo league used by the season binary and the
/// end-to-end tests.
pub fn seed_teams() -> Vec<Team> {
    vec![
        Team {
            id: 1,
            name: "Chelsea".to_string(),
            short_name: "CHE".to_string(),
            strength: 0.85,
        },
        Team {
            id: 2,
            name: "Arsenal".to_string(),
            short_name: "ARS".to_string(),
            strength: 0.82,
        },
        Team {
            id: 3,
            name: "Manchester City".to_string(),
            short_name: "MCI".to_string(),
            strength: 0.90,
        },
        Team {
            id: 4,
            name: "Liverpool".to_string(),
            short_name: "LIV".to_string(),
            strength: 0.88,
        },
    ]
}
