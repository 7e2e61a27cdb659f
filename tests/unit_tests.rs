// Unit tests for Dinner Scout

use dinner_scout::core::{
    filters::{meets_min_rating, passes_avoid},
    merge::merge,
    rank::rank,
    refine::{apply_instruction, rerank_cached},
    scoring::score,
    units::meters_to_km,
};
use dinner_scout::models::{Budget, DinnerQuery, FindQuery, Location, Preferences, Restaurant};

fn restaurant(id: &str, rating: f64, review_count: u32, distance_km: f64) -> Restaurant {
    Restaurant {
        id: id.to_string(),
        name: id.to_string(),
        rating,
        review_count,
        price: None,
        categories: vec![],
        url: String::new(),
        address: String::new(),
        distance_km,
        phone: None,
        snippet: None,
    }
}

fn base_query() -> DinnerQuery {
    merge(
        &Preferences::default(),
        &FindQuery {
            location: Some(Location {
                latitude: None,
                longitude: None,
                address: Some("Waterloo, ON".to_string()),
            }),
            ..Default::default()
        },
    )
}

#[test]
fn test_score_is_pure_and_deterministic() {
    let query = base_query();
    let candidate = restaurant("r", 4.5, 320, 2.4);

    let first = score(&candidate, &query);
    for _ in 0..10 {
        assert_eq!(score(&candidate, &query), first);
    }
}

#[test]
fn test_distance_penalty_is_monotonic() {
    let query = base_query(); // distance_km = 3.0

    let within = restaurant("within", 4.5, 100, 2.9);
    let just_over = restaurant("just_over", 4.5, 100, 3.5);
    let far_over = restaurant("far_over", 4.5, 100, 8.0);

    let within_score = score(&within, &query);
    let just_over_score = score(&just_over, &query);
    let far_over_score = score(&far_over, &query);

    assert!(within_score > just_over_score);
    assert!(just_over_score > far_over_score);
}

#[test]
fn test_price_alignment_decreases_with_gap_and_floors() {
    let mut query = base_query();
    query.budget = Budget::new(1);

    let mut scores = vec![];
    for symbols in 1..=4 {
        let mut candidate = restaurant("c", 4.5, 100, 1.0);
        candidate.price = Budget::new(symbols);
        scores.push(score(&candidate, &query));
    }

    // Exact match gets the full 1.5 credit.
    assert!((scores[0] - scores[1] - 0.75).abs() < 1e-9);
    // Two symbols off exhausts the credit; three symbols off cannot go negative.
    assert!((scores[1] - scores[2] - 0.75).abs() < 1e-9);
    assert_eq!(scores[2], scores[3]);
}

#[test]
fn test_merge_incoming_overrides_stored() {
    let stored = Preferences {
        distance_km: Some(5.0),
        ..Default::default()
    };
    let incoming = FindQuery {
        prefs: Preferences {
            distance_km: Some(2.0),
            ..Default::default()
        },
        ..Default::default()
    };

    assert_eq!(merge(&stored, &incoming).distance_km, 2.0);
}

#[test]
fn test_merge_applies_all_four_defaults() {
    let merged = merge(&Preferences::default(), &FindQuery::default());

    assert_eq!(merged.distance_km, 3.0);
    assert_eq!(merged.min_rating, 4.0);
    assert!(merged.open_now);
    assert_eq!(merged.limit, 12);
}

#[test]
fn test_refine_closer_repeated() {
    let mut query = base_query();
    query.distance_km = 5.0;

    let once = apply_instruction("closer", &query);
    assert!((once.distance_km - 3.0).abs() < 1e-9);

    let twice = apply_instruction("closer", &once);
    assert!((twice.distance_km - (5.0f64 * 0.6 * 0.6).max(0.5)).abs() < 1e-9);
}

#[test]
fn test_refine_not_pizza_filters_cached_results() {
    let cached = vec![
        Restaurant {
            categories: vec!["Pizza".to_string()],
            ..restaurant("pizza-place", 4.9, 400, 0.5)
        },
        restaurant("noodle-bar", 4.4, 150, 1.0),
    ];

    let refined = apply_instruction("not pizza", &base_query());
    assert!(refined.avoid.contains(&"pizza".to_string()));

    let reranked = rerank_cached(&cached, &refined);
    assert_eq!(reranked.len(), 1);
    assert_eq!(reranked[0].id, "noodle-bar");
}

#[test]
fn test_min_rating_is_boundary_inclusive() {
    let query = base_query();
    let boundary = restaurant("boundary", 4.0, 10, 1.0);
    let below = restaurant("below", 3.99, 10, 1.0);

    assert!(meets_min_rating(&boundary, query.min_rating));
    assert!(!meets_min_rating(&below, query.min_rating));
}

#[test]
fn test_avoid_uses_same_semantics_as_scoring_haystack() {
    let mut candidate = restaurant("mystery", 4.5, 100, 1.0);
    candidate.name = "The Banana Stand".to_string();
    candidate.categories = vec!["Dessert".to_string()];

    assert!(!passes_avoid(&candidate, &["banana".to_string()]));
    assert!(!passes_avoid(&candidate, &["dessert".to_string()]));
    assert!(passes_avoid(&candidate, &["pizza".to_string()]));
}

#[test]
fn test_rank_is_stable_under_ties() {
    let query = base_query();
    let tied: Vec<Restaurant> = (0..6)
        .map(|i| restaurant(&format!("r{i}"), 4.2, 100, 1.0))
        .collect();

    let ranked = rank(tied, &query);
    let ids: Vec<String> = ranked.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, vec!["r0", "r1", "r2", "r3", "r4", "r5"]);
}

#[test]
fn test_meters_to_km_two_decimals() {
    assert_eq!(meters_to_km(1666.0), 1.67);
    assert_eq!(meters_to_km(999.0), 1.0);
}
