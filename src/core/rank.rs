use std::cmp::Ordering;

use crate::core::scoring::score;
use crate::models::{DinnerQuery, Restaurant};

/// Score every restaurant against the query and sort descending.
///
/// The sort is stable, so rating-and-score ties keep their original fetch
/// order. Truncation to the query limit is the caller's concern - the refine
/// path reranks the full cached list without cutting it.
pub fn rank(restaurants: Vec<Restaurant>, query: &DinnerQuery) -> Vec<Restaurant> {
    let mut scored: Vec<(Restaurant, f64)> = restaurants
        .into_iter()
        .map(|restaurant| {
            let restaurant_score = score(&restaurant, query);
            (restaurant, restaurant_score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    scored.into_iter().map(|(restaurant, _)| restaurant).collect()
}
