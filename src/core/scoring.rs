use crate::core::filters::search_text;
use crate::models::{DinnerQuery, Restaurant};

/// Review volume credit saturates at this many points.
const REVIEW_TERM_CAP: f64 = 2.0;
/// Review count at which the credit reaches the cap (log10 denominator).
const REVIEW_SATURATION: f64 = 501.0;
/// Penalty per kilometer beyond the query's distance budget.
const DISTANCE_PENALTY_PER_KM: f64 = 0.5;
/// Credit for an exact price-tier match.
const PRICE_ALIGN_MAX: f64 = 1.5;
/// Cost per symbol of price-tier mismatch.
const PRICE_MISMATCH_COST: f64 = 0.75;
/// Credit per keyword hit in the name/category text.
const KEYWORD_BONUS: f64 = 0.5;

/// Ranking score for a restaurant against the active query.
///
/// Pure and deterministic; additive terms with no normalization:
/// - rating as-is (the 0-5 scale dominates)
/// - diminishing-returns review credit, capped at 2.0
/// - linear penalty per km over the distance budget, none under it
/// - price alignment when both the query budget and the price are known
/// - 0.5 per keyword found in the name/category text (duplicates in the
///   keyword list count every time)
///
/// Ties are broken by original fetch order via stable sorting downstream.
pub fn score(restaurant: &Restaurant, query: &DinnerQuery) -> f64 {
    let review_term = (((1.0 + restaurant.review_count as f64).log10()
        / REVIEW_SATURATION.log10())
        * REVIEW_TERM_CAP)
        .min(REVIEW_TERM_CAP);

    let over_budget_km = restaurant.distance_km - query.distance_km;
    let distance_penalty = if over_budget_km > 0.0 {
        -DISTANCE_PENALTY_PER_KM * over_budget_km
    } else {
        0.0
    };

    let price_alignment = match (query.budget, restaurant.price) {
        (Some(wanted), Some(price)) => {
            let gap = (price.symbols() as i32 - wanted.symbols() as i32).abs() as f64;
            (PRICE_ALIGN_MAX - PRICE_MISMATCH_COST * gap).max(0.0)
        }
        _ => 0.0,
    };

    let haystack = search_text(&restaurant.name, &restaurant.categories);
    let keyword_hits = query
        .keywords
        .iter()
        .filter(|keyword| haystack.contains(&keyword.to_lowercase()))
        .count();

    restaurant.rating
        + review_term
        + distance_penalty
        + price_alignment
        + KEYWORD_BONUS * keyword_hits as f64
}
