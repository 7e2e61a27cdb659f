use std::sync::LazyLock;

use regex::Regex;

use crate::core::filters::passes_avoid;
use crate::core::rank::rank;
use crate::models::{Budget, DinnerQuery, Restaurant};

/// Floor for the "closer" mutation.
const MIN_DISTANCE_KM: f64 = 0.5;
/// Cap for the "farther" mutation.
const MAX_DISTANCE_KM: f64 = 30.0;
/// "fancier" raises the rating threshold to at least this.
const FANCY_MIN_RATING: f64 = 4.3;

/// One entry of the refinement vocabulary: any of the trigger phrases found
/// in the lowercased instruction fires the mutation once.
struct Rule {
    phrases: &'static [&'static str],
    apply: fn(&mut DinnerQuery),
}

fn shrink_distance(query: &mut DinnerQuery) {
    query.distance_km = (query.distance_km * 0.6).max(MIN_DISTANCE_KM);
}

fn widen_distance(query: &mut DinnerQuery) {
    query.distance_km = (query.distance_km * 1.5).min(MAX_DISTANCE_KM);
}

fn lower_budget(query: &mut DinnerQuery) {
    query.budget = Some(match query.budget {
        Some(budget) => budget.cheaper(),
        None => Budget::CHEAPEST,
    });
}

fn fancier(query: &mut DinnerQuery) {
    union_into(&mut query.vibe, &["romantic", "date night"]);
    if query.min_rating < FANCY_MIN_RATING {
        query.min_rating = FANCY_MIN_RATING;
    }
}

fn family_friendly(query: &mut DinnerQuery) {
    union_into(&mut query.vibe, &["family"]);
}

fn open_now(query: &mut DinnerQuery) {
    query.open_now = true;
}

/// Fixed, ordered trigger table. Every rule is independently triggerable and
/// they touch disjoint fields (budget and min_rating only ever move
/// monotonically within a single call), so check order does not change the
/// final state.
static RULES: &[Rule] = &[
    Rule {
        phrases: &["closer", "nearer"],
        apply: shrink_distance,
    },
    Rule {
        phrases: &["farther", "more options"],
        apply: widen_distance,
    },
    Rule {
        phrases: &["cheaper", "less expensive", "budget"],
        apply: lower_budget,
    },
    Rule {
        phrases: &["fancier", "nicer", "date night"],
        apply: fancier,
    },
    Rule {
        phrases: &["kid", "family"],
        apply: family_friendly,
    },
    Rule {
        phrases: &["open now"],
        apply: open_now,
    },
    Rule {
        phrases: &["open late", "open later"],
        apply: open_now,
    },
];

static AVOID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:no|not)\s+([a-zA-Z\- ]+)").expect("avoid pattern"));

static CUISINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:want|craving|more|prefer)\s+([a-zA-Z\- ]+)").expect("cuisine pattern")
});

/// Append terms that are not already present, preserving insertion order.
fn union_into(dest: &mut Vec<String>, terms: &[&str]) {
    for term in terms {
        if !dest.iter().any(|existing| existing == term) {
            dest.push((*term).to_string());
        }
    }
}

/// Interpret a free-text instruction against the previous query, producing a
/// mutated copy. All matched triggers apply cumulatively in a single pass;
/// the captured `no/not ...` phrases extend the avoid list and the
/// `want/craving/more/prefer ...` phrases extend the cuisine list.
pub fn apply_instruction(instruction: &str, last_query: &DinnerQuery) -> DinnerQuery {
    let mut query = last_query.clone();
    let instruction = instruction.to_lowercase();

    for rule in RULES {
        if rule.phrases.iter().any(|phrase| instruction.contains(phrase)) {
            (rule.apply)(&mut query);
        }
    }

    for capture in AVOID_RE.captures_iter(&instruction) {
        let term = capture[1].trim();
        if !term.is_empty() {
            union_into(&mut query.avoid, &[term]);
        }
    }

    for capture in CUISINE_RE.captures_iter(&instruction) {
        let term = capture[1].trim();
        if !term.is_empty() {
            union_into(&mut query.cuisines, &[term]);
        }
    }

    query
}

/// Re-filter cached results against the mutated avoid list, then re-score and
/// stable-sort them with the common scoring function. No provider calls, no
/// min_rating re-filter (already applied on the original fetch), no snippet
/// refresh.
pub fn rerank_cached(results: &[Restaurant], query: &DinnerQuery) -> Vec<Restaurant> {
    let survivors: Vec<Restaurant> = results
        .iter()
        .filter(|restaurant| passes_avoid(restaurant, &query.avoid))
        .cloned()
        .collect();

    rank(survivors, query)
}
