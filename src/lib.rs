//! Dinner Scout - restaurant recommendation and refinement service
//!
//! This library wraps the Yelp Fusion business search behind a small set of
//! stateful operations: capture preferences, run a constrained search, refine
//! previous results from a natural-language instruction, and replay the last
//! search. The ranking-and-refinement engine is the core; HTTP transport and
//! the provider itself are collaborators around it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{merge, rank, refine::apply_instruction, score, DinnerEngine};
pub use models::{
    Budget, DinnerQuery, FindQuery, Location, Preferences, Restaurant, SearchResult,
};
pub use services::{SessionStore, YelpClient, YelpError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let merged = merge(&Preferences::default(), &FindQuery::default());
        assert_eq!(merged.limit, 12);
    }
}
