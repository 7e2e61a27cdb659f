// Core algorithm exports
pub mod engine;
pub mod filters;
pub mod merge;
pub mod normalize;
pub mod rank;
pub mod refine;
pub mod scoring;
pub mod units;

pub use engine::DinnerEngine;
pub use filters::{meets_min_rating, passes_avoid, search_text};
pub use merge::merge;
pub use normalize::to_restaurant;
pub use rank::rank;
pub use refine::{apply_instruction, rerank_cached};
pub use scoring::score;
pub use units::{join_address, km_to_meters, meters_to_km};
