// Model exports
pub mod domain;
pub mod provider;
pub mod requests;
pub mod responses;

pub use domain::{Budget, DinnerQuery, FindQuery, Location, Preferences, ResolvedLocation, Restaurant};
pub use provider::{RawBusiness, RawCategory, RawLocation, RawReview, ReviewsPayload, SearchBusinesses};
pub use requests::{FindDinnerRequest, RefineRequest, SearchAgainRequest, SetPrefsRequest};
pub use responses::{ErrorResponse, HealthResponse, MemorySnapshot, SearchResult, StoredPrefsResponse};
