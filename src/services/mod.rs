// Service exports
pub mod sessions;
pub mod yelp;

pub use sessions::{Session, SessionStore};
pub use yelp::{collapse_snippet, YelpClient, YelpError};
