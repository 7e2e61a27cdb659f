use serde::Deserialize;
use validator::Validate;

use crate::models::domain::{FindQuery, Preferences};

fn default_profile() -> String {
    "default".to_string()
}

/// Request to store/merge dinner preferences for a profile.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetPrefsRequest {
    pub preferences: Preferences,
    #[validate(length(min = 1))]
    #[serde(default = "default_profile")]
    pub profile: String,
}

/// Request to run a new restaurant search.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FindDinnerRequest {
    pub query: FindQuery,
    #[validate(length(min = 1))]
    #[serde(default = "default_profile")]
    pub profile: String,
}

/// Request to refine the last results from a natural-language instruction.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefineRequest {
    #[validate(length(min = 1))]
    pub instruction: String,
    #[validate(length(min = 1))]
    #[serde(default = "default_profile")]
    pub profile: String,
}

/// Request to replay the last stored query against the provider.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SearchAgainRequest {
    #[validate(length(min = 1))]
    #[serde(default = "default_profile")]
    pub profile: String,
}
