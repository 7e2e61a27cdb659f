use serde::Deserialize;

/// Wire types for the Yelp Fusion v3 API. Absent numeric fields default to
/// zero and absent lists to empty so a sparse provider record never fails to
/// deserialize.

/// Envelope of `GET /businesses/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchBusinesses {
    #[serde(default)]
    pub businesses: Vec<RawBusiness>,
}

/// A single business record as returned by the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBusiness {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub categories: Vec<RawCategory>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub location: RawLocation,
    /// Distance from the search origin, in meters.
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub display_phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCategory {
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub title: String,
}

/// Structured address parts. Joined into a display string by the normalizer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLocation {
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub address3: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
}

/// Envelope of `GET /businesses/{id}/reviews`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewsPayload {
    #[serde(default)]
    pub reviews: Vec<RawReview>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawReview {
    #[serde(default)]
    pub text: String,
}
