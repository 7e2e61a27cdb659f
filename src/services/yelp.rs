use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::core::units::km_to_meters;
use crate::models::{DinnerQuery, RawBusiness, ResolvedLocation, ReviewsPayload, SearchBusinesses};

/// Search radius bounds accepted by the provider, in meters.
const MAX_RADIUS_M: u32 = 40_000;
const MIN_RADIUS_M: u32 = 100;
/// Hard provider cap on results per search.
const MAX_LIMIT: u32 = 50;
/// Review snippets are truncated to this many characters.
const SNIPPET_MAX_CHARS: usize = 160;
const SNIPPET_KEEP_CHARS: usize = 157;

/// Errors that can occur when talking to Yelp Fusion.
#[derive(Debug, Error)]
pub enum YelpError {
    #[error("missing Yelp API key: set YELP_API_KEY")]
    MissingApiKey,

    #[error("location required: either (latitude & longitude) or address")]
    MissingLocation,

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    Api(StatusCode),
}

/// Yelp Fusion API client.
///
/// Two capabilities: a ranked-candidate search and a best-effort top-review
/// fetch. Both are independently timeout-bounded; neither retries.
pub struct YelpClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
    search_timeout: Duration,
    review_timeout: Duration,
}

impl YelpClient {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        search_timeout_secs: u64,
        review_timeout_secs: u64,
    ) -> Self {
        let client = Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
            search_timeout: Duration::from_secs(search_timeout_secs),
            review_timeout: Duration::from_secs(review_timeout_secs),
        }
    }

    fn require_key(&self) -> Result<&str, YelpError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(YelpError::MissingApiKey)
    }

    /// Translate an effective query into provider search parameters.
    ///
    /// Pure; fails only when the query has neither a coordinate pair nor an
    /// address, before any network activity.
    pub fn search_params(query: &DinnerQuery) -> Result<Vec<(String, String)>, YelpError> {
        let mut params: Vec<(String, String)> = vec![
            ("limit".to_string(), query.limit.min(MAX_LIMIT).to_string()),
            ("sort_by".to_string(), "best_match".to_string()),
        ];

        match query.location.as_ref().and_then(|l| l.resolve()) {
            Some(ResolvedLocation::Coords {
                latitude,
                longitude,
            }) => {
                params.push(("latitude".to_string(), latitude.to_string()));
                params.push(("longitude".to_string(), longitude.to_string()));
            }
            Some(ResolvedLocation::Address(address)) => {
                params.push(("location".to_string(), address));
            }
            None => return Err(YelpError::MissingLocation),
        }

        let radius =
            (km_to_meters(query.distance_km).round() as u32).clamp(MIN_RADIUS_M, MAX_RADIUS_M);
        params.push(("radius".to_string(), radius.to_string()));

        let categories: Vec<&str> = query
            .cuisines
            .iter()
            .chain(query.dietary.iter())
            .map(String::as_str)
            .collect();
        if !categories.is_empty() {
            params.push(("categories".to_string(), categories.join(",")));
        }

        if query.open_now {
            params.push(("open_now".to_string(), "true".to_string()));
        }

        if let Some(budget) = query.budget {
            params.push(("price".to_string(), budget.symbols().to_string()));
        }

        let terms: Vec<&str> = query
            .keywords
            .iter()
            .chain(query.vibe.iter())
            .map(String::as_str)
            .collect();
        if !terms.is_empty() {
            params.push(("term".to_string(), terms.join(" ")));
        }

        Ok(params)
    }

    /// Fetch raw candidate businesses for the query. Fail-hard: credential,
    /// validation and provider errors all propagate.
    pub async fn search(&self, query: &DinnerQuery) -> Result<Vec<RawBusiness>, YelpError> {
        let key = self.require_key()?;
        let params = Self::search_params(query)?;
        let url = format!("{}/businesses/search", self.base_url.trim_end_matches('/'));

        tracing::debug!("searching businesses with {} params", params.len());

        let response = self
            .client
            .get(&url)
            .bearer_auth(key)
            .query(&params)
            .timeout(self.search_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(YelpError::Api(response.status()));
        }

        let payload: SearchBusinesses = response.json().await?;
        Ok(payload.businesses)
    }

    /// Fetch the text of the top review for a business, whitespace-collapsed
    /// and truncated. `Ok(None)` when the business has no reviews; callers
    /// are expected to treat errors as "no snippet" as well.
    pub async fn top_review_snippet(&self, business_id: &str) -> Result<Option<String>, YelpError> {
        let key = self.require_key()?;
        let url = format!(
            "{}/businesses/{}/reviews",
            self.base_url.trim_end_matches('/'),
            business_id
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(key)
            .timeout(self.review_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(YelpError::Api(response.status()));
        }

        let payload: ReviewsPayload = response.json().await?;
        Ok(payload
            .reviews
            .first()
            .map(|review| collapse_snippet(&review.text)))
    }
}

/// Collapse runs of whitespace to single spaces and truncate long snippets
/// with an ellipsis marker.
pub fn collapse_snippet(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > SNIPPET_MAX_CHARS {
        let mut truncated: String = collapsed.chars().take(SNIPPET_KEEP_CHARS).collect();
        truncated.push('…');
        truncated
    } else {
        collapsed
    }
}
