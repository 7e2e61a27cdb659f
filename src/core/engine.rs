use std::sync::Arc;

use crate::core::filters::{meets_min_rating, passes_avoid};
use crate::core::merge::merge;
use crate::core::normalize::to_restaurant;
use crate::core::rank::rank;
use crate::core::refine::{apply_instruction, rerank_cached};
use crate::models::{
    DinnerQuery, FindQuery, MemorySnapshot, Preferences, Restaurant, SearchResult,
};
use crate::services::{SessionStore, YelpClient, YelpError};

/// Review snippets are fetched for at most this many top-ranked results.
const MAX_SNIPPETS: usize = 5;

const TIP_WIDEN: &str =
    "Try widening distance_km, lowering min_rating, or removing avoid keywords.";
const TIP_REFINE_EXAMPLES: &str =
    "You can say things like: 'closer', 'cheaper', 'more spicy', 'kid-friendly', or 'not pizza'.";
const TIP_SEARCH_AGAIN: &str =
    "Say 'search again' to fetch fresh options from Yelp with your refined query.";
const TIP_NO_PRIOR_REFINE: &str = "No prior result to refine. Search for dinner first.";
const TIP_NO_PRIOR_REPLAY: &str = "No query in memory. Search for dinner first.";
const TIP_REPLAY_DONE: &str = "Refined search complete.";

/// The ranking-and-refinement engine.
///
/// Owns the per-profile session store and the provider client, and implements
/// the four stateful operations plus the read-only memory projection exposed
/// to the HTTP layer. Provider failures on the primary search propagate; the
/// per-result review snippet fetch is fail-soft.
pub struct DinnerEngine {
    yelp: Arc<YelpClient>,
    sessions: Arc<SessionStore>,
}

impl DinnerEngine {
    pub fn new(yelp: Arc<YelpClient>, sessions: Arc<SessionStore>) -> Self {
        Self { yelp, sessions }
    }

    /// Merge preferences into the profile's stored bag and return the result.
    pub async fn set_prefs(&self, profile: &str, preferences: &Preferences) -> Preferences {
        let stored = self.sessions.merge_prefs(profile, preferences).await;
        tracing::info!("stored preferences for profile {}", profile);
        stored
    }

    /// Run a fresh search: merge stored preferences with the request, fetch,
    /// filter, rank, truncate, attach snippets, and persist the outcome as
    /// the profile's last query/results.
    pub async fn find(&self, profile: &str, query: &FindQuery) -> Result<SearchResult, YelpError> {
        let stored = self.sessions.prefs(profile).await;
        let merged = merge(&stored, query);

        let raw = self.yelp.search(&merged).await?;
        let total_candidates = raw.len();

        let candidates: Vec<Restaurant> = raw
            .iter()
            .map(to_restaurant)
            .filter(|restaurant| passes_avoid(restaurant, &merged.avoid))
            .filter(|restaurant| meets_min_rating(restaurant, merged.min_rating))
            .collect();

        let mut ranked = rank(candidates, &merged);
        ranked.truncate(merged.limit as usize);
        self.attach_snippets(&mut ranked).await;

        tracing::info!(
            "profile {}: kept {} of {} candidates",
            profile,
            ranked.len(),
            total_candidates
        );

        self.sessions
            .record_search(profile, merged.clone(), ranked.clone())
            .await;

        let tips = if ranked.is_empty() {
            vec![TIP_WIDEN.to_string()]
        } else {
            vec![TIP_REFINE_EXAMPLES.to_string()]
        };

        Ok(SearchResult {
            query_used: Some(merged),
            restaurants: ranked,
            tips,
        })
    }

    /// Mutate the last query from a free-text instruction and rerank the
    /// cached results. Never calls the provider; with no prior search this is
    /// not an error but an empty result with an advisory tip.
    pub async fn refine(&self, profile: &str, instruction: &str) -> SearchResult {
        let prior = self.sessions.last(profile).await;
        let Some((last_query, last_results)) = prior else {
            return Self::no_prior(TIP_NO_PRIOR_REFINE);
        };
        if last_results.is_empty() {
            return Self::no_prior(TIP_NO_PRIOR_REFINE);
        }

        let refined = apply_instruction(instruction, &last_query);
        let reranked = rerank_cached(&last_results, &refined);

        tracing::info!(
            "profile {}: refined to {} of {} cached results",
            profile,
            reranked.len(),
            last_results.len()
        );

        // Keep last_results consistent with the mutated last_query.
        self.sessions
            .record_search(profile, refined.clone(), reranked.clone())
            .await;

        SearchResult {
            query_used: Some(refined),
            restaurants: reranked,
            tips: vec![TIP_SEARCH_AGAIN.to_string()],
        }
    }

    /// Re-execute the provider fetch with the current last query verbatim.
    /// No merge, no defaulting, no snippet refresh; replaces the cached
    /// results wholesale.
    pub async fn search_again(&self, profile: &str) -> Result<SearchResult, YelpError> {
        let Some(query) = self.sessions.last_query(profile).await else {
            return Ok(Self::no_prior(TIP_NO_PRIOR_REPLAY));
        };

        let raw = self.yelp.search(&query).await?;

        let candidates: Vec<Restaurant> = raw
            .iter()
            .map(to_restaurant)
            .filter(|restaurant| passes_avoid(restaurant, &query.avoid))
            .filter(|restaurant| meets_min_rating(restaurant, query.min_rating))
            .collect();

        let mut ranked = rank(candidates, &query);
        ranked.truncate(query.limit as usize);

        tracing::info!("profile {}: replay returned {} results", profile, ranked.len());

        self.sessions.record_results(profile, ranked.clone()).await;

        Ok(SearchResult {
            query_used: Some(query),
            restaurants: ranked,
            tips: vec![TIP_REPLAY_DONE.to_string()],
        })
    }

    /// Read-only snapshot of a profile's session memory.
    pub async fn memory_snapshot(&self, profile: &str) -> MemorySnapshot {
        self.sessions.snapshot(profile).await
    }

    /// Populate review snippets for the top-ranked prefix. Each fetch is
    /// independently fail-soft: any provider error leaves the snippet `None`.
    async fn attach_snippets(&self, ranked: &mut [Restaurant]) {
        for restaurant in ranked.iter_mut().take(MAX_SNIPPETS) {
            restaurant.snippet = match self.yelp.top_review_snippet(&restaurant.id).await {
                Ok(snippet) => snippet,
                Err(e) => {
                    tracing::debug!("snippet fetch failed for {}: {}", restaurant.id, e);
                    None
                }
            };
        }
    }

    fn no_prior(tip: &str) -> SearchResult {
        SearchResult {
            query_used: None,
            restaurants: vec![],
            tips: vec![tip.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> DinnerEngine {
        // Points at nothing; fine for paths that never reach the provider.
        let yelp = Arc::new(YelpClient::new(
            "http://127.0.0.1:9".to_string(),
            None,
            1,
            1,
        ));
        DinnerEngine::new(yelp, Arc::new(SessionStore::new()))
    }

    #[tokio::test]
    async fn test_refine_without_prior_search_is_graceful() {
        let engine = engine();
        let result = engine.refine("default", "closer").await;

        assert!(result.restaurants.is_empty());
        assert!(result.query_used.is_none());
        assert!(!result.tips.is_empty());
    }

    #[tokio::test]
    async fn test_search_again_without_prior_query_is_graceful() {
        let engine = engine();
        let result = engine.search_again("default").await.unwrap();

        assert!(result.restaurants.is_empty());
        assert!(!result.tips.is_empty());
    }

    #[tokio::test]
    async fn test_find_without_key_fails_before_network() {
        let engine = engine();
        let query = FindQuery::default();

        let err = engine.find("default", &query).await.unwrap_err();
        assert!(matches!(err, YelpError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_set_prefs_accumulates() {
        let engine = engine();

        let first = Preferences {
            cuisines: Some(vec!["thai".to_string()]),
            ..Default::default()
        };
        let second = Preferences {
            min_rating: Some(4.5),
            ..Default::default()
        };

        engine.set_prefs("p", &first).await;
        let stored = engine.set_prefs("p", &second).await;

        assert_eq!(stored.cuisines, Some(vec!["thai".to_string()]));
        assert_eq!(stored.min_rating, Some(4.5));
    }

    #[tokio::test]
    async fn test_memory_snapshot_empty_profile() {
        let engine = engine();
        let snapshot = engine.memory_snapshot("fresh").await;

        assert!(snapshot.last_query.is_none());
        assert_eq!(snapshot.last_count, 0);
    }
}
