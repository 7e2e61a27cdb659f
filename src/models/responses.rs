use serde::{Deserialize, Serialize};

use crate::models::domain::{DinnerQuery, Preferences, Restaurant};

/// Ranked search outcome shared by find / refine / replay. `tips` is always
/// non-empty: widening advice when the list is empty, example refinement
/// phrases or follow-up hints otherwise. `query_used` is `None` only on the
/// graceful no-prior-state paths.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub query_used: Option<DinnerQuery>,
    pub restaurants: Vec<Restaurant>,
    pub tips: Vec<String>,
}

/// Response for the store-preferences endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct StoredPrefsResponse {
    pub ok: bool,
    pub stored: Preferences,
}

/// Read-only projection of a profile's session memory.
#[derive(Debug, Clone, Serialize)]
pub struct MemorySnapshot {
    pub prefs: Preferences,
    pub last_query: Option<DinnerQuery>,
    pub last_count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_snapshot_serializes_sparse_state() {
        let snapshot = MemorySnapshot {
            prefs: Preferences::default(),
            last_query: None,
            last_count: 0,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["last_count"], 0);
        assert!(json["last_query"].is_null());
        assert!(json["prefs"].as_object().unwrap().is_empty());
    }
}
