use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::models::{DinnerQuery, MemorySnapshot, Preferences, Restaurant};

/// Per-profile session state. Preferences accumulate across calls; the last
/// query and results are replaced wholesale by each search or refinement.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub prefs: Preferences,
    pub last_query: Option<DinnerQuery>,
    pub last_results: Vec<Restaurant>,
}

/// Explicitly-owned store of per-profile sessions, constructed once at
/// process start. Sessions are created lazily on first reference and live for
/// the process lifetime; state is volatile by design.
///
/// Distinct profiles never interfere. Concurrent writers to the same profile
/// get last-writer-wins semantics; no stronger isolation is promised.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Merge preferences into a profile and return the accumulated bag.
    pub async fn merge_prefs(&self, profile: &str, incoming: &Preferences) -> Preferences {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(profile.to_string()).or_default();
        session.prefs.merge_from(incoming);
        session.prefs.clone()
    }

    /// Current stored preferences for a profile (empty bag if never touched).
    pub async fn prefs(&self, profile: &str) -> Preferences {
        let sessions = self.sessions.read().await;
        sessions
            .get(profile)
            .map(|session| session.prefs.clone())
            .unwrap_or_default()
    }

    /// The last executed query together with its cached results.
    pub async fn last(&self, profile: &str) -> Option<(DinnerQuery, Vec<Restaurant>)> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(profile)?;
        let query = session.last_query.clone()?;
        Some((query, session.last_results.clone()))
    }

    pub async fn last_query(&self, profile: &str) -> Option<DinnerQuery> {
        let sessions = self.sessions.read().await;
        sessions.get(profile)?.last_query.clone()
    }

    /// Replace both the last query and its results wholesale.
    pub async fn record_search(
        &self,
        profile: &str,
        query: DinnerQuery,
        results: Vec<Restaurant>,
    ) {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(profile.to_string()).or_default();
        session.last_query = Some(query);
        session.last_results = results;
    }

    /// Replace only the cached results, leaving the query untouched (replay).
    pub async fn record_results(&self, profile: &str, results: Vec<Restaurant>) {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(profile.to_string()).or_default();
        session.last_results = results;
    }

    /// Read-only projection of a profile's memory.
    pub async fn snapshot(&self, profile: &str) -> MemorySnapshot {
        let sessions = self.sessions.read().await;
        let session = sessions.get(profile).cloned().unwrap_or_default();
        MemorySnapshot {
            prefs: session.prefs,
            last_query: session.last_query,
            last_count: session.last_results.len(),
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
