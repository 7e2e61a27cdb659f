use serde::{Deserialize, Serialize};
use std::fmt;

/// Where to search. Either a coordinate pair or a free-text address; which one
/// is in play is decided by [`Location::resolve`] at query-execution time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A location that is actually usable for a provider search.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedLocation {
    Coords { latitude: f64, longitude: f64 },
    Address(String),
}

impl Location {
    /// Coordinates win when both representations are present.
    /// Returns `None` when neither is usable - that is a caller error.
    pub fn resolve(&self) -> Option<ResolvedLocation> {
        match (self.latitude, self.longitude, self.address.as_deref()) {
            (Some(latitude), Some(longitude), _) => {
                Some(ResolvedLocation::Coords { latitude, longitude })
            }
            (_, _, Some(address)) if !address.trim().is_empty() => {
                Some(ResolvedLocation::Address(address.to_string()))
            }
            _ => None,
        }
    }
}

/// Price tier expressed as a repeated currency symbol ("$".."$$$$").
///
/// Stored as the symbol count (1-4). Serialized in the wire shape Yelp uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Budget(u8);

impl Budget {
    pub const CHEAPEST: Budget = Budget(1);

    pub fn new(symbols: u8) -> Option<Self> {
        (1..=4).contains(&symbols).then_some(Self(symbols))
    }

    /// Parse a provider price string. Anything other than 1-4 dollar signs
    /// yields `None` (Yelp occasionally omits or mangles the field).
    pub fn parse(s: &str) -> Option<Self> {
        let len = s.len();
        if (1..=4).contains(&len) && s.bytes().all(|b| b == b'$') {
            Some(Self(len as u8))
        } else {
            None
        }
    }

    pub fn symbols(self) -> u8 {
        self.0
    }

    /// One tier down, clamped at a single symbol.
    pub fn cheaper(self) -> Budget {
        Budget(self.0.saturating_sub(1).max(1))
    }
}

impl TryFrom<String> for Budget {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Budget::parse(&value)
            .ok_or_else(|| format!("budget must be \"$\" through \"$$$$\", got {value:?}"))
    }
}

impl From<Budget> for String {
    fn from(budget: Budget) -> Self {
        "$".repeat(budget.0 as usize)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.0 {
            write!(f, "$")?;
        }
        Ok(())
    }
}

/// Sparse bag of dinner preferences. Every field is optional so a profile can
/// accumulate preferences over several calls; merging is shallow per-field
/// overwrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisines: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Budget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibe: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avoid: Option<Vec<String>>,
}

impl Preferences {
    /// Overlay every present field of `incoming` onto `self`. Full replace per
    /// field, never a union.
    pub fn merge_from(&mut self, incoming: &Preferences) {
        if incoming.cuisines.is_some() {
            self.cuisines = incoming.cuisines.clone();
        }
        if incoming.dietary.is_some() {
            self.dietary = incoming.dietary.clone();
        }
        if incoming.budget.is_some() {
            self.budget = incoming.budget;
        }
        if incoming.vibe.is_some() {
            self.vibe = incoming.vibe.clone();
        }
        if incoming.distance_km.is_some() {
            self.distance_km = incoming.distance_km;
        }
        if incoming.min_rating.is_some() {
            self.min_rating = incoming.min_rating;
        }
        if incoming.open_now.is_some() {
            self.open_now = incoming.open_now;
        }
        if incoming.group_size.is_some() {
            self.group_size = incoming.group_size;
        }
        if incoming.avoid.is_some() {
            self.avoid = incoming.avoid.clone();
        }
    }
}

/// Incoming search request shape: sparse preferences plus location, keywords
/// and a result limit. Merged with stored preferences and defaults to produce
/// a [`DinnerQuery`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FindQuery {
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(flatten)]
    pub prefs: Preferences,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// The effective, fully-defaulted query a search actually runs with. This is
/// what gets stored per-profile as `last_query` and echoed back as
/// `query_used`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DinnerQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cuisines: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dietary: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<Budget>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vibe: Vec<String>,
    pub distance_km: f64,
    pub min_rating: f64,
    pub open_now: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_size: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub avoid: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    pub limit: u32,
}

/// Normalized business record, the canonical shape for filtering, scoring and
/// responses. `snippet` starts out `None` and is only populated for the top
/// few ranked results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub rating: f64,
    pub review_count: u32,
    pub price: Option<Budget>,
    pub categories: Vec<String>,
    pub url: String,
    pub address: String,
    pub distance_km: f64,
    pub phone: Option<String>,
    pub snippet: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_parse() {
        assert_eq!(Budget::parse("$$"), Budget::new(2));
        assert_eq!(Budget::parse("$$$$"), Budget::new(4));
        assert_eq!(Budget::parse(""), None);
        assert_eq!(Budget::parse("$$$$$"), None);
        assert_eq!(Budget::parse("cheap"), None);
    }

    #[test]
    fn test_budget_cheaper_clamps_at_one() {
        let budget = Budget::new(2).unwrap();
        assert_eq!(budget.cheaper(), Budget::CHEAPEST);
        assert_eq!(Budget::CHEAPEST.cheaper(), Budget::CHEAPEST);
    }

    #[test]
    fn test_budget_serde_roundtrip() {
        let json = serde_json::to_string(&Budget::new(3).unwrap()).unwrap();
        assert_eq!(json, "\"$$$\"");
        let parsed: Budget = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.symbols(), 3);
        assert!(serde_json::from_str::<Budget>("\"fancy\"").is_err());
    }

    #[test]
    fn test_location_resolve_prefers_coords() {
        let location = Location {
            latitude: Some(43.46),
            longitude: Some(-80.52),
            address: Some("Waterloo, ON".to_string()),
        };
        assert_eq!(
            location.resolve(),
            Some(ResolvedLocation::Coords {
                latitude: 43.46,
                longitude: -80.52
            })
        );
    }

    #[test]
    fn test_location_resolve_address_fallback() {
        let location = Location {
            latitude: Some(43.46),
            longitude: None,
            address: Some("Waterloo, ON".to_string()),
        };
        assert_eq!(
            location.resolve(),
            Some(ResolvedLocation::Address("Waterloo, ON".to_string()))
        );
    }

    #[test]
    fn test_location_resolve_empty() {
        assert_eq!(Location::default().resolve(), None);

        let blank_address = Location {
            latitude: None,
            longitude: None,
            address: Some("   ".to_string()),
        };
        assert_eq!(blank_address.resolve(), None);
    }

    #[test]
    fn test_preferences_merge_overwrites_fields() {
        let mut stored = Preferences {
            cuisines: Some(vec!["thai".to_string()]),
            distance_km: Some(5.0),
            ..Default::default()
        };
        let incoming = Preferences {
            distance_km: Some(2.0),
            min_rating: Some(4.5),
            ..Default::default()
        };

        stored.merge_from(&incoming);

        assert_eq!(stored.distance_km, Some(2.0));
        assert_eq!(stored.min_rating, Some(4.5));
        // Untouched fields survive the merge.
        assert_eq!(stored.cuisines, Some(vec!["thai".to_string()]));
    }

    #[test]
    fn test_find_query_flattened_shape() {
        let query: FindQuery = serde_json::from_str(
            r#"{
                "location": {"address": "Waterloo, ON"},
                "cuisines": ["ramen"],
                "budget": "$$",
                "limit": 5
            }"#,
        )
        .unwrap();

        assert_eq!(query.prefs.cuisines, Some(vec!["ramen".to_string()]));
        assert_eq!(query.prefs.budget, Budget::new(2));
        assert_eq!(query.limit, Some(5));
        assert!(query.location.unwrap().resolve().is_some());
    }
}
