use crate::models::{DinnerQuery, FindQuery, Preferences};

pub const DEFAULT_DISTANCE_KM: f64 = 3.0;
pub const DEFAULT_MIN_RATING: f64 = 4.0;
pub const DEFAULT_LIMIT: u32 = 12;
pub const MAX_LIMIT: u32 = 50;

/// Layer stored preferences under an incoming query and apply defaults.
///
/// Rule: start from the stored preferences, overlay every present field of
/// the incoming query (full replace per field, not union), then default any
/// still-missing field among distance_km, min_rating, open_now and limit.
/// Location is never defaulted; its absence surfaces as a validation error at
/// fetch time.
pub fn merge(stored: &Preferences, incoming: &FindQuery) -> DinnerQuery {
    let mut prefs = stored.clone();
    prefs.merge_from(&incoming.prefs);

    DinnerQuery {
        location: incoming.location.clone(),
        cuisines: prefs.cuisines.unwrap_or_default(),
        dietary: prefs.dietary.unwrap_or_default(),
        budget: prefs.budget,
        vibe: prefs.vibe.unwrap_or_default(),
        distance_km: prefs.distance_km.unwrap_or(DEFAULT_DISTANCE_KM),
        min_rating: prefs.min_rating.unwrap_or(DEFAULT_MIN_RATING),
        open_now: prefs.open_now.unwrap_or(true),
        group_size: prefs.group_size,
        avoid: prefs.avoid.unwrap_or_default(),
        keywords: incoming.keywords.clone().unwrap_or_default(),
        limit: incoming.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Location};

    fn address_query() -> FindQuery {
        FindQuery {
            location: Some(Location {
                latitude: None,
                longitude: None,
                address: Some("Waterloo, ON".to_string()),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_applied_when_nothing_stored() {
        let merged = merge(&Preferences::default(), &address_query());

        assert_eq!(merged.distance_km, 3.0);
        assert_eq!(merged.min_rating, 4.0);
        assert!(merged.open_now);
        assert_eq!(merged.limit, 12);
        assert!(merged.cuisines.is_empty());
        assert!(merged.budget.is_none());
    }

    #[test]
    fn test_incoming_overrides_stored() {
        let stored = Preferences {
            distance_km: Some(5.0),
            ..Default::default()
        };
        let mut incoming = address_query();
        incoming.prefs.distance_km = Some(2.0);

        let merged = merge(&stored, &incoming);
        assert_eq!(merged.distance_km, 2.0);
    }

    #[test]
    fn test_stored_prefs_fill_gaps() {
        let stored = Preferences {
            cuisines: Some(vec!["thai".to_string()]),
            budget: Budget::new(2),
            avoid: Some(vec!["banana".to_string()]),
            ..Default::default()
        };

        let merged = merge(&stored, &address_query());

        assert_eq!(merged.cuisines, vec!["thai"]);
        assert_eq!(merged.budget, Budget::new(2));
        assert_eq!(merged.avoid, vec!["banana"]);
    }

    #[test]
    fn test_incoming_replaces_not_unions() {
        let stored = Preferences {
            vibe: Some(vec!["casual".to_string()]),
            ..Default::default()
        };
        let mut incoming = address_query();
        incoming.prefs.vibe = Some(vec!["romantic".to_string()]);

        let merged = merge(&stored, &incoming);
        assert_eq!(merged.vibe, vec!["romantic"]);
    }

    #[test]
    fn test_limit_capped_at_fifty() {
        let mut incoming = address_query();
        incoming.limit = Some(200);

        let merged = merge(&Preferences::default(), &incoming);
        assert_eq!(merged.limit, 50);
    }
}
