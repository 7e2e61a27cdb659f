use crate::models::RawLocation;

/// Convert a raw provider distance (meters) to kilometers, rounded to two
/// decimals. All stored and scored distances use this representation.
#[inline]
pub fn meters_to_km(meters: f64) -> f64 {
    (meters / 1000.0 * 100.0).round() / 100.0
}

#[inline]
pub fn km_to_meters(km: f64) -> f64 {
    km * 1000.0
}

/// Join address parts into a single display string, skipping absent parts.
/// Fixed order: address lines 1-3, city, state, postal code.
pub fn join_address(location: &RawLocation) -> String {
    let parts = [
        location.address1.as_deref(),
        location.address2.as_deref(),
        location.address3.as_deref(),
        location.city.as_deref(),
        location.state.as_deref(),
        location.zip_code.as_deref(),
    ];

    parts
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
