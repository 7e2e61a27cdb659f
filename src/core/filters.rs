use crate::models::Restaurant;

/// Lowercased haystack of a business name plus its category titles. Both
/// exclusion filtering and keyword scoring match against this text, so the
/// semantics are identical for freshly-fetched and cached records.
pub fn search_text(name: &str, categories: &[String]) -> String {
    let mut haystack = String::from(name);
    for category in categories {
        haystack.push(' ');
        haystack.push_str(category);
    }
    haystack.to_lowercase()
}

/// Exclusion predicate: a restaurant passes unless any avoid term appears as
/// a case-insensitive substring of its name/category text.
#[inline]
pub fn passes_avoid(restaurant: &Restaurant, avoid: &[String]) -> bool {
    if avoid.is_empty() {
        return true;
    }
    let haystack = search_text(&restaurant.name, &restaurant.categories);
    !avoid
        .iter()
        .any(|term| haystack.contains(&term.to_lowercase()))
}

/// Rating threshold predicate, boundary-inclusive: a rating exactly equal to
/// the minimum is kept.
#[inline]
pub fn meets_min_rating(restaurant: &Restaurant, min_rating: f64) -> bool {
    restaurant.rating >= min_rating
}
