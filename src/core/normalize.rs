use crate::core::units::{join_address, meters_to_km};
use crate::models::{Budget, RawBusiness, RawCategory, Restaurant};

/// Extract category display titles from a raw record.
pub fn category_titles(categories: &[RawCategory]) -> Vec<String> {
    categories.iter().map(|c| c.title.clone()).collect()
}

/// Map a raw provider record into the canonical [`Restaurant`] shape.
///
/// The snippet is always initialized `None`; it is populated later, for a
/// capped prefix of the ranked list, by the review-fetch collaborator.
pub fn to_restaurant(business: &RawBusiness) -> Restaurant {
    Restaurant {
        id: business.id.clone(),
        name: business.name.clone(),
        rating: business.rating,
        review_count: business.review_count,
        price: business.price.as_deref().and_then(Budget::parse),
        categories: category_titles(&business.categories),
        url: business.url.clone(),
        address: join_address(&business.location),
        distance_km: meters_to_km(business.distance),
        phone: business.display_phone.clone(),
        snippet: None,
    }
}
