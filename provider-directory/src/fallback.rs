//! Deterministic substitute listings used when the directory is unreachable.
//!
//! The sets are stable across calls so that a failed refresh always commits
//! the same data for a given location.

use crate::RawListing;

const HEALTHCARE_NAMES: [&str; 10] = [
    "Memorial Healthcare System",
    "Baptist Health",
    "Cleveland Clinic Florida",
    "Mount Sinai Medical Center",
    "Aventura Hospital",
    "Jackson Health System",
    "Nicklaus Children's Hospital",
    "Holy Cross Health",
    "Broward Health",
    "Joe DiMaggio Children's Hospital",
];

const INSURANCE_COMPANIES: [(&str, &str); 10] = [
    ("Florida Blue", "1-800-352-2583"),
    ("Aetna", "1-800-872-3862"),
    ("UnitedHealthcare", "1-800-328-5979"),
    ("Cigna", "1-800-244-6224"),
    ("Humana", "1-800-448-6262"),
    ("Blue Cross Blue Shield", "1-800-262-2583"),
    ("Anthem", "1-800-331-1476"),
    ("Kaiser Permanente", "1-800-464-4000"),
    ("Molina Healthcare", "1-800-526-8196"),
    ("Ambetter", "1-877-687-1197"),
];

fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "")
}

/// Substitute healthcare listings for a location. Ratings and distances are
/// derived from the listing index so the output is reproducible.
pub fn fallback_healthcare_listings(location: &str) -> Vec<RawListing> {
    HEALTHCARE_NAMES
        .iter()
        .enumerate()
        .map(|(idx, name)| RawListing {
            name: (*name).to_string(),
            address: format!(
                "{} Medical Plaza, {}, FL 33{}",
                100 + idx * 10,
                location,
                130 + idx
            ),
            phone: format!("(305) 555-{}", 1000 + idx),
            website: format!("https://{}.com", slug(name)),
            rating: Some(3.6 + ((idx * 7) % 15) as f64 / 10.0),
            distance: Some(0.8 + idx as f64 * 1.9),
            description: None,
            coverage_types: Vec::new(),
            source: "fallback".to_string(),
        })
        .collect()
}

/// Substitute insurance listings for a location.
pub fn fallback_insurance_listings(location: &str) -> Vec<RawListing> {
    INSURANCE_COMPANIES
        .iter()
        .map(|(name, phone)| RawListing {
            name: (*name).to_string(),
            address: format!("{}, FL", location),
            phone: (*phone).to_string(),
            website: format!("https://{}.com", slug(name)),
            rating: None,
            distance: None,
            description: Some("Health insurance provider serving Florida".to_string()),
            coverage_types: Vec::new(),
            source: "fallback".to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthcare_fallback_is_deterministic() {
        let first = fallback_healthcare_listings("Miami");
        let second = fallback_healthcare_listings("Miami");

        assert_eq!(first, second);
        assert_eq!(first.len(), 10);
    }

    #[test]
    fn healthcare_fallback_ratings_stay_in_range() {
        for listing in fallback_healthcare_listings("Hialeah") {
            let rating = listing.rating.unwrap();
            assert!((3.5..=5.0).contains(&rating), "rating {rating} out of range");
        }
    }

    #[test]
    fn insurance_fallback_uses_location_in_address() {
        let listings = fallback_insurance_listings("Coral Gables");

        assert_eq!(listings.len(), 10);
        assert!(listings.iter().all(|l| l.address == "Coral Gables, FL"));
        assert_eq!(listings[0].name, "Florida Blue");
        assert_eq!(listings[0].phone, "1-800-352-2583");
    }
}
