//! Relevance scoring and ordering for search candidates.

use super::ProviderRecord;

pub const MAX_RESULTS: usize = 10;

/// Records without a distance sink below anything that has one.
const MISSING_DISTANCE: f64 = 999.0;

/// Score a scraped clinic against the query. A full query match in the name
/// or address is terminal; otherwise meaningful query words (longer than
/// three characters) accumulate partial credit.
pub fn score_scraped_clinic(query_lower: &str, record: &ProviderRecord) -> f64 {
    let name = record.name.to_lowercase();
    let address = record.address.to_lowercase();

    if name.contains(query_lower) {
        return 10.0;
    }
    if address.contains(query_lower) {
        return 5.0;
    }

    let mut score = 0.0;
    for word in query_lower.split_whitespace().filter(|w| w.len() > 3) {
        if name.contains(word) {
            score += 3.0;
        }
        if address.contains(word) {
            score += 1.0;
        }
    }
    score
}

/// Score a local-database clinic: name match plus specialty and
/// accepted-insurance bonuses.
pub fn score_local_clinic(query_lower: &str, record: &ProviderRecord) -> f64 {
    let mut score = 0.0;

    if record.name.to_lowercase().contains(query_lower) {
        score += 10.0;
    }
    if record
        .specialties
        .iter()
        .any(|s| s.to_lowercase().contains(query_lower))
    {
        score += 8.0;
    }
    if record
        .accepted_insurance
        .iter()
        .any(|i| i.to_lowercase().contains(query_lower))
    {
        score += 3.0;
    }

    score
}

/// Insurance matching is a plain substring test, no numeric score. Local
/// records additionally match on their coverage types.
pub fn insurance_matches(query_lower: &str, record: &ProviderRecord) -> bool {
    if query_lower.is_empty() {
        return true;
    }

    if record.name.to_lowercase().contains(query_lower) {
        return true;
    }
    if record
        .description
        .as_deref()
        .is_some_and(|d| d.to_lowercase().contains(query_lower))
    {
        return true;
    }
    record
        .coverage_types
        .iter()
        .any(|c| c.to_lowercase().contains(query_lower))
}

/// Weighted combination: relevance 40%, rating 40%, distance penalty 2% per
/// mile. Missing rating counts as zero.
pub fn combined_score(record: &ProviderRecord) -> f64 {
    let relevance = record.relevance_score.unwrap_or(0.0);
    let rating = record.rating.unwrap_or(0.0);
    let distance = record.distance.unwrap_or(MISSING_DISTANCE);

    relevance * 0.4 + rating * 0.4 - distance * 0.02
}

/// Order candidates by combined score, descending. The sort is stable, so
/// candidates with equal scores keep their original relative order. Output is
/// truncated to the top [`MAX_RESULTS`].
pub fn rank_clinics(mut records: Vec<ProviderRecord>) -> Vec<ProviderRecord> {
    records.sort_by(|a, b| combined_score(b).total_cmp(&combined_score(a)));
    records.truncate(MAX_RESULTS);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecordSource;

    fn clinic(name: &str, address: &str) -> ProviderRecord {
        ProviderRecord::new(
            name,
            address,
            "(305) 555-1000",
            "https://example.com",
            RecordSource::Scraped("Google Maps".to_string()),
        )
    }

    fn ranked(relevance: f64, rating: Option<f64>, distance: Option<f64>) -> ProviderRecord {
        let mut record = clinic("Clinic", "Miami, FL");
        record.relevance_score = Some(relevance);
        record.rating = rating;
        record.distance = distance;
        record
    }

    #[test]
    fn full_name_match_is_terminal() {
        let record = clinic("Baptist Health Center", "1 Baptist Way, Miami, FL");

        // Name hit returns 10 without accumulating address credit.
        assert_eq!(score_scraped_clinic("baptist", &record), 10.0);
    }

    #[test]
    fn address_match_scores_five() {
        let record = clinic("Northside Clinic", "200 Kendall Drive, Miami, FL");

        assert_eq!(score_scraped_clinic("kendall", &record), 5.0);
    }

    #[test]
    fn partial_words_accumulate() {
        let record = clinic("Miami Heart Institute", "1 Heart Plaza, Hialeah, FL");

        // "heart" hits name (+3) and address (+1); "care" hits neither;
        // short words are ignored.
        assert_eq!(score_scraped_clinic("heart care in fl", &record), 4.0);
    }

    #[test]
    fn unrelated_record_scores_zero() {
        let record = clinic("Sunset Dental", "9 Sunset Blvd, Tampa, FL");

        assert_eq!(score_scraped_clinic("cardiology miami", &record), 0.0);
    }

    #[test]
    fn local_clinic_scores_specialty_and_insurance() {
        let mut record = clinic("HealthCare Plus", "123 Health Ave, Miami, FL");
        record.source = RecordSource::LocalDatabase;
        record.specialties = vec!["Pediatrics".to_string()];
        record.accepted_insurance = vec!["Aetna".to_string()];

        assert_eq!(score_local_clinic("pediatrics", &record), 8.0);
        assert_eq!(score_local_clinic("aetna", &record), 3.0);
        assert_eq!(score_local_clinic("healthcare", &record), 10.0);
    }

    #[test]
    fn insurance_match_is_a_substring_test() {
        let mut record = clinic("Florida Blue", "Miami, FL");
        record.description = Some("Health insurance provider serving Florida".to_string());
        record.coverage_types = vec!["Medicare".to_string()];

        assert!(insurance_matches("blue", &record));
        assert!(insurance_matches("serving florida", &record));
        assert!(insurance_matches("medicare", &record));
        assert!(!insurance_matches("dental", &record));
        assert!(insurance_matches("", &record));
    }

    #[test]
    fn combined_score_matches_formula_exactly() {
        let a = ranked(10.0, Some(5.0), Some(1.0));
        let b = ranked(10.0, Some(4.9), Some(0.0));
        let c = ranked(8.0, None, None);

        assert_eq!(combined_score(&a), 10.0 * 0.4 + 5.0 * 0.4 - 1.0 * 0.02);
        assert_eq!(combined_score(&b), 10.0 * 0.4 + 4.9 * 0.4);
        assert_eq!(combined_score(&c), 8.0 * 0.4 - 999.0 * 0.02);

        // a: 5.98, b: 5.96; the rating edge outweighs b's distance edge.
        let order = rank_clinics(vec![b.clone(), a.clone(), c.clone()]);
        assert_eq!(order[0], a);
        assert_eq!(order[1], b);
        assert_eq!(order[2], c);
    }

    #[test]
    fn equal_scores_preserve_original_order() {
        let mut first = ranked(5.0, Some(4.0), Some(2.0));
        first.name = "First".to_string();
        let mut second = ranked(5.0, Some(4.0), Some(2.0));
        second.name = "Second".to_string();

        let order = rank_clinics(vec![first, second]);
        assert_eq!(order[0].name, "First");
        assert_eq!(order[1].name, "Second");
    }

    #[test]
    fn missing_distance_sinks_to_the_bottom() {
        let near = ranked(0.0, Some(4.0), Some(1.0));
        let unknown = ranked(0.0, Some(4.0), None);

        let order = rank_clinics(vec![unknown.clone(), near.clone()]);
        assert_eq!(order[0], near);
    }

    #[test]
    fn results_truncate_to_ten() {
        let records: Vec<_> = (0..15)
            .map(|i| ranked(i as f64, Some(4.0), Some(1.0)))
            .collect();

        assert_eq!(rank_clinics(records).len(), MAX_RESULTS);
    }
}
