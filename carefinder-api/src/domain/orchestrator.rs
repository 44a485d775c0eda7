//! Top-level search composition: classify the query, run the right branches
//! against the cache and local database, then rank.

use std::collections::BTreeSet;
use std::sync::Arc;

use itertools::Itertools;
use serde::Deserialize;

use super::classifier::{classify, QueryIntent};
use super::ranking::{
    insurance_matches, rank_clinics, score_local_clinic, score_scraped_clinic, MAX_RESULTS,
};
use super::symptoms::{SymptomAnalysis, SymptomAnalyzer};
use super::{KnowledgeBase, LocalDatabase, ProviderCache, ProviderRecord, ProviderType, SourceKey};

/// Explicit search scope from the request; `all` lets the classifier decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    #[default]
    All,
    Clinics,
    Insurance,
    Symptoms,
}

#[derive(Debug, Default)]
pub struct SearchOutcome {
    pub clinics: Vec<ProviderRecord>,
    pub insurance: Vec<ProviderRecord>,
    pub medical_advice: Option<SymptomAnalysis>,
}

pub struct SearchOrchestrator {
    cache: ProviderCache,
    knowledge: Arc<KnowledgeBase>,
    analyzer: SymptomAnalyzer,
    local: Arc<LocalDatabase>,
}

impl SearchOrchestrator {
    pub fn new(
        cache: ProviderCache,
        knowledge: Arc<KnowledgeBase>,
        local: Arc<LocalDatabase>,
    ) -> Self {
        let analyzer = SymptomAnalyzer::new(Arc::clone(&knowledge));
        Self {
            cache,
            knowledge,
            analyzer,
            local,
        }
    }

    pub async fn search(
        &self,
        query: &str,
        scope: SearchScope,
        location: Option<&str>,
    ) -> SearchOutcome {
        let mut outcome = SearchOutcome::default();

        match scope {
            SearchScope::All => {
                let intent = classify(query, &self.knowledge);
                tracing::info!("Detected query intent: {} for query: '{}'", intent, query);

                match intent {
                    QueryIntent::Symptom => {
                        let advice = self.analyzer.analyze(query);
                        outcome.clinics =
                            self.search_clinics_by_specialty(query, &advice, location).await;
                        outcome.medical_advice = Some(advice);
                    }
                    QueryIntent::Insurance => {
                        outcome.insurance = self.search_insurance(query, location).await;
                    }
                    QueryIntent::Clinic => {
                        outcome.clinics = self.search_clinics(query, location).await;
                    }
                    QueryIntent::Mixed => {
                        outcome.clinics = self.search_clinics(query, location).await;
                        outcome.insurance = self.search_insurance(query, location).await;
                        let advice = self.analyzer.analyze(query);
                        if !advice.possible_conditions.is_empty() {
                            outcome.medical_advice = Some(advice);
                        }
                    }
                }
            }
            SearchScope::Clinics => {
                outcome.clinics = self.search_clinics(query, location).await;
            }
            SearchScope::Insurance => {
                outcome.insurance = self.search_insurance(query, location).await;
            }
            SearchScope::Symptoms => {
                outcome.medical_advice = Some(self.analyzer.analyze(query));
            }
        }

        outcome.clinics = rank_clinics(outcome.clinics);
        outcome.insurance.truncate(MAX_RESULTS);
        outcome
    }

    /// Scraped healthcare candidates: the cached entry for the location, or
    /// everything cached when no location was given.
    async fn clinic_candidates(&self, location: Option<&str>) -> Vec<ProviderRecord> {
        match location {
            Some(location) => {
                let key = SourceKey::new(ProviderType::Healthcare, location);
                self.cache.get(&key).await
            }
            None => self.cache.aggregate(ProviderType::Healthcare).await,
        }
    }

    async fn search_clinics(&self, query: &str, location: Option<&str>) -> Vec<ProviderRecord> {
        let q = query.to_lowercase();
        let mut matches = Vec::new();

        for mut record in self.clinic_candidates(location).await {
            let score = score_scraped_clinic(&q, &record);
            if score > 0.0 {
                record.relevance_score = Some(score);
                matches.push(record);
            }
        }

        for clinic in self.local.clinics() {
            if let Some(location) = location {
                if !clinic
                    .address
                    .to_lowercase()
                    .contains(&location.to_lowercase())
                {
                    continue;
                }
            }

            let score = score_local_clinic(&q, clinic);
            if score > 0.0 {
                let mut record = clinic.clone();
                record.relevance_score = Some(score);
                matches.push(record);
            }
        }

        dedup_by_name(matches)
    }

    /// Clinics filtered by the specialties a symptom analysis points at, with
    /// general practitioners as the fallback when nothing matches.
    async fn search_clinics_by_specialty(
        &self,
        query: &str,
        analysis: &SymptomAnalysis,
        location: Option<&str>,
    ) -> Vec<ProviderRecord> {
        let suggested = self.suggested_specialties(query, analysis);

        let mut candidates = self.clinic_candidates(location).await;
        candidates.extend(self.local.clinics().iter().cloned());

        let mut matches = Vec::new();
        if !suggested.is_empty() {
            for clinic in &candidates {
                let hit = clinic.specialties.iter().any(|specialty| {
                    let specialty = specialty.to_lowercase();
                    suggested
                        .iter()
                        .any(|wanted| specialty.contains(&wanted.to_lowercase()))
                });
                if hit {
                    let mut record = clinic.clone();
                    record.relevance_score = Some(8.0);
                    matches.push(record);
                }
            }
        }

        if matches.is_empty() {
            for clinic in &candidates {
                if clinic
                    .specialties
                    .iter()
                    .any(|s| s.to_lowercase().contains("general"))
                {
                    let mut record = clinic.clone();
                    record.relevance_score = Some(5.0);
                    matches.push(record);
                }
            }
        }

        dedup_by_name(matches)
    }

    fn suggested_specialties(&self, query: &str, analysis: &SymptomAnalysis) -> BTreeSet<String> {
        let mut suggested = BTreeSet::new();

        for condition in &analysis.possible_conditions {
            let condition = condition.to_lowercase();
            let has = |terms: &[&str]| terms.iter().any(|t| condition.contains(t));

            if has(&["heart", "cardiac", "angina"]) {
                suggested.insert("Cardiology".to_string());
            } else if has(&["skin", "rash", "eczema", "psoriasis"]) {
                suggested.insert("Dermatology".to_string());
            } else if has(&["mental", "depression", "anxiety", "stress"]) {
                suggested.insert("Psychiatry".to_string());
            } else if has(&["child", "pediatric"]) {
                suggested.insert("Pediatrics".to_string());
            } else {
                suggested.insert("General Practice".to_string());
            }
        }

        let q = query.to_lowercase();
        for (keyword, specialty) in self.knowledge.specialty_keywords() {
            if q.contains(keyword) {
                suggested.insert((*specialty).to_string());
            }
        }

        suggested
    }

    async fn search_insurance(&self, query: &str, location: Option<&str>) -> Vec<ProviderRecord> {
        let q = query.to_lowercase();

        let scraped = match location {
            Some(location) => {
                let key = SourceKey::new(ProviderType::Insurance, location);
                self.cache.get(&key).await
            }
            None => self.cache.aggregate(ProviderType::Insurance).await,
        };

        let mut matches: Vec<ProviderRecord> = scraped
            .into_iter()
            .filter(|record| insurance_matches(&q, record))
            .collect();

        for insurer in self.local.insurers() {
            if insurance_matches(&q, insurer) {
                matches.push(insurer.clone());
            }
        }

        dedup_by_name(matches)
    }
}

/// First occurrence wins, so scraped records take precedence over local
/// duplicates.
fn dedup_by_name(records: Vec<ProviderRecord>) -> Vec<ProviderRecord> {
    records
        .into_iter()
        .unique_by(|record| record.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::source::MockDataSource;
    use std::time::Duration;

    fn orchestrator_with(source: Arc<MockDataSource>) -> SearchOrchestrator {
        let cache = ProviderCache::new(source, Duration::from_secs(7200), 4);
        SearchOrchestrator::new(
            cache,
            Arc::new(KnowledgeBase::new()),
            Arc::new(LocalDatabase::new()),
        )
    }

    fn orchestrator() -> SearchOrchestrator {
        orchestrator_with(Arc::new(MockDataSource::returning(Vec::new())))
    }

    #[tokio::test]
    async fn explicit_clinic_scope_runs_only_that_branch() {
        let outcome = orchestrator()
            .search("healthcare", SearchScope::Clinics, Some("Miami"))
            .await;

        assert!(outcome.clinics.iter().any(|c| c.name == "HealthCare Plus"));
        assert!(outcome.insurance.is_empty());
        assert!(outcome.medical_advice.is_none());
    }

    #[tokio::test]
    async fn insurance_intent_searches_insurers_only() {
        let outcome = orchestrator()
            .search("Aetna", SearchScope::All, None)
            .await;

        assert!(outcome.clinics.is_empty());
        assert!(outcome
            .insurance
            .iter()
            .any(|i| i.name == "Aetna Better Health of Florida"));
        assert!(outcome.medical_advice.is_none());
    }

    #[tokio::test]
    async fn long_insurance_queries_can_match_nothing() {
        let outcome = orchestrator()
            .search("what insurance plans cover Aetna", SearchScope::All, None)
            .await;

        // Matching is a whole-query substring test, so a sentence-length
        // query matches no insurer name.
        assert!(outcome.insurance.is_empty());
        assert!(outcome.medical_advice.is_none());
    }

    #[tokio::test]
    async fn symptom_intent_attaches_advice_and_specialty_clinics() {
        let outcome = orchestrator()
            .search("I have a rash and itching", SearchScope::All, None)
            .await;

        let advice = outcome.medical_advice.expect("advice missing");
        assert!(advice.matched_symptoms.contains(&"rash".to_string()));

        assert!(outcome
            .clinics
            .iter()
            .any(|c| c.name == "Coral Gables Dermatology Center"));
        assert!(outcome
            .clinics
            .iter()
            .all(|c| c.relevance_score == Some(8.0)));
    }

    #[tokio::test]
    async fn mixed_intent_omits_advice_without_conditions() {
        let outcome = orchestrator()
            .search("best options downtown", SearchScope::All, None)
            .await;

        assert!(outcome.medical_advice.is_none());
    }

    #[tokio::test]
    async fn scraped_records_outrank_and_dedup_local_ones() {
        let mut scraped = MockDataSource::sample_records(1);
        scraped[0].name = "HealthCare Plus".to_string();
        let source = Arc::new(MockDataSource::returning(scraped));
        let orchestrator = orchestrator_with(Arc::clone(&source));

        // Warm the cache first; `get` alone never waits for the refresh.
        let key = SourceKey::new(ProviderType::Healthcare, "miami");
        orchestrator.cache.get_blocking(&key).await;

        let outcome = orchestrator
            .search("HealthCare Plus", SearchScope::Clinics, Some("Miami"))
            .await;

        let hits: Vec<_> = outcome
            .clinics
            .iter()
            .filter(|c| c.name == "HealthCare Plus")
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(
            hits[0].source,
            crate::domain::RecordSource::Scraped("Mock Directory".to_string())
        );
    }

    #[tokio::test]
    async fn results_are_ranked_and_truncated() {
        let mut scraped = MockDataSource::sample_records(15);
        for record in &mut scraped {
            record.name = format!("Miami {}", record.name);
        }
        let source = Arc::new(MockDataSource::returning(scraped));
        let orchestrator = orchestrator_with(source);

        let key = SourceKey::new(ProviderType::Healthcare, "miami");
        orchestrator.cache.get_blocking(&key).await;

        let outcome = orchestrator
            .search("miami", SearchScope::Clinics, Some("Miami"))
            .await;

        assert_eq!(outcome.clinics.len(), MAX_RESULTS);
        // Closest listings first: equal relevance and rating leave distance
        // to decide.
        assert!(outcome.clinics[0].distance < outcome.clinics[1].distance);
    }
}
