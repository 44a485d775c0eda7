//! Rule-based symptom analysis: synonym normalization, knowledge-base
//! matching, confidence scoring, and urgency-driven recommendations.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use serde::Serialize;
use strum::Display;

use super::KnowledgeBase;

pub const DISCLAIMER: &str = "This is not a medical diagnosis. \
    Please consult with a healthcare professional for proper medical advice.";

#[rustfmt::skip]
const SEVERITY_KEYWORDS: &[&str] = &[
    "severe", "intense", "unbearable", "extreme", "terrible", "sharp",
    "chronic", "constant", "persistent", "recurring",
];

#[rustfmt::skip]
const EMERGENCY_KEYWORDS: &[&str] = &[
    "chest pain", "cant breathe", "can't breathe", "severe bleeding",
    "unconscious", "seizure", "stroke", "heart attack", "suicide",
    "overdose", "severe pain",
];

const URGENT_KEYWORDS: &[&str] = &["fever", "vomiting", "severe headache", "confusion", "dizziness"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Urgency {
    Routine,
    Moderate,
    Urgent,
    Emergency,
}

#[derive(Debug, Clone, Serialize)]
pub struct SymptomAnalysis {
    pub possible_conditions: Vec<String>,
    pub matched_symptoms: Vec<String>,
    pub confidence_score: f64,
    pub urgency: Urgency,
    pub recommendation: String,
    pub disclaimer: &'static str,
}

#[derive(Clone)]
pub struct SymptomAnalyzer {
    knowledge: Arc<KnowledgeBase>,
}

impl SymptomAnalyzer {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }

    /// Lower-case the query and rewrite synonym phrases to their canonical
    /// forms. Idempotent: canonical phrases are never synonym keys.
    pub fn normalize(&self, query: &str) -> String {
        self.knowledge.apply_synonyms(&query.to_lowercase())
    }

    pub fn analyze(&self, query: &str) -> SymptomAnalysis {
        let raw = query.to_lowercase();
        let normalized = self.knowledge.apply_synonyms(&raw);
        let words: HashSet<&str> = tokenize(&normalized).collect();

        let mut conditions: BTreeSet<&'static str> = BTreeSet::new();
        let mut matched: Vec<String> = Vec::new();

        // Multi-word symptom keys match as substrings of the normalized text,
        // before any single-word key is considered.
        for (key, key_conditions) in self.knowledge.symptom_entries() {
            if key.contains(' ') && normalized.contains(key) {
                conditions.extend(key_conditions);
                matched.push(key.to_string());
            }
        }
        for (key, key_conditions) in self.knowledge.symptom_entries() {
            if !key.contains(' ') && words.contains(key) {
                conditions.extend(key_conditions);
                matched.push(key.to_string());
            }
        }

        let confidence = confidence_score(matched.len(), conditions.len(), &normalized);
        // Urgency reads the raw query: phrasings like "can't breathe" must be
        // seen before synonym rewriting erases them.
        let urgency = assess_urgency(&raw, matched.len());
        let recommendation = recommendation(urgency, &conditions);

        SymptomAnalysis {
            possible_conditions: conditions.into_iter().map(str::to_string).collect(),
            matched_symptoms: matched,
            confidence_score: confidence,
            urgency,
            recommendation,
            disclaimer: DISCLAIMER,
        }
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}

fn confidence_score(matched_symptoms: usize, condition_count: usize, normalized: &str) -> f64 {
    let symptom_boost = matched_symptoms.min(5) as f64 * 0.12;
    let condition_boost = condition_count.min(4) as f64 * 0.08;
    let severity_boost = if SEVERITY_KEYWORDS.iter().any(|kw| normalized.contains(kw)) {
        0.1
    } else {
        0.0
    };

    let confidence = (0.3 + symptom_boost + condition_boost + severity_boost).min(0.95);
    (confidence * 100.0).round() / 100.0
}

fn assess_urgency(raw_query: &str, matched_symptoms: usize) -> Urgency {
    if EMERGENCY_KEYWORDS.iter().any(|kw| raw_query.contains(kw)) {
        return Urgency::Emergency;
    }

    let urgent_count = URGENT_KEYWORDS.iter().filter(|kw| raw_query.contains(*kw)).count();
    if urgent_count >= 2 {
        return Urgency::Urgent;
    }

    if matched_symptoms > 4 {
        return Urgency::Moderate;
    }

    Urgency::Routine
}

fn recommendation(urgency: Urgency, conditions: &BTreeSet<&'static str>) -> String {
    match urgency {
        Urgency::Emergency => {
            return "URGENT: Based on your symptoms, seek immediate medical attention. \
                Call 911 or go to the nearest emergency room."
                .to_string();
        }
        Urgency::Urgent => {
            return "These symptoms may require prompt medical attention. Consider visiting \
                an urgent care center or scheduling a same-day appointment with your \
                healthcare provider."
                .to_string();
        }
        Urgency::Moderate | Urgency::Routine => {}
    }

    match conditions.len() {
        n if n > 3 => "Multiple conditions may be associated with your symptoms. It's \
            recommended to schedule an appointment with your healthcare provider for proper \
            diagnosis and treatment."
            .to_string(),
        2..=3 => {
            let mut text = "Your symptoms may indicate several possible conditions. Consider \
                scheduling an appointment with your healthcare provider for evaluation."
                .to_string();

            if let Some(specialties) = suggested_specialty_text(conditions) {
                text.push(' ');
                text.push_str(&specialties);
            }
            text
        }
        _ => "Monitor your symptoms over the next 24-48 hours. If they persist, worsen, or \
            new symptoms develop, consult a healthcare provider."
            .to_string(),
    }
}

fn suggested_specialty_text(conditions: &BTreeSet<&'static str>) -> Option<String> {
    let lowered: Vec<String> = conditions.iter().map(|c| c.to_lowercase()).collect();
    let any = |terms: &[&str]| {
        lowered
            .iter()
            .any(|c| terms.iter().any(|term| c.contains(term)))
    };

    let mut specialties = Vec::new();
    if any(&["heart", "cardiac"]) {
        specialties.push("cardiology");
    }
    if any(&["skin", "rash"]) {
        specialties.push("dermatology");
    }
    if any(&["mental", "anxiety", "depression"]) {
        specialties.push("psychiatry or mental health");
    }

    if specialties.is_empty() {
        None
    } else {
        Some(format!(
            "You may want to consult with a specialist in {}.",
            specialties.join(" or ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> SymptomAnalyzer {
        SymptomAnalyzer::new(Arc::new(KnowledgeBase::new()))
    }

    #[test]
    fn normalize_is_idempotent() {
        let analyzer = analyzer();
        let once = analyzer.normalize("I cant breathe and my back hurts");
        let twice = analyzer.normalize(&once);

        assert_eq!(once, twice);
        assert_eq!(once, "i shortness breath and my back pain");
    }

    #[test]
    fn normalize_leaves_clean_queries_untouched() {
        let analyzer = analyzer();
        let clean = "fever and chills";

        assert_eq!(analyzer.normalize(clean), clean);
        assert_eq!(analyzer.normalize(&analyzer.normalize(clean)), clean);
    }

    #[test]
    fn severe_headache_and_fever_is_urgent() {
        let analysis = analyzer().analyze("I have a severe headache and fever");

        assert!(analysis.matched_symptoms.contains(&"headache".to_string()));
        assert!(analysis.matched_symptoms.contains(&"fever".to_string()));
        assert_eq!(analysis.urgency, Urgency::Urgent);
        assert!(analysis.confidence_score <= 0.95);
        // 0.3 base + 2 symptoms + capped conditions + severity caps out.
        assert_eq!(analysis.confidence_score, 0.95);
    }

    #[test]
    fn confidence_follows_the_formula() {
        // "wheezing" alone: one symptom, three conditions, no severity words.
        let analysis = analyzer().analyze("wheezing");

        assert_eq!(analysis.matched_symptoms, vec!["wheezing"]);
        assert_eq!(analysis.possible_conditions.len(), 3);
        assert_eq!(analysis.confidence_score, 0.66);
        assert_eq!(analysis.urgency, Urgency::Routine);
    }

    #[test]
    fn multi_word_symptoms_match_before_single_words() {
        let analysis = analyzer().analyze("crushing chest pain");

        assert_eq!(analysis.matched_symptoms[0], "chest pain");
        assert!(analysis.matched_symptoms.contains(&"chest".to_string()));
    }

    #[test]
    fn emergency_keywords_override_everything() {
        let analysis = analyzer().analyze("I think I'm having a heart attack");

        assert_eq!(analysis.urgency, Urgency::Emergency);
        assert!(analysis.recommendation.contains("911"));
    }

    #[test]
    fn cant_breathe_is_an_emergency_despite_normalization() {
        let analysis = analyzer().analyze("help I can't breathe");

        assert_eq!(analysis.urgency, Urgency::Emergency);
    }

    #[test]
    fn five_matched_symptoms_raise_moderate_urgency() {
        let analysis =
            analyzer().analyze("cough congestion fatigue nausea rash all week");

        assert!(analysis.matched_symptoms.len() > 4);
        assert_eq!(analysis.urgency, Urgency::Moderate);
    }

    #[test]
    fn no_matches_recommends_self_monitoring() {
        let analysis = analyzer().analyze("just checking in");

        assert!(analysis.possible_conditions.is_empty());
        assert_eq!(analysis.urgency, Urgency::Routine);
        assert!(analysis.recommendation.contains("24-48 hours"));
        assert_eq!(analysis.disclaimer, DISCLAIMER);
    }

    #[test]
    fn conditions_are_a_sorted_union() {
        let analysis = analyzer().analyze("fever and chills");

        let mut sorted = analysis.possible_conditions.clone();
        sorted.sort();
        assert_eq!(analysis.possible_conditions, sorted);
        // Flu appears for both symptoms but only once in the union.
        assert_eq!(
            analysis
                .possible_conditions
                .iter()
                .filter(|c| *c == "Flu")
                .count(),
            1
        );
    }
}
