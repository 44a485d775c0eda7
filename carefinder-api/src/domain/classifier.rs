//! Query-intent classification: ordered rule evaluation over the lower-cased
//! query, first match wins.

use serde::Serialize;
use strum::Display;

use super::KnowledgeBase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum QueryIntent {
    Symptom,
    Insurance,
    Clinic,
    Mixed,
}

#[rustfmt::skip]
const INSURANCE_KEYWORDS: &[&str] = &[
    "insurance", "coverage", "plan", "premium", "policy", "aetna", "cigna",
    "blue cross", "humana", "medicare", "medicaid",
];

const SYMPTOM_PHRASES: &[&str] = &["i have", "i feel", "experiencing", "suffering from"];

#[rustfmt::skip]
const SYMPTOM_INDICATORS: &[&str] = &[
    "pain", "ache", "hurt", "feel", "symptoms", "sick", "ill", "fever",
    "cough", "nausea", "vomit", "dizzy", "tired", "fatigue", "rash",
    "swelling", "headache", "sore", "breathing", "chest",
];

#[rustfmt::skip]
const CLINIC_KEYWORDS: &[&str] = &[
    "doctor", "clinic", "hospital", "physician", "specialist", "dentist",
    "pediatrician", "dermatologist", "cardiologist",
];

/// Classify a free-text query. Rules are evaluated in order and short-circuit
/// at the first match:
///
/// 1. insurance keyword present → insurance
/// 2. first-person symptom phrase → symptom
/// 3. two or more distinct symptom-indicator words → symptom
/// 4. any token is a known symptom key → symptom
/// 5. clinic/provider keyword present → clinic
/// 6. otherwise → mixed
pub fn classify(query: &str, knowledge: &KnowledgeBase) -> QueryIntent {
    let q = query.to_lowercase();

    if INSURANCE_KEYWORDS.iter().any(|kw| q.contains(kw)) {
        return QueryIntent::Insurance;
    }

    if SYMPTOM_PHRASES.iter().any(|phrase| q.contains(phrase)) {
        return QueryIntent::Symptom;
    }

    let indicator_count = SYMPTOM_INDICATORS.iter().filter(|kw| q.contains(*kw)).count();
    if indicator_count >= 2 {
        return QueryIntent::Symptom;
    }

    if q.split_whitespace().any(|word| knowledge.is_symptom(word)) {
        return QueryIntent::Symptom;
    }

    if CLINIC_KEYWORDS.iter().any(|kw| q.contains(kw)) {
        return QueryIntent::Clinic;
    }

    QueryIntent::Mixed
}
