//! Static medical lookup tables: symptom → conditions, phrase synonyms, and
//! specialty keywords. Built once at startup and shared immutably.

use std::collections::HashSet;

use regex::Regex;

type Conditions = &'static [&'static str];

#[rustfmt::skip]
const SYMPTOM_CONDITIONS: &[(&str, Conditions)] = &[
    // Respiratory
    ("cough", &["Common Cold", "Flu", "COVID-19", "Bronchitis", "Pneumonia", "Asthma"]),
    ("shortness", &["Asthma", "Pneumonia", "Heart Disease", "COVID-19", "Anxiety"]),
    ("breath", &["Asthma", "Pneumonia", "Heart Disease", "COVID-19", "Anxiety"]),
    ("breathing", &["Asthma", "Pneumonia", "Heart Disease", "COVID-19", "Anxiety"]),
    ("wheezing", &["Asthma", "Bronchitis", "Allergies"]),
    ("congestion", &["Common Cold", "Sinusitis", "Allergies", "Flu"]),
    ("sore throat", &["Strep Throat", "Common Cold", "Flu", "Tonsillitis"]),
    ("throat", &["Strep Throat", "Common Cold", "Flu", "Tonsillitis"]),
    // Pain
    ("headache", &["Migraine", "Tension Headache", "Sinusitis", "Hypertension", "Stress"]),
    ("chest pain", &["Heart Attack", "Angina", "Anxiety", "Costochondritis", "Pneumonia"]),
    ("chest", &["Heart Attack", "Angina", "Anxiety", "Costochondritis", "Pneumonia"]),
    ("abdominal", &["Gastroenteritis", "Appendicitis", "Food Poisoning", "IBS"]),
    ("stomach", &["Gastroenteritis", "Ulcer", "Food Poisoning", "IBS", "Gastritis"]),
    ("back", &["Muscle Strain", "Herniated Disc", "Kidney Stones", "Arthritis"]),
    ("joint", &["Arthritis", "Gout", "Lupus", "Injury"]),
    // Fever and infection
    ("fever", &["Flu", "COVID-19", "Common Cold", "Pneumonia", "Infection"]),
    ("chills", &["Flu", "COVID-19", "Infection", "Pneumonia"]),
    ("sweating", &["Flu", "Infection", "Menopause", "Hypoglycemia"]),
    ("fatigue", &["Anemia", "Depression", "Chronic Fatigue Syndrome", "Diabetes", "Hypothyroidism"]),
    ("tired", &["Anemia", "Depression", "Chronic Fatigue Syndrome", "Diabetes", "Hypothyroidism"]),
    // Digestive
    ("nausea", &["Gastroenteritis", "Food Poisoning", "Pregnancy", "Migraine", "Anxiety"]),
    ("vomiting", &["Gastroenteritis", "Food Poisoning", "Migraine", "Appendicitis"]),
    ("diarrhea", &["Gastroenteritis", "Food Poisoning", "IBS", "Crohn's Disease"]),
    ("constipation", &["IBS", "Hypothyroidism", "Dehydration"]),
    // Neurological
    ("dizziness", &["Vertigo", "Low Blood Pressure", "Dehydration", "Anemia", "Inner Ear Infection"]),
    ("dizzy", &["Vertigo", "Low Blood Pressure", "Dehydration", "Anemia", "Inner Ear Infection"]),
    ("confusion", &["Dehydration", "Hypoglycemia", "Stroke", "Dementia", "Infection"]),
    ("numbness", &["Neuropathy", "Stroke", "Multiple Sclerosis", "Pinched Nerve"]),
    ("tingling", &["Neuropathy", "Pinched Nerve", "Multiple Sclerosis", "Anxiety"]),
    // Skin
    ("rash", &["Allergies", "Eczema", "Psoriasis", "Dermatitis", "Infection"]),
    ("itching", &["Allergies", "Eczema", "Dry Skin", "Infection"]),
    ("swelling", &["Allergies", "Injury", "Heart Disease", "Kidney Disease", "Infection"]),
    // Mental health
    ("anxiety", &["Anxiety Disorder", "Panic Disorder", "Depression", "PTSD"]),
    ("depression", &["Major Depression", "Bipolar Disorder", "Anxiety"]),
    ("stress", &["Anxiety Disorder", "Depression", "Burnout"]),
    ("sleep", &["Insomnia", "Sleep Apnea", "Anxiety", "Depression"]),
    ("insomnia", &["Insomnia", "Anxiety", "Depression", "Stress"]),
];

#[rustfmt::skip]
const SYNONYMS: &[(&str, &str)] = &[
    // Breathing
    ("cant breathe", "shortness breath"),
    ("hard to breathe", "shortness breath"),
    ("difficulty breathing", "shortness breath"),
    ("trouble breathing", "shortness breath"),
    // Pain
    ("hurts", "pain"),
    ("ache", "pain"),
    ("painful", "pain"),
    ("sore", "pain"),
    // Digestive
    ("upset stomach", "nausea"),
    ("throwing up", "vomiting"),
    ("throw up", "vomiting"),
    ("loose stool", "diarrhea"),
    // General
    ("weak", "fatigue"),
    ("exhausted", "fatigue"),
    ("lightheaded", "dizziness"),
    ("hot", "fever"),
    ("temperature", "fever"),
];

#[rustfmt::skip]
const SPECIALTY_KEYWORDS: &[(&str, &str)] = &[
    ("heart", "Cardiology"),
    ("cardiac", "Cardiology"),
    ("chest pain", "Cardiology"),
    ("skin", "Dermatology"),
    ("rash", "Dermatology"),
    ("acne", "Dermatology"),
    ("child", "Pediatrics"),
    ("children", "Pediatrics"),
    ("baby", "Pediatrics"),
    ("kid", "Pediatrics"),
    ("mental", "Psychiatry"),
    ("depression", "Psychiatry"),
    ("anxiety", "Psychiatry"),
    ("bone", "Orthopedics"),
    ("joint", "Orthopedics"),
    ("fracture", "Orthopedics"),
    ("eye", "Ophthalmology"),
    ("vision", "Ophthalmology"),
    ("dental", "Dentistry"),
    ("tooth", "Dentistry"),
    ("teeth", "Dentistry"),
    ("pregnancy", "OB-GYN"),
    ("pregnant", "OB-GYN"),
    ("gynecology", "OB-GYN"),
];

pub struct KnowledgeBase {
    /// Symptom entries in canonical table order; matching iterates this so
    /// matched-symptom reporting is deterministic.
    symptoms: Vec<(&'static str, Conditions)>,
    symptom_keys: HashSet<&'static str>,
    /// Synonyms sorted longest phrase first so overlapping phrases are
    /// rewritten before their substrings. Patterns are whole-word so "ache"
    /// never rewrites the inside of "headache".
    synonyms: Vec<(&'static str, &'static str)>,
    synonym_patterns: Vec<(Regex, &'static str)>,
    specialty_keywords: Vec<(&'static str, &'static str)>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        let mut synonyms: Vec<_> = SYNONYMS.to_vec();
        synonyms.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let synonym_patterns = synonyms
            .iter()
            .map(|(phrase, canonical)| {
                let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(phrase))).unwrap();
                (pattern, *canonical)
            })
            .collect();

        Self {
            symptoms: SYMPTOM_CONDITIONS.to_vec(),
            symptom_keys: SYMPTOM_CONDITIONS.iter().map(|(key, _)| *key).collect(),
            synonyms,
            synonym_patterns,
            specialty_keywords: SPECIALTY_KEYWORDS.to_vec(),
        }
    }

    /// Rewrite every whole-word synonym occurrence to its canonical phrase,
    /// longest phrases first.
    pub fn apply_synonyms(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (pattern, canonical) in &self.synonym_patterns {
            if pattern.is_match(&result) {
                result = pattern.replace_all(&result, *canonical).to_string();
            }
        }
        result
    }

    pub fn symptom_entries(&self) -> impl Iterator<Item = (&'static str, Conditions)> + '_ {
        self.symptoms.iter().copied()
    }

    /// Exact-token lookup against the symptom table.
    pub fn is_symptom(&self, token: &str) -> bool {
        self.symptom_keys.contains(token)
    }

    pub fn synonyms(&self) -> &[(&'static str, &'static str)] {
        &self.synonyms
    }

    pub fn specialty_keywords(&self) -> &[(&'static str, &'static str)] {
        &self.specialty_keywords
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synonyms_are_ordered_longest_first() {
        let kb = KnowledgeBase::new();
        let lengths: Vec<usize> = kb.synonyms().iter().map(|(phrase, _)| phrase.len()).collect();

        assert!(lengths.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn symptom_lookup_matches_table() {
        let kb = KnowledgeBase::new();

        assert!(kb.is_symptom("fever"));
        assert!(kb.is_symptom("headache"));
        assert!(!kb.is_symptom("spreadsheet"));
    }

    #[test]
    fn synonyms_only_rewrite_whole_words() {
        let kb = KnowledgeBase::new();

        assert_eq!(kb.apply_synonyms("my back hurts"), "my back pain");
        // "ache" inside "headache" must be left alone.
        assert_eq!(kb.apply_synonyms("severe headache"), "severe headache");
        assert_eq!(kb.apply_synonyms("cant breathe"), "shortness breath");
    }

    #[test]
    fn multi_word_entries_are_present() {
        let kb = KnowledgeBase::new();
        let multi: Vec<_> = kb
            .symptom_entries()
            .filter(|(key, _)| key.contains(' '))
            .map(|(key, _)| key)
            .collect();

        assert_eq!(multi, vec!["sore throat", "chest pain"]);
    }
}
