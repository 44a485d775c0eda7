use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display};
use strum::{Display as StrumDisplay, EnumString};

/// The two provider categories the service tracks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, StrumDisplay, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProviderType {
    Healthcare,
    Insurance,
}

/// Where a record came from. Scraped records carry the name of the upstream
/// listing source; the other two variants mark the static local database and
/// the deterministic substitutes installed after a failed refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    Scraped(String),
    LocalDatabase,
    Fallback,
}

impl RecordSource {
    pub fn as_str(&self) -> &str {
        match self {
            RecordSource::Scraped(name) => name,
            RecordSource::LocalDatabase => "local-database",
            RecordSource::Fallback => "fallback",
        }
    }
}

impl Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for RecordSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "local-database" => RecordSource::LocalDatabase,
            "fallback" => RecordSource::Fallback,
            "" => return Err(de::Error::custom("record source must not be empty")),
            _ => RecordSource::Scraped(raw),
        })
    }
}

/// A single provider listing. Copies handed to callers are owned snapshots;
/// `relevance_score` is transient and only populated during ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    pub source: RecordSource,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coverage_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specialties: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accepted_insurance: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
}

impl ProviderRecord {
    /// Minimal record with everything optional left empty.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
        website: impl Into<String>,
        source: RecordSource,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
            website: website.into(),
            rating: None,
            distance: None,
            source,
            coverage_types: Vec::new(),
            specialties: Vec::new(),
            accepted_insurance: Vec::new(),
            description: None,
            relevance_score: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_source_round_trips_through_json() {
        let scraped = RecordSource::Scraped("Google Maps".to_string());
        let json = serde_json::to_string(&scraped).unwrap();
        assert_eq!(json, "\"Google Maps\"");
        assert_eq!(serde_json::from_str::<RecordSource>(&json).unwrap(), scraped);

        let local = serde_json::from_str::<RecordSource>("\"local-database\"").unwrap();
        assert_eq!(local, RecordSource::LocalDatabase);
    }

    #[test]
    fn provider_type_parses_case_insensitively() {
        use std::str::FromStr;

        assert_eq!(
            ProviderType::from_str("Healthcare").unwrap(),
            ProviderType::Healthcare
        );
        assert_eq!(ProviderType::Insurance.to_string(), "insurance");
    }

    #[test]
    fn transient_fields_are_omitted_from_json() {
        let record = ProviderRecord::new(
            "HealthCare Plus",
            "123 Health Ave, Miami, FL",
            "305-555-1234",
            "https://healthcareplusmiami.com",
            RecordSource::LocalDatabase,
        );

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("relevance_score").is_none());
        assert!(json.get("coverage_types").is_none());
    }
}
