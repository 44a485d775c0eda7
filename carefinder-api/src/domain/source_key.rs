use std::fmt::{self, Display};

use super::ProviderType;

/// Key for one cache entry and one refresh job: a provider category at a
/// location. Locations are normalized so "Miami" and "miami " share an entry.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct SourceKey {
    pub provider_type: ProviderType,
    pub location: String,
}

impl SourceKey {
    pub fn new(provider_type: ProviderType, location: &str) -> Self {
        Self {
            provider_type,
            location: location.trim().to_lowercase(),
        }
    }
}

impl Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider_type, self.location)
    }
}
