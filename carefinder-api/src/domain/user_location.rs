use std::collections::HashMap;
use std::net::IpAddr;

use serde::Serialize;
use time::OffsetDateTime;
use tokio::sync::RwLock;

/// Last-known location reported by a client.
#[derive(Debug, Clone, Serialize)]
pub struct ClientLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub is_manual_selection: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// In-memory per-client location store.
#[derive(Default)]
pub struct LocationStore {
    locations: RwLock<HashMap<IpAddr, ClientLocation>>,
}

impl LocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn update(&self, client: IpAddr, location: ClientLocation) {
        let mut locations = self.locations.write().await;
        locations.insert(client, location);
    }

    pub async fn get(&self, client: IpAddr) -> Option<ClientLocation> {
        let locations = self.locations.read().await;
        locations.get(&client).cloned()
    }
}
