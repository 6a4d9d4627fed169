use std::collections::HashMap;

use futures::future::join_all;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use portal_config::PortalConfig;

use crate::models::GeoPoint;

/// In-memory geocoding cache keyed by normalized address. Constructed
/// explicitly and owned by the service so tests and admin operations can
/// `clear()` it.
pub struct GeocodeCache {
    entries: RwLock<HashMap<String, GeoPoint>>,
}

impl GeocodeCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, address: &str) -> Option<GeoPoint> {
        self.entries.read().await.get(&normalize_address(address)).copied()
    }

    pub async fn insert(&self, address: &str, point: GeoPoint) {
        self.entries
            .write()
            .await
            .insert(normalize_address(address), point);
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

impl Default for GeocodeCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase, trim and collapse runs of whitespace so trivially different
/// spellings of the same address share a cache entry.
pub fn normalize_address(address: &str) -> String {
    address
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Debug, Deserialize)]
struct GeocoderHit {
    lat: String,
    lon: String,
}

/// Address-to-coordinate resolution through an HTTP geocoder, with a
/// cache in front of it.
pub struct GeocodingService {
    http: reqwest::Client,
    base_url: String,
    cache: GeocodeCache,
}

impl GeocodingService {
    pub fn new(config: &PortalConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.geocoder_url.trim_end_matches('/').to_string(),
            cache: GeocodeCache::new(),
        }
    }

    pub fn cache(&self) -> &GeocodeCache {
        &self.cache
    }

    /// Resolve one address. Any failure (transport, bad payload, no hits)
    /// yields `None` after a warning; geocoding is best-effort.
    pub async fn locate(&self, address: &str) -> Option<GeoPoint> {
        if address.trim().is_empty() {
            return None;
        }

        if let Some(point) = self.cache.get(address).await {
            debug!("Geocode cache hit for {}", normalize_address(address));
            return Some(point);
        }

        let point = self.fetch(address).await?;
        self.cache.insert(address, point).await;
        Some(point)
    }

    /// Resolve a batch concurrently. The result is positionally aligned
    /// with the input; failed lookups are `None`.
    pub async fn locate_all(&self, addresses: &[String]) -> Vec<Option<GeoPoint>> {
        join_all(addresses.iter().map(|address| self.locate(address))).await
    }

    async fn fetch(&self, address: &str) -> Option<GeoPoint> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(address.trim())
        );

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!("Geocoder request failed for {:?}: {}", address, err);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(
                "Geocoder returned {} for {:?}",
                response.status(),
                address
            );
            return None;
        }

        let hits: Vec<GeocoderHit> = match response.json().await {
            Ok(hits) => hits,
            Err(err) => {
                warn!("Geocoder payload unreadable for {:?}: {}", address, err);
                return None;
            }
        };

        let hit = hits.into_iter().next()?;
        match (hit.lat.parse::<f64>(), hit.lon.parse::<f64>()) {
            (Ok(lat), Ok(lng)) => Some(GeoPoint { lat, lng }),
            _ => {
                warn!("Geocoder returned non-numeric coordinates for {:?}", address);
                None
            }
        }
    }
}
