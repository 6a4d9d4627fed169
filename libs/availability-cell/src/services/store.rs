use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use tokio::sync::RwLock;
use tokio::time::timeout;
use tracing::{debug, warn};

use portal_client::BackendClient;

use crate::models::{AvailabilityRecord, DateWindow, LoadedWindow, StoreSnapshot};
use crate::services::recurrence;

const LOAD_TIMEOUT_MESSAGE: &str =
    "Loading availability took too long. Please try again.";

/// Loads raw availability records for a (dentist, date window) pair and
/// holds them for repeated reads.
///
/// Guarantees, in order of how often they bite in practice:
/// - an identical window is served from memory without a refetch;
/// - failures reset the held records to empty and surface a user-facing
///   message, never the raw error; no automatic retry;
/// - every fetch runs under a timeout so loading state cannot stay stuck
///   if the backend never answers;
/// - each fetch carries a generation token captured at dispatch, and its
///   result is applied only while the token is still the newest one, so a
///   slow response can never overwrite a fresher window.
pub struct AvailabilityStore {
    backend: Arc<BackendClient>,
    load_timeout: Duration,
    generation: AtomicU64,
    state: RwLock<StoreSnapshot>,
}

impl AvailabilityStore {
    pub fn new(backend: Arc<BackendClient>, load_timeout: Duration) -> Self {
        Self {
            backend,
            load_timeout,
            generation: AtomicU64::new(0),
            state: RwLock::new(StoreSnapshot::default()),
        }
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        self.state.read().await.clone()
    }

    /// Fetch availability records for `dentist_id` within `window`,
    /// canonicalizing day-of-week encodings at ingest. A missing dentist id
    /// short-circuits to an empty result without touching the network.
    pub async fn load(
        &self,
        dentist_id: &str,
        window: DateWindow,
        auth_token: Option<&str>,
    ) -> Result<Vec<AvailabilityRecord>, String> {
        if dentist_id.trim().is_empty() {
            let mut state = self.state.write().await;
            *state = StoreSnapshot::default();
            return Ok(Vec::new());
        }

        // The cache key is (dentist, window) only. Availability is public
        // data and the upstream returns the same records whoever asks, so a
        // window fetched under one caller's token is valid for every caller.
        {
            let state = self.state.read().await;
            if let Some(loaded) = &state.loaded {
                if loaded.dentist_id == dentist_id && loaded.window == window {
                    debug!("Serving availability for {} from loaded window", dentist_id);
                    return Ok(state.records.clone());
                }
            }
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        let path = format!(
            "/api/v1/availability?dentist_id={}&from={}&to={}",
            urlencoding::encode(dentist_id),
            window.start,
            window.end,
        );

        let outcome = timeout(
            self.load_timeout,
            self.backend
                .request::<Vec<AvailabilityRecord>>(Method::GET, &path, auth_token, None),
        )
        .await;

        let is_current = self.generation.load(Ordering::SeqCst) == generation;

        match outcome {
            Ok(Ok(records)) => {
                let records = recurrence::canonicalize(records);
                if is_current {
                    let mut state = self.state.write().await;
                    state.records = records.clone();
                    state.loading = false;
                    state.error = None;
                    state.loaded = Some(LoadedWindow {
                        dentist_id: dentist_id.to_string(),
                        window,
                    });
                } else {
                    debug!(
                        "Discarding stale availability response for {} (superseded request)",
                        dentist_id
                    );
                }
                Ok(records)
            }
            Ok(Err(err)) => {
                warn!("Availability fetch failed for {}: {}", dentist_id, err);
                let message = err.user_message();
                if is_current {
                    self.reset_with_error(&message).await;
                }
                Err(message)
            }
            Err(_elapsed) => {
                warn!(
                    "Availability fetch for {} exceeded {:?}, clearing loading state",
                    dentist_id, self.load_timeout
                );
                if is_current {
                    self.reset_with_error(LOAD_TIMEOUT_MESSAGE).await;
                }
                Err(LOAD_TIMEOUT_MESSAGE.to_string())
            }
        }
    }

    async fn reset_with_error(&self, message: &str) {
        let mut state = self.state.write().await;
        state.records.clear();
        state.loaded = None;
        state.loading = false;
        state.error = Some(message.to_string());
    }
}
