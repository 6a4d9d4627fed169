use std::env;
use tracing::warn;

/// Default width of the query window beyond the visible month, in months.
pub const DEFAULT_PREFETCH_HORIZON_MONTHS: u32 = 3;
/// Default bound on a single availability fetch before loading state is cleared.
pub const DEFAULT_LOAD_TIMEOUT_SECS: u64 = 30;
/// Default bookable slot duration.
pub const DEFAULT_SLOT_DURATION_MINUTES: i64 = 30;

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub backend_url: String,
    pub backend_api_key: String,
    pub geocoder_url: String,
    pub chat_upstream_url: String,
    pub prefetch_horizon_months: u32,
    pub load_timeout_secs: u64,
    pub slot_duration_minutes: i64,
}

impl PortalConfig {
    pub fn from_env() -> Self {
        let config = Self {
            backend_url: env::var("CLINIC_BACKEND_URL")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_BACKEND_URL not set, using empty value");
                    String::new()
                }),
            backend_api_key: env::var("CLINIC_BACKEND_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_BACKEND_API_KEY not set, using empty value");
                    String::new()
                }),
            geocoder_url: env::var("GEOCODER_URL")
                .unwrap_or_else(|_| {
                    warn!("GEOCODER_URL not set, using default");
                    "https://nominatim.openstreetmap.org".to_string()
                }),
            chat_upstream_url: env::var("CHAT_UPSTREAM_URL")
                .unwrap_or_else(|_| {
                    warn!("CHAT_UPSTREAM_URL not set, using empty value");
                    String::new()
                }),
            prefetch_horizon_months: parse_env_or(
                "AVAILABILITY_PREFETCH_MONTHS",
                DEFAULT_PREFETCH_HORIZON_MONTHS,
            ),
            load_timeout_secs: parse_env_or(
                "AVAILABILITY_LOAD_TIMEOUT_SECS",
                DEFAULT_LOAD_TIMEOUT_SECS,
            ),
            slot_duration_minutes: parse_env_or(
                "SLOT_DURATION_MINUTES",
                DEFAULT_SLOT_DURATION_MINUTES,
            ),
        };

        if !config.is_configured() {
            warn!("Portal not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.backend_url.is_empty() && !self.backend_api_key.is_empty()
    }

    pub fn is_chat_configured(&self) -> bool {
        !self.chat_upstream_url.is_empty()
    }
}

fn parse_env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} is not a valid value, using default", key);
            default
        }),
        Err(_) => default,
    }
}
