// --- File: crates/repcal_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. sqlite://data/repcal.db, loaded via REPCAL__DATABASE__URL
}

// --- Google Calendar Config ---
// Access tokens are supplied per request by the calling rep, never stored here.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GcalConfig {
    pub calendar_id: Option<String>, // Defaults to "primary"
    pub request_timeout_secs: Option<u64>,
}

impl GcalConfig {
    pub fn calendar_id_or_primary(&self) -> &str {
        self.calendar_id.as_deref().unwrap_or(DEFAULT_CALENDAR_ID)
    }
}

pub const DEFAULT_CALENDAR_ID: &str = "primary";
pub const DEFAULT_TIME_ZONE: &str = "Europe/Zurich";
pub const DEFAULT_GRANULARITY_MINUTES: u32 = 15;

// --- Scheduling Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SchedulingConfig {
    /// IANA name of the single working timezone (e.g. "Europe/Zurich").
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    /// Slot quantization step. Only 15 is accepted.
    #[serde(default = "default_granularity")]
    pub granularity_minutes: u32,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            time_zone: default_time_zone(),
            granularity_minutes: default_granularity(),
        }
    }
}

fn default_time_zone() -> String {
    DEFAULT_TIME_ZONE.to_string()
}

fn default_granularity() -> u32 {
    DEFAULT_GRANULARITY_MINUTES
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_gcal: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub gcal: Option<GcalConfig>,
    #[serde(default)]
    pub scheduling: SchedulingConfig,
}
