use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::error;

const DEFAULT_PORT: u16 = 4310;

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

// ─── FoodSafetyConfig ─────────────────────────────────────────────────────────

/// Food-safety windows (`[food_safety]` in config.toml).
///
/// Display-only: the canned chat responses and guideline text carry their own
/// copies of the 2-hour and 24-hour figures, and nothing enforces these
/// windows on submissions. The section exists so operators can state their
/// policy in one place; wiring it into expiry validation is a followup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FoodSafetyConfig {
    /// Hours a packaged donation is considered safe past submission (default: 24).
    pub default_expiry_hours: u32,
    /// Donation window for freshly prepared food, in hours (default: 2).
    pub prepared_food_expiry_hours: u32,
}

impl Default for FoodSafetyConfig {
    fn default() -> Self {
        Self {
            default_expiry_hours: 24,
            prepared_food_expiry_hours: 2,
        }
    }
}

// ─── ImpactConfig ─────────────────────────────────────────────────────────────

/// Headline impact figures shown on the partnership overview
/// (`[impact]` in config.toml). Marketing copy, not derived from the store.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ImpactConfig {
    pub food_distributed: String,
    pub communities_served: String,
    pub waste_reduced: String,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            food_distributed: "2,000,000 lbs/week".to_string(),
            communities_served: "150+".to_string(),
            waste_reduced: "85%".to_string(),
        }
    }
}

// ─── ObservabilityConfig ──────────────────────────────────────────────────────

/// Observability settings (`[observability]` in config.toml).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log database queries that exceed this threshold (milliseconds).
    /// Default: 100. Set to 0 to disable slow query logging.
    pub slow_query_threshold_ms: u64,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            slow_query_threshold_ms: 100,
        }
    }
}

// ─── TOML file layer ──────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    /// HTTP server port (default: 4310).
    port: Option<u16>,
    /// Bind address (default: "127.0.0.1"; use "0.0.0.0" for LAN access).
    bind_address: Option<String>,
    /// Log level filter string, e.g. "debug", "info,foodshared=trace" (default: "info").
    log: Option<String>,
    /// Log output format: "pretty" (default) | "json".
    log_format: Option<String>,
    /// Explicit database URL/path. Omitted = embedded database under data_dir,
    /// and content routes with a static fallback serve it in demo mode.
    database_url: Option<String>,
    /// Food-safety windows (`[food_safety]`).
    food_safety: Option<FoodSafetyConfig>,
    /// Overview impact figures (`[impact]`).
    impact: Option<ImpactConfig>,
    /// Observability settings (`[observability]`).
    observability: Option<ObservabilityConfig>,
}

fn load_toml(data_dir: &Path) -> Option<TomlConfig> {
    let path = data_dir.join("config.toml");
    let contents = std::fs::read_to_string(&path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            error!(path = %path.display(), err = %e, "failed to parse config.toml — using defaults");
            None
        }
    }
}

// ─── AppConfig ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub bind_address: String,
    pub data_dir: PathBuf,
    pub log: String,
    /// "pretty" (default) | "json".
    pub log_format: String,
    /// Explicit database location (FOODSHARE_DATABASE_URL env var or
    /// `database_url` in config.toml). None = embedded database in data_dir.
    pub database_url: Option<String>,
    pub food_safety: FoodSafetyConfig,
    pub impact: ImpactConfig,
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Build config from CLI/env args + optional TOML file.
    ///
    /// Priority (highest to lowest):
    ///   1. CLI / env — passed as `Some(value)` from clap
    ///   2. TOML file at `{data_dir}/config.toml`
    ///   3. Built-in defaults
    pub fn new(
        port: Option<u16>,
        data_dir: Option<PathBuf>,
        log: Option<String>,
        bind_address: Option<String>,
    ) -> Self {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);
        let toml = load_toml(&data_dir).unwrap_or_default();

        let port = port.or(toml.port).unwrap_or(DEFAULT_PORT);
        let log = log.or(toml.log).unwrap_or_else(|| "info".to_string());

        let bind_address = bind_address
            .or(std::env::var("FOODSHARE_BIND").ok().filter(|s| !s.is_empty()))
            .or(toml.bind_address)
            .unwrap_or_else(default_bind_address);

        let log_format = std::env::var("FOODSHARE_LOG_FORMAT")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.log_format)
            .unwrap_or_else(|| "pretty".to_string());

        let database_url = std::env::var("FOODSHARE_DATABASE_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.database_url);

        Self {
            port,
            bind_address,
            data_dir,
            log,
            log_format,
            database_url,
            food_safety: toml.food_safety.unwrap_or_default(),
            impact: toml.impact.unwrap_or_default(),
            observability: toml.observability.unwrap_or_default(),
        }
    }

    /// Whether an explicit database location was supplied.
    ///
    /// When false the service still runs against the embedded database, but
    /// routes with a static fallback (guidelines) report `mode: "demo"`.
    pub fn is_configured(&self) -> bool {
        self.database_url.is_some()
    }
}

fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FOODSHARE_DATA_DIR") {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".foodshare");
    }
    PathBuf::from(".foodshare")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_toml() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::new(None, Some(dir.path().to_path_buf()), None, None);
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.bind_address, "127.0.0.1");
        assert_eq!(cfg.log, "info");
        assert_eq!(cfg.food_safety.prepared_food_expiry_hours, 2);
        assert_eq!(cfg.impact.waste_reduced, "85%");
    }

    #[test]
    fn toml_layer_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "port = 9999\n\n[impact]\ncommunities_served = \"200+\"\n\n[food_safety]\nprepared_food_expiry_hours = 4\n",
        )
        .unwrap();
        let cfg = AppConfig::new(None, Some(dir.path().to_path_buf()), None, None);
        assert_eq!(cfg.port, 9999);
        assert_eq!(cfg.impact.communities_served, "200+");
        assert_eq!(cfg.food_safety.prepared_food_expiry_hours, 4);
        assert_eq!(cfg.food_safety.default_expiry_hours, 24);
        // CLI beats TOML
        let cfg = AppConfig::new(Some(4444), Some(dir.path().to_path_buf()), None, None);
        assert_eq!(cfg.port, 4444);
    }

    #[test]
    fn unconfigured_database_means_demo_mode() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::new(None, Some(dir.path().to_path_buf()), None, None);
        assert!(!cfg.is_configured());
    }
}
