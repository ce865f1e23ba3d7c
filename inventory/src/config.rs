use std::path::PathBuf;

use chrono::Locale;
use chrono_tz::Tz;

/// Engine configuration
///
/// # Environment variables
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/inventory | Directory holding the store file and logs |
/// | DISPLAY_TZ | UTC | Timezone for calendar-day grouping |
/// | DISPLAY_LOCALE | en_US | Locale for group date labels |
/// | LOG_LEVEL | info | Tracing log level |
/// | LOG_DIR | (unset) | Enable daily-rolling file logs in this directory |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the store file and logs
    pub work_dir: String,
    /// Timezone used when bucketing timestamps into calendar days
    pub display_tz: Tz,
    /// Locale for formatted date-group labels
    pub display_locale: Locale,
    /// Tracing log level: trace | debug | info | warn | error
    pub log_level: String,
    /// Optional directory for rolling file logs
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to defaults. A `.env`
    /// file in the working directory is honored.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/inventory".into()),
            display_tz: std::env::var("DISPLAY_TZ")
                .ok()
                .and_then(|tz| tz.parse().ok())
                .unwrap_or(Tz::UTC),
            display_locale: std::env::var("DISPLAY_LOCALE")
                .ok()
                .and_then(|l| Locale::try_from(l.as_str()).ok())
                .unwrap_or(Locale::en_US),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Override the working directory
    ///
    /// Commonly used in tests with a temp dir.
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }

    /// Path of the embedded store file
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("inventory.redb")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
