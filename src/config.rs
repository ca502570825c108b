use std::path::PathBuf;

use tracing::trace;

/// Storage backend configuration
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageConfig {
    /// In-memory storage (no persistence)
    #[serde(rename = "none")]
    None,

    /// SQLite database (default)
    Sqlite {
        /// Path to the SQLite database file
        #[serde(default = "default_sqlite_path")]
        path: PathBuf,
    },
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::Sqlite {
            path: default_sqlite_path(),
        }
    }
}

fn default_sqlite_path() -> PathBuf {
    PathBuf::from("./health.db")
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub targets: Vec<TargetConfig>,

    /// Storage configuration (optional - defaults to SQLite)
    pub storage: Option<StorageConfig>,

    /// Reporting cadence (optional - defaults apply)
    pub report: Option<ReportConfig>,
}

/// One monitored endpoint.
///
/// Targets are loaded once at startup and never change for the process
/// lifetime. Duplicate URLs are allowed: each entry gets its own monitor,
/// all appending to the same series key.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct TargetConfig {
    /// Address to probe
    pub url: String,

    /// Seconds between probe attempts
    #[serde(default = "default_interval")]
    pub interval: u64,

    /// Probe timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Where alerts and reports for this target are delivered
    pub alert: Alert,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alert {
    Discord(Discord),
    Webhook(Webhook),
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Discord {
    pub url: String,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Webhook {
    pub url: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ReportConfig {
    /// Seconds between report cycles
    #[serde(default = "default_report_interval")]
    pub interval: u64,

    /// Seconds to wait before the first report cycle
    #[serde(default = "default_report_delay")]
    pub initial_delay: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            interval: default_report_interval(),
            initial_delay: default_report_delay(),
        }
    }
}

fn default_interval() -> u64 {
    60
}

fn default_timeout() -> u64 {
    10
}

fn default_report_interval() -> u64 {
    3600
}

fn default_report_delay() -> u64 {
    60
}

pub fn read_config_file(path: &str) -> anyhow::Result<Config> {
    let file_content = std::fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&file_content)
        .map_err(|_| anyhow::anyhow!("Invalid configuration file provided!"))?;
    validate(&config)?;
    trace!("loaded config: {config:?}");
    Ok(config)
}

fn validate(config: &Config) -> anyhow::Result<()> {
    if config.targets.is_empty() {
        anyhow::bail!("No targets configured!");
    }

    for target in &config.targets {
        if target.interval == 0 {
            anyhow::bail!("Target {} has a zero poll interval!", target.url);
        }
        if target.timeout == 0 {
            anyhow::bail!("Target {} has a zero probe timeout!", target.url);
        }
    }

    Ok(())
}
