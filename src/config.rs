use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

const CONFIG_FILE: &str = "meli-scraper";
const ENV_PREFIX: &str = "MELI_SCRAPER";

/// Which HTML scanning strategy the scraper uses for JSON-LD blocks and meta tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScannerKind {
    #[default]
    Pattern,
    Dom,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub bind_addr: String,
    pub user_agent: String,
    /// Substring the product URL host must contain.
    pub marketplace_domain: String,
    pub request_timeout_seconds: u64,
    pub log_level: String,
    pub scanner: ScannerKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            marketplace_domain: "mercadolibre".to_string(),
            request_timeout_seconds: 25,
            log_level: "meli_scraper=info".to_string(),
            scanner: ScannerKind::Pattern,
        }
    }
}

impl Config {
    /// Defaults, then an optional `meli-scraper.toml`, then `MELI_SCRAPER_*` env vars.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let settings = config::Config::builder()
            .set_default("bind_addr", defaults.bind_addr)?
            .set_default("user_agent", defaults.user_agent)?
            .set_default("marketplace_domain", defaults.marketplace_domain)?
            .set_default(
                "request_timeout_seconds",
                defaults.request_timeout_seconds as i64,
            )?
            .set_default("log_level", defaults.log_level)?
            .set_default("scanner", "pattern")?
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to build configuration")?;

        let config: Self = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.marketplace_domain.trim().is_empty() {
            bail!("marketplace_domain must not be empty");
        }
        if self.request_timeout_seconds == 0 {
            bail!("request_timeout_seconds must be greater than zero");
        }
        Ok(())
    }
}
