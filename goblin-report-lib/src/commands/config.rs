use crate::Result;
use crate::facts::Metric;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the base directory
pub const CONFIG_FILE_NAME: &str = "goblin.toml";

const MAX_CONCURRENT_REQUESTS_LIMIT: usize = 64;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the metrics service
    #[serde(default = "default_api_url")]
    pub api_url: Url,

    /// Metric names to request, in report column order
    #[serde(default = "default_metrics")]
    pub metrics: Vec<String>,

    /// Reject metric names without a known extractor
    #[serde(default)]
    pub strict_metrics: bool,

    /// Upper bound for a single metrics request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// How many metrics requests may be in flight at once
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    /// Host serving the artifact overview pages
    #[serde(default = "default_link_base_url")]
    pub link_base_url: Url,
}

fn default_api_url() -> Url {
    Url::parse(crate::facts::DEFAULT_API_URL).expect("default API URL is valid")
}

fn default_link_base_url() -> Url {
    Url::parse(crate::facts::DEFAULT_LINK_BASE_URL).expect("default link base URL is valid")
}

fn default_metrics() -> Vec<String> {
    vec!["cve_aggregated".to_string(), "freshness".to_string()]
}

const fn default_request_timeout_secs() -> u64 {
    crate::facts::DEFAULT_REQUEST_TIMEOUT.as_secs()
}

const fn default_max_concurrent_requests() -> usize {
    crate::facts::DEFAULT_MAX_CONCURRENT_REQUESTS
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `goblin.toml` in `base_dir` is used when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of range, the metric list is unusable,
    /// or a URL has a scheme other than http/https
    pub fn validate(&self) -> Result<()> {
        for (key, url) in [("api_url", &self.api_url), ("link_base_url", &self.link_base_url)] {
            if !matches!(url.scheme(), "http" | "https") {
                bail!("{key} must be an http or https URL, got '{url}'");
            }
        }

        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than 0");
        }

        if !(1..=MAX_CONCURRENT_REQUESTS_LIMIT).contains(&self.max_concurrent_requests) {
            return Err(app_err!(
                "max_concurrent_requests must be between 1 and {MAX_CONCURRENT_REQUESTS_LIMIT}, got {}",
                self.max_concurrent_requests
            ));
        }

        if self.metrics.is_empty() {
            bail!("at least one metric must be requested");
        }

        let mut seen = HashSet::new();
        for metric in self.requested_metrics() {
            if metric.name().is_empty() {
                bail!("metric names must not be empty");
            }

            if !seen.insert(metric.name().to_string()) {
                bail!("metric '{metric}' is requested more than once");
            }

            if self.strict_metrics && !metric.is_known() {
                bail!("unknown metric '{metric}' (strict_metrics is enabled)");
            }
        }

        Ok(())
    }

    /// The configured metric names resolved against the known metric kinds.
    #[must_use]
    pub fn requested_metrics(&self) -> Vec<Metric> {
        self.metrics.iter().map(Metric::parse).collect()
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
