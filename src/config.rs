use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataSource {
    Chain(String),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub metadata_source: MetadataSource,
    pub resolver_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "3001".to_string())
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("Invalid PORT value"))?;

        let chain_rest_url = lookup("CHAIN_REST_URL").filter(|s| !s.trim().is_empty());
        let metadata_file = lookup("METADATA_FILE").filter(|s| !s.trim().is_empty());

        let metadata_source = match (chain_rest_url, metadata_file) {
            (Some(url), file) => {
                if file.is_some() {
                    tracing::warn!("Both CHAIN_REST_URL and METADATA_FILE set; using the chain");
                }
                url::Url::parse(&url)
                    .map_err(|e| anyhow::anyhow!("Invalid CHAIN_REST_URL: {}", e))?;
                MetadataSource::Chain(url)
            }
            (None, Some(file)) => MetadataSource::File(PathBuf::from(file)),
            (None, None) => {
                return Err(anyhow::anyhow!(
                    "Set CHAIN_REST_URL or METADATA_FILE to provide denomination metadata"
                ))
            }
        };

        let timeout_ms = lookup("RESOLVER_TIMEOUT_MS")
            .unwrap_or_else(|| "5000".to_string())
            .parse::<u64>()
            .map_err(|_| anyhow::anyhow!("Invalid RESOLVER_TIMEOUT_MS value"))?;

        Ok(Config {
            port,
            metadata_source,
            resolver_timeout: Duration::from_millis(timeout_ms),
        })
    }
}
