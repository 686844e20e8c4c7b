use crate::config::{Config, MetadataSource};
use crate::context::QueryContext;
use crate::services::chain::ChainResolver;
use crate::services::metadata::{MetadataResolver, StaticResolver};
use crate::services::renderer::Textual;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub textual: Textual,
    pub resolver_timeout: Duration,
}

impl AppState {
    pub fn new(resolver: Arc<dyn MetadataResolver>, resolver_timeout: Duration) -> Self {
        Self {
            textual: Textual::new(resolver),
            resolver_timeout,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let resolver: Arc<dyn MetadataResolver> = match &config.metadata_source {
            MetadataSource::Chain(url) => Arc::new(ChainResolver::new(url)?),
            MetadataSource::File(path) => Arc::new(StaticResolver::from_file(path)?),
        };
        Ok(Self::new(resolver, config.resolver_timeout))
    }

    /// Fresh per-request scope carrying the configured deadline.
    pub fn query_context(&self) -> QueryContext {
        QueryContext::new().with_timeout(self.resolver_timeout)
    }
}
