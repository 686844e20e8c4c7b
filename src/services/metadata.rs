use crate::context::QueryContext;
use crate::error::ResolveError;
use crate::models::{BankMetadata, DenomMetadata};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Read-only source of denomination metadata.
///
/// Implementations must be safe for concurrent reads. Every call is
/// independent: the renderers never cache what a resolver returns.
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    async fn by_base(&self, ctx: &QueryContext, base: &str) -> Result<DenomMetadata, ResolveError>;

    async fn by_display(
        &self,
        ctx: &QueryContext,
        display: &str,
    ) -> Result<DenomMetadata, ResolveError>;

    /// Short name for logging.
    fn source(&self) -> &'static str;
}

/// Resolves from the metadata values carried by the query context itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextResolver;

#[async_trait]
impl MetadataResolver for ContextResolver {
    async fn by_base(&self, ctx: &QueryContext, base: &str) -> Result<DenomMetadata, ResolveError> {
        ctx.check()?;
        ctx.metadata_by_base(base)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(base.to_string()))
    }

    async fn by_display(
        &self,
        ctx: &QueryContext,
        display: &str,
    ) -> Result<DenomMetadata, ResolveError> {
        ctx.check()?;
        ctx.metadata_by_display(display)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(display.to_string()))
    }

    fn source(&self) -> &'static str {
        "context"
    }
}

/// Fixed registry built once at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    by_base: HashMap<String, DenomMetadata>,
    display_to_base: HashMap<String, String>,
}

impl StaticResolver {
    pub fn new(entries: impl IntoIterator<Item = DenomMetadata>) -> Result<Self, ResolveError> {
        let mut resolver = Self::default();
        for metadata in entries {
            metadata.validate()?;
            if resolver.by_base.contains_key(&metadata.base) {
                return Err(ResolveError::InvalidMetadata(format!(
                    "base denomination {} registered twice",
                    metadata.base
                )));
            }
            if resolver.display_to_base.contains_key(&metadata.display) {
                return Err(ResolveError::InvalidMetadata(format!(
                    "display denomination {} registered twice",
                    metadata.display
                )));
            }
            resolver
                .display_to_base
                .insert(metadata.display.clone(), metadata.base.clone());
            resolver.by_base.insert(metadata.base.clone(), metadata);
        }
        Ok(resolver)
    }

    /// Parse a JSON array of bank metadata entries.
    pub fn from_bank_json(json: &str) -> Result<Self, ResolveError> {
        let entries: Vec<BankMetadata> = serde_json::from_str(json)
            .map_err(|e| ResolveError::InvalidMetadata(e.to_string()))?;
        let entries = entries
            .into_iter()
            .map(DenomMetadata::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entries)
    }

    pub fn from_file(path: &Path) -> Result<Self, ResolveError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            ResolveError::InvalidMetadata(format!("cannot read {}: {}", path.display(), e))
        })?;
        let resolver = Self::from_bank_json(&json)?;
        debug!("Loaded {} denominations from {}", resolver.len(), path.display());
        Ok(resolver)
    }

    pub fn len(&self) -> usize {
        self.by_base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_base.is_empty()
    }
}

#[async_trait]
impl MetadataResolver for StaticResolver {
    async fn by_base(&self, ctx: &QueryContext, base: &str) -> Result<DenomMetadata, ResolveError> {
        ctx.check()?;
        self.by_base
            .get(base)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(base.to_string()))
    }

    async fn by_display(
        &self,
        ctx: &QueryContext,
        display: &str,
    ) -> Result<DenomMetadata, ResolveError> {
        ctx.check()?;
        self.display_to_base
            .get(display)
            .and_then(|base| self.by_base.get(base))
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(display.to_string()))
    }

    fn source(&self) -> &'static str {
        "static"
    }
}
