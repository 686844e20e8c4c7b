use crate::context::QueryContext;
use crate::error::ResolveError;
use crate::models::{BankMetadata, DenomMetadata};
use crate::services::metadata::MetadataResolver;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, warn};
use url::Url;

const BANK_PATH: [&str; 3] = ["cosmos", "bank", "v1beta1"];
const METADATA_ROUTE: &str = "denoms_metadata";
// Denoms with a '/' (ibc/..., factory/...) cannot travel as a path segment.
const METADATA_QUERY_ROUTE: &str = "denoms_metadata_by_query_string";
const PAGE_LIMIT: &str = "200";
const MAX_PAGES: usize = 1000;
// google.rpc.Code.NOT_FOUND, as relayed by the REST gateway
const GRPC_NOT_FOUND: i64 = 5;

#[derive(Debug, Deserialize)]
struct DenomMetadataResponse {
    metadata: BankMetadata,
}

#[derive(Debug, Deserialize)]
struct DenomsMetadataResponse {
    metadatas: Vec<BankMetadata>,
    pagination: Option<PageResponse>,
}

#[derive(Debug, Deserialize)]
struct PageResponse {
    next_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GatewayError {
    code: i64,
}

/// Resolves metadata from live chain state through the bank module's REST
/// endpoints. Lookups race the context's deadline and cancellation signal.
#[derive(Debug, Clone)]
pub struct ChainResolver {
    http_client: Client,
    base_url: Url,
}

impl ChainResolver {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http_client: Client, base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            http_client,
            base_url: Url::parse(base_url)?,
        })
    }

    fn endpoint(&self, denom: Option<&str>) -> Result<Url, ResolveError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ResolveError::Transport(format!("{} cannot be a base URL", self.base_url))
            })?;
            segments.pop_if_empty().extend(BANK_PATH);
            match denom {
                Some(denom) if denom.contains('/') => {
                    segments.push(METADATA_QUERY_ROUTE);
                }
                Some(denom) => {
                    segments.push(METADATA_ROUTE).push(denom);
                }
                None => {
                    segments.push(METADATA_ROUTE);
                }
            }
        }
        if let Some(denom) = denom.filter(|d| d.contains('/')) {
            url.query_pairs_mut().append_pair("denom", denom);
        }
        Ok(url)
    }

    async fn fetch_by_base(&self, base: &str) -> Result<DenomMetadata, ResolveError> {
        let url = self.endpoint(Some(base))?;
        debug!("Querying denom metadata for {}", base);

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ResolveError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body, base));
        }

        let body: DenomMetadataResponse = response
            .json()
            .await
            .map_err(|e| ResolveError::Transport(e.to_string()))?;
        let metadata = DenomMetadata::try_from(body.metadata)?;
        if metadata.base != base {
            return Err(ResolveError::InvalidMetadata(format!(
                "asked for {} but chain answered {}",
                base, metadata.base
            )));
        }
        Ok(metadata)
    }

    async fn fetch_by_display(&self, display_denom: &str) -> Result<DenomMetadata, ResolveError> {
        let url = self.endpoint(None)?;
        let mut next_key: Option<String> = None;
        let mut seen_keys = HashSet::new();
        let mut pages = 0usize;

        loop {
            if pages >= MAX_PAGES {
                return Err(ResolveError::Transport(format!(
                    "gave up on {} after {} metadata pages",
                    display_denom, pages
                )));
            }

            let mut request = self
                .http_client
                .get(url.clone())
                .query(&[("pagination.limit", PAGE_LIMIT)]);
            if let Some(key) = &next_key {
                request = request.query(&[("pagination.key", key.as_str())]);
            }

            let response = request
                .send()
                .await
                .map_err(|e| ResolveError::Transport(e.to_string()))?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(status_error(status, body, display_denom));
            }

            let page: DenomsMetadataResponse = response
                .json()
                .await
                .map_err(|e| ResolveError::Transport(e.to_string()))?;
            pages += 1;

            if let Some(found) = page
                .metadatas
                .into_iter()
                .find(|m| m.display == display_denom)
            {
                debug!("Found display denom {} after {} page(s)", display_denom, pages);
                return DenomMetadata::try_from(found);
            }

            next_key = page
                .pagination
                .and_then(|p| p.next_key)
                .filter(|key| !key.is_empty());
            match &next_key {
                None => return Err(ResolveError::NotFound(display_denom.to_string())),
                Some(key) if !seen_keys.insert(key.clone()) => {
                    warn!("Metadata pagination key {} repeated", key);
                    return Err(ResolveError::Transport(format!(
                        "pagination key {} repeated while looking up {}",
                        key, display_denom
                    )));
                }
                Some(_) => {}
            }
        }
    }
}

fn status_error(status: StatusCode, body: String, denom: &str) -> ResolveError {
    let grpc_not_found = serde_json::from_str::<GatewayError>(&body)
        .map(|e| e.code == GRPC_NOT_FOUND)
        .unwrap_or(false);

    if status == StatusCode::NOT_FOUND || grpc_not_found {
        ResolveError::NotFound(denom.to_string())
    } else {
        warn!("Metadata endpoint returned {} for {}", status, denom);
        ResolveError::Status {
            status: status.as_u16(),
            body,
        }
    }
}

#[async_trait]
impl MetadataResolver for ChainResolver {
    async fn by_base(&self, ctx: &QueryContext, base: &str) -> Result<DenomMetadata, ResolveError> {
        ctx.run(self.fetch_by_base(base)).await
    }

    async fn by_display(
        &self,
        ctx: &QueryContext,
        display: &str,
    ) -> Result<DenomMetadata, ResolveError> {
        ctx.run(self.fetch_by_display(display)).await
    }

    fn source(&self) -> &'static str {
        "chain"
    }
}
