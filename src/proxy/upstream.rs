//! Outbound calls to the travel-data API.
//!
//! # Responsibilities
//! - Turn a [`ResolvedRequest`] into the exact upstream URL and query
//! - Issue one GET per inbound request, `accept: application/json`
//! - Relay 2xx bodies untouched; surface everything else as [`ProxyError`]
//!
//! # Design Decisions
//! - No retry, no classification beyond 2xx / non-2xx / transport
//! - The location id is pushed as a single path segment, so `/` and `?`
//!   inside it are percent-encoded instead of changing the upstream path

use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Bytes,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use url::Url;

use crate::config::UpstreamConfig;
use crate::proxy::error::ProxyError;
use crate::proxy::params::{Resource, ResolvedRequest, SEARCH_CATEGORY};

/// One outbound request, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamCall {
    /// Base URL plus resource path, without query.
    pub url: Url,

    /// Query parameters in the order they are sent.
    pub query: Vec<(&'static str, String)>,
}

impl UpstreamCall {
    pub fn build(base: &Url, request: &ResolvedRequest) -> Result<Self, ProxyError> {
        let mut url = base.clone();
        url.set_query(None);
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ProxyError::InvalidUpstreamUrl(base.to_string()))?;
            segments.pop_if_empty();
            match &request.resource {
                Resource::Search { .. } => {
                    segments.push("search");
                }
                Resource::Photos { location_id }
                | Resource::Details { location_id, .. }
                | Resource::Reviews { location_id, .. } => {
                    segments.push(location_id).push(request.resource.kind().as_str());
                }
            }
        }

        let mut query = vec![("key", request.key.clone())];
        match &request.resource {
            Resource::Search { search_query, language } => {
                query.push(("language", language.code().to_string()));
                query.push(("searchQuery", search_query.clone()));
                query.push(("category", SEARCH_CATEGORY.to_string()));
            }
            Resource::Photos { .. } => {}
            Resource::Details { language, .. } | Resource::Reviews { language, .. } => {
                query.push(("language", language.code().to_string()));
            }
        }

        Ok(Self { url, query })
    }

    /// Value of the first query parameter called `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A successful upstream response, relayed as-is.
#[derive(Debug, Clone)]
pub struct Relayed {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl IntoResponse for Relayed {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        if let Some(content_type) = self.content_type {
            response.headers_mut().insert(header::CONTENT_TYPE, content_type);
        }
        response
    }
}

/// Something that can execute an [`UpstreamCall`].
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn fetch(&self, call: &UpstreamCall) -> Result<Relayed, ProxyError>;
}

/// [`Upstream`] over HTTP(S) via `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
}

impl HttpUpstream {
    pub fn new(config: &UpstreamConfig) -> Result<Self, ProxyError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| ProxyError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

// Error text must not carry the request URL: its query holds the key.
fn transport(err: reqwest::Error) -> ProxyError {
    ProxyError::Transport(err.without_url().to_string())
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn fetch(&self, call: &UpstreamCall) -> Result<Relayed, ProxyError> {
        let response = self
            .client
            .get(call.url.clone())
            .header(header::ACCEPT, "application/json")
            .query(&call.query)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response.bytes().await.map_err(transport)?;

        if status.is_success() {
            Ok(Relayed { status, content_type, body })
        } else {
            Err(ProxyError::Upstream { status, content_type, body })
        }
    }
}
