//! Resource handlers.
//!
//! Every route funnels into [`forward`], so validation and language
//! handling are identical across resources. Queries are taken as raw pairs
//! so a repeated name never fails extraction before validation runs.

use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::{get, MethodRouter},
};

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::proxy::{params, ProxyError, RawParams, Relayed, ResourceKind, UpstreamCall};

/// `GET /<resource>?locationId=...` (and `/search`).
pub fn by_query(kind: ResourceKind) -> MethodRouter<AppState> {
    get(move |State(state): State<AppState>, Query(pairs): Query<Vec<(String, String)>>| async move {
        forward(&state, kind, RawParams::from_pairs(pairs)).await
    })
}

/// `GET /{locationId}/<resource>` or `GET /<resource>/{locationId}`.
///
/// The path segment takes precedence over a `locationId` query parameter.
pub fn by_path(kind: ResourceKind) -> MethodRouter<AppState> {
    get(
        move |State(state): State<AppState>,
              Path(location_id): Path<String>,
              Query(pairs): Query<Vec<(String, String)>>| async move {
            let mut raw = RawParams::from_pairs(pairs);
            raw.location_id = Some(location_id);
            forward(&state, kind, raw).await
        },
    )
}

/// Resolve, call upstream once, and map the outcome to a response.
pub async fn forward(state: &AppState, kind: ResourceKind, raw: RawParams) -> Response {
    let response = match proxy(state, kind, raw).await {
        Ok(relayed) => relayed.into_response(),
        Err(e) => e.into_response(),
    };
    metrics::record_request(kind.as_str(), response.status().as_u16());
    response
}

async fn proxy(state: &AppState, kind: ResourceKind, raw: RawParams) -> Result<Relayed, ProxyError> {
    let upstream_config = &state.config.upstream;
    let request = params::resolve(kind, raw, upstream_config.credential_mode, &upstream_config.token)
        .inspect_err(|e| tracing::warn!(resource = kind.as_str(), error = %e, "Rejected request"))?;

    let call = UpstreamCall::build(&state.base_url, &request)?;
    tracing::debug!(
        resource = kind.as_str(),
        url = %call.url,
        language = call.param("language").unwrap_or("-"),
        "Forwarding request"
    );

    let start = Instant::now();
    let result = state.upstream.fetch(&call).await;
    metrics::record_upstream(kind.as_str(), start);

    result.inspect_err(|e| match e {
        ProxyError::Upstream { status, .. } => {
            tracing::error!(resource = kind.as_str(), status = %status, "Upstream returned an error")
        }
        other => tracing::error!(resource = kind.as_str(), error = %other, "Upstream request failed"),
    })
}
