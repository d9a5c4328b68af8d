//! Proxy error taxonomy and its mapping to HTTP responses.

use axum::{
    body::Bytes,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Carries the upstream status on relayed failures.
pub const X_UPSTREAM_STATUS: HeaderName = HeaderName::from_static("x-upstream-status");

#[derive(Debug, Error)]
pub enum ProxyError {
    /// A required parameter was absent or empty. No outbound call was made.
    #[error("{0} is required")]
    MissingParameter(&'static str),

    /// A parameter was present but cannot be sent upstream as-is.
    #[error("{0} is invalid")]
    InvalidParameter(&'static str),

    /// Upstream answered with a non-2xx status.
    #[error("upstream responded with status {status}")]
    Upstream {
        status: StatusCode,
        content_type: Option<HeaderValue>,
        body: Bytes,
    },

    /// The outbound call never produced a response (connect, timeout, body read).
    #[error("upstream request failed: {0}")]
    Transport(String),

    #[error("invalid upstream url: {0}")]
    InvalidUpstreamUrl(String),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingParameter(_) | ProxyError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            ProxyError::Upstream { .. } | ProxyError::Transport(_) => StatusCode::BAD_GATEWAY,
            ProxyError::InvalidUpstreamUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ProxyError::Upstream {
                status: upstream_status,
                content_type,
                body,
            } => {
                let mut response = (status, body).into_response();
                if let Some(content_type) = content_type {
                    response.headers_mut().insert(header::CONTENT_TYPE, content_type);
                }
                response
                    .headers_mut()
                    .insert(X_UPSTREAM_STATUS, HeaderValue::from(upstream_status.as_u16()));
                response
            }
            other => (status, other.to_string()).into_response(),
        }
    }
}
