//! Request forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! query string / path segment
//!     → params.rs (credential check, required field, language clamp)
//!     → upstream.rs (URL + query construction, single outbound GET)
//!     → Relayed body, or ProxyError mapped to a status in error.rs
//! ```

pub mod error;
pub mod params;
pub mod upstream;

pub use error::ProxyError;
pub use params::{normalize_language, resolve, Language, RawParams, ResolvedRequest, Resource, ResourceKind};
pub use upstream::{HttpUpstream, Relayed, Upstream, UpstreamCall};
