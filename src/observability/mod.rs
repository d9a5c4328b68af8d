//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers
//!     → logging.rs (tracing events, request spans via tower_http)
//!     → metrics.rs (request counter, upstream latency histogram)
//!
//! Consumers:
//!     → stdout
//!     → Prometheus scrape (when enabled)
//! ```
//!
//! # Design Decisions
//! - The credential never appears in log fields; URLs are logged without query
//! - Request ID (x-request-id) is set on entry and echoed on the response

pub mod logging;
pub mod metrics;
