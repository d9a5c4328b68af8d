//! TripAdvisor proxy library.
//!
//! Hides the upstream API key from browser clients and normalizes the few
//! parameters the upstream cares about before relaying each call.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
