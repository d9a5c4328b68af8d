//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, CORS, request ID, tracing)
//!     → handlers.rs (extract query / path, forward)
//!     → proxy subsystem (resolve, call upstream)
//!     → relayed body or mapped error back to the client
//! ```

pub mod handlers;
pub mod server;

pub use server::{build_router, AppState, HttpServer};
