//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Dashboard UI request
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, credentials from headers)
//!     → proxy.rs (pass-through to the admin API)
//!       or handlers.rs (catalogs, export, diff, plan, apply)
//!     → error.rs (failures as {"error": ...})
//! ```

pub mod error;
pub mod handlers;
pub mod proxy;
pub mod request;
pub mod server;

pub use request::{X_GATEWAY_KEY, X_GATEWAY_URL, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
