//! Credential-forwarding client for the gateway's administrative API.
//!
//! # Data Flow
//! ```text
//! Credentials { base_url, api_key } (supplied per call, never stored)
//!     → client.rs (join URL, attach key header, send, normalize errors)
//!     → snapshot.rs (GET every collection → ConfigurationSet)
//!     → apply.rs (ChangeSummary → ordered PUT/POST/DELETE calls)
//! ```
//!
//! # Security Constraints
//! - The API key is attached as a header and never logged
//! - Missing base URL or key fails before any network activity
//!
//! # Design Decisions
//! - One outbound call at a time, no retries
//! - Every failure is one of four `GatewayError` kinds

pub mod apply;
pub mod client;
pub mod credentials;
pub mod error;
pub mod snapshot;

pub use apply::ApplyReport;
pub use client::{GatewayClient, GatewayResponse};
pub use credentials::Credentials;
pub use error::GatewayError;
