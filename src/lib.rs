//! Configuration management backend for an API gateway.
//!
//! Proxies the dashboard UI to the gateway's admin API, serves plugin
//! templates and recipes, and reconciles whole configuration documents
//! (export, diff, plan, apply) against a live gateway.

pub mod codec;
pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod reconcile;
pub mod resources;
pub mod templates;

pub use codec::{Format, ParseError};
pub use config::DashboardConfig;
pub use gateway::{Credentials, GatewayClient, GatewayError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use reconcile::{diff, ChangeSummary};
pub use resources::{Collection, ConfigurationSet};
