//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → DashboardConfig (validated, immutable)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → server swaps in a GatewayClient built from the new [gateway] section
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Only the [gateway] section is applied on reload; listener, limits and
//!   the template catalog are fixed for the life of the process
//! - Gateway credentials are never part of this config: they arrive per call

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{
    DashboardConfig, GatewayConfig, ListenerConfig, ObservabilityConfig, SecurityConfig,
    TemplatesConfig,
};
