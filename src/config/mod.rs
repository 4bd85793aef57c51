//! Logger configuration.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LogConfig::apply_env_overrides (CTXLOG_LEVEL, CTXLOG_FORMAT)
//!     → LogConfig::to_options
//!     → Logger::from_config
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so an empty file is a valid config
//! - Validation separates syntactic (serde) from semantic checks and
//!   returns every error, not just the first
//! - `default_attrs` keeps file order, since attribute order is observable

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{LogConfig, LogFormat, LogOutput};
pub use validation::{validate_config, ValidationError};
