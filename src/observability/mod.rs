//! Process-level diagnostics.
//!
//! # Data Flow
//! ```text
//! ctxlog internals (handler failures, config loading)
//!     → tracing events on target `ctxlog`
//!     → logging.rs (registry + EnvFilter + fmt layer)
//!     → stderr
//! ```
//!
//! # Design Decisions
//! - The facade itself never installs a global subscriber; binaries opt in
//! - `RUST_LOG` wins over the built-in default directive

pub mod logging;

pub use logging::{init_tracing, TracingInitError};
