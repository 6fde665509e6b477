//! Kite Feature Gate Language Server
//!
//! A language server that decides which editor features (completions,
//! hover, definitions, signature help) apply to which files.
//!
//! This library provides:
//! - The supported file extension table
//! - Feature gate resolution against the user's disabled extensions
//! - Document selectors and dynamic capability registration
//! - Configuration and settings management

pub mod config;
pub mod constants;
pub mod extensions;
pub mod gate;
pub mod lsp;
pub mod settings;

// Re-exports for clean public API
pub use config::Config;
pub use extensions::{is_supported_file, supported_extensions};
pub use gate::{ConfigSource, FeatureCategory, FeatureGateResolver, Gate};
pub use settings::Settings;
