//! LSP Protocol Implementation
//!
//! Backend that reads settings from the client, registers the gated
//! features, and hands admitted requests to a feature provider.

pub mod backend;
pub mod document;
pub mod handlers;
pub mod provider;
pub mod registration;
pub mod server;
pub mod status;

pub use backend::Backend;
pub use provider::{FeatureProvider, NoopProvider};
