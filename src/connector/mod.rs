//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Chat-completion HTTP client (AI/ML API and compatible endpoints)
//! - Image attachment encoding
//! - Offline mock service
//! - CLI wiring (container, controllers, router)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
