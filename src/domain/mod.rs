//! # Domain Layer
//!
//! Negotiation models, session state, and error types.
//! This layer is independent of transport and presentation concerns.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
