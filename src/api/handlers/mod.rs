//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod images;

pub use health::health_handler;
pub use images::{classify_handler, not_found_handler, resolve_handler};
