//! Application layer services.
//!
//! Combines the URL normalizer and the host allowlist into the operations
//! the HTTP handlers and the CLI expose.
//!
//! # Available Services
//!
//! - [`services::image_service::ImageService`] - Image reference resolution and classification

pub mod services;
