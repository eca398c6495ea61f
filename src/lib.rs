//! # Image URL Resolver
//!
//! Repairs malformed image URLs coming from an upstream API and decides which
//! hosts should bypass image optimization.
//!
//! ## Architecture
//!
//! - **Utilities** ([`utils`]) - The normalization pipeline and its repair rules
//! - **Domain Layer** ([`domain`]) - Backend origin, image records, host allowlist
//! - **Application Layer** ([`application`]) - [`ImageService`] combining both
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Normalization
//!
//! ```
//! use image_url_resolver::prelude::*;
//!
//! let origin = BackendOrigin::parse("http://localhost:5000").unwrap();
//! let service = ImageService::new(UrlNormalizer::new(Some(origin)), HostAllowlist::default());
//!
//! let image = service.resolve(Some("example.orghttps//cdn.example.com/img.png"));
//! assert_eq!(image.src, "https://cdn.example.com/img.png");
//! assert!(!image.unoptimized);
//!
//! let image = service.resolve(Some("/uploads/x.jpg"));
//! assert_eq!(image.src, "http://localhost:5000/uploads/x.jpg");
//! assert!(image.unoptimized);
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! export BACKEND_URL="http://localhost:5000"   # Optional
//!
//! # Start the HTTP service
//! cargo run
//!
//! # Or normalize from the terminal
//! cargo run --bin imgurl -- normalize "/uploads/x.jpg"
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod state;
pub mod telemetry;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use application::services::ImageService;
pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::ImageService;
    pub use crate::domain::entities::{BackendOrigin, ImageRecord, ResolvedImage};
    pub use crate::domain::{HostAllowlist, is_unoptimized_host};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
    pub use crate::utils::url_normalizer::UrlNormalizer;
}
