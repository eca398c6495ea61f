//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`BackendOrigin`] - Validated base URL for relative image paths
//! - [`ImageRecord`] - One upstream `images[]` element
//! - [`ResolvedImage`] - Normalized `src` plus optimizer decision

pub mod backend_origin;
pub mod image;

pub use backend_origin::{BackendOrigin, OriginError};
pub use image::{ImageRecord, ResolvedImage};
