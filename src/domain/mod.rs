//! Domain layer: the data the resolver works on.
//!
//! - [`entities`] - Origins, upstream image records and resolved images
//! - [`host_allowlist`] - Hosts that skip image optimization
//!
//! Nothing here performs I/O. Normalization itself lives in
//! [`crate::utils::url_normalizer`]; [`crate::application::services`]
//! combines both.

pub mod entities;
pub mod host_allowlist;

pub use host_allowlist::{HostAllowlist, is_unoptimized_host};
