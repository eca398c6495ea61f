//! URL processing utilities.
//!
//! - [`url_normalizer`] - Image URL normalization pipeline
//! - [`repair_rules`] - The individual repair steps, in evaluation order
//! - [`s3_host`] - Completion of truncated object-storage hosts

pub mod repair_rules;
pub mod s3_host;
pub mod url_normalizer;
