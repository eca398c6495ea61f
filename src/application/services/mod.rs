//! Services for the application layer.

pub mod image_service;

pub use image_service::ImageService;
