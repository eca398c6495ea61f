//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::ImageService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub image_service: Arc<ImageService>,
    pub max_batch_size: usize,
}

impl AppState {
    pub fn new(image_service: Arc<ImageService>, max_batch_size: usize) -> Self {
        Self {
            image_service,
            max_batch_size,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(ImageService::from_config(config)),
            config.max_batch_size,
        )
    }
}
