#![allow(dead_code)]

use std::sync::Arc;

use image_url_resolver::application::services::ImageService;
use image_url_resolver::domain::HostAllowlist;
use image_url_resolver::domain::entities::BackendOrigin;
use image_url_resolver::state::AppState;
use image_url_resolver::utils::url_normalizer::UrlNormalizer;

pub const TEST_ORIGIN: &str = "http://localhost:5000";

pub fn create_test_state() -> AppState {
    create_state(Some(TEST_ORIGIN), HostAllowlist::default(), 100)
}

pub fn create_test_state_without_origin() -> AppState {
    create_state(None, HostAllowlist::default(), 100)
}

pub fn create_state(origin: Option<&str>, allowlist: HostAllowlist, max_batch_size: usize) -> AppState {
    let origin = origin.map(|o| BackendOrigin::parse(o).unwrap());
    let service = ImageService::new(UrlNormalizer::new(origin), allowlist);

    AppState::new(Arc::new(service), max_batch_size)
}
