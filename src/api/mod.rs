//! Request adapter: axum handlers and routing.

mod bands;
mod health;

use crate::service::BandService;
use crate::store::BandStore;
use axum::{
    routing::{get, patch},
    Router,
};
use std::sync::Arc;
use std::time::Instant;

/// Shared state for all endpoints.
pub struct AppState<S> {
    pub service: Arc<BandService<S>>,
    pub start_time: Instant,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            start_time: self.start_time,
        }
    }
}

impl<S: BandStore> AppState<S> {
    pub fn new(service: BandService<S>) -> Self {
        Self {
            service: Arc::new(service),
            start_time: Instant::now(),
        }
    }
}

/// Build the full application router over any band store.
pub fn router<S: BandStore + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health::health_check::<S>))
        .route(
            "/api/bands",
            get(bands::list_bands::<S>)
                .post(bands::create_band::<S>)
                .put(bands::update_band::<S>),
        )
        .route(
            "/api/bands/:name",
            get(bands::get_band::<S>).delete(bands::delete_band::<S>),
        )
        .route(
            "/api/bands/:name/:rate",
            patch(bands::patch_band_rating::<S>),
        )
        .with_state(state)
}
