// JSON API surface.

use std::sync::Arc;

use axum::Router;

use crate::store::TaskStore;

pub mod todos;

/// Shared handler state: the single process-wide store.
#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<dyn TaskStore>,
}

impl ApiState {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }
}

pub fn router(store: Arc<dyn TaskStore>) -> Router {
    todos::router(ApiState::new(store))
}
