use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn schedule_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route(
            "/{professional_id}/schedule",
            get(handlers::get_schedule).put(handlers::put_schedule),
        )
        .with_state(state)
}
