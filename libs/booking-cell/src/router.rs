use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn booking_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/appointments", post(handlers::book_appointment))
        .route("/appointments/{appointment_id}", delete(handlers::cancel_appointment))
        .route(
            "/appointments/{appointment_id}/confirm",
            patch(handlers::confirm_appointment),
        )
        .route(
            "/appointments/{appointment_id}/decline",
            patch(handlers::decline_appointment),
        )
        .route(
            "/professionals/{professional_id}/bookable-hours",
            get(handlers::get_bookable_hours),
        )
        .route(
            "/professionals/{professional_id}/appointments",
            get(handlers::get_professional_appointments),
        )
        .route(
            "/patients/{patient_id}/appointments",
            get(handlers::get_patient_appointments),
        )
        .with_state(state)
}
