use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::AppError;
use shared_utils::time::ZoneClock;

use crate::models::BookAppointmentRequest;
use crate::services::{
    AppointmentListService, AppointmentRepository, AvailabilityService, BookingService,
    SupabaseAppointmentRepository,
};

#[derive(Debug, Deserialize)]
pub struct BookableHoursQuery {
    pub date: NaiveDate,
}

fn repository(state: &AppConfig) -> Arc<dyn AppointmentRepository> {
    Arc::new(SupabaseAppointmentRepository::new(state))
}

#[axum::debug_handler]
pub async fn get_bookable_hours(
    State(state): State<Arc<AppConfig>>,
    Path(professional_id): Path<Uuid>,
    Query(query): Query<BookableHoursQuery>,
) -> Result<Json<Value>, AppError> {
    let service = AvailabilityService::new(
        repository(&state),
        Arc::new(ZoneClock::from_config(&state)),
    );

    let hours = service.bookable_hours(professional_id, query.date).await?;

    Ok(Json(json!({
        "professional_id": professional_id,
        "date": query.date,
        "hours": hours,
    })))
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = BookingService::new(repository(&state));

    let appointment = service.book(request).await?;

    Ok(Json(json!({ "appointment": appointment })))
}

#[axum::debug_handler]
pub async fn confirm_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = BookingService::new(repository(&state));

    let appointment = service.confirm(appointment_id).await?;

    Ok(Json(json!({ "appointment": appointment })))
}

#[axum::debug_handler]
pub async fn decline_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = BookingService::new(repository(&state));

    let appointment = service.decline(appointment_id).await?;

    Ok(Json(json!({ "appointment": appointment })))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = BookingService::new(repository(&state));

    let appointment = service.cancel(appointment_id).await?;

    Ok(Json(json!({ "appointment": appointment })))
}

#[axum::debug_handler]
pub async fn get_patient_appointments(
    State(state): State<Arc<AppConfig>>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentListService::new(
        repository(&state),
        Arc::new(ZoneClock::from_config(&state)),
    );

    let partition = service.patient_appointments(patient_id).await?;

    Ok(Json(json!({
        "patient_id": patient_id,
        "upcoming": partition.upcoming,
        "past": partition.past,
    })))
}

#[axum::debug_handler]
pub async fn get_professional_appointments(
    State(state): State<Arc<AppConfig>>,
    Path(professional_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentListService::new(
        repository(&state),
        Arc::new(ZoneClock::from_config(&state)),
    );

    let partition = service.professional_appointments(professional_id).await?;

    Ok(Json(json!({
        "professional_id": professional_id,
        "upcoming": partition.upcoming,
        "past": partition.past,
    })))
}
