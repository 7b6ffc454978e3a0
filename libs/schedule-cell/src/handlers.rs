use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::AppError;

use crate::models::WeeklyAvailability;
use crate::services::{ScheduleEditSession, ScheduleStore, SupabaseScheduleStore};

/// Current schedule in canonical form, whatever encoding is stored.
#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<AppConfig>>,
    Path(professional_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let store = SupabaseScheduleStore::new(&state);

    let raw = store.load(professional_id).await?;
    let schedule = WeeklyAvailability::from_raw(&raw);

    Ok(Json(json!({
        "professional_id": professional_id,
        "weekly_hours": schedule.to_persisted(),
    })))
}

/// Replace the whole schedule. The body is a day map in any accepted
/// encoding; it runs through an edit session so the same sanitation
/// and no-edit-loss rules apply as for incremental editing.
#[axum::debug_handler]
pub async fn put_schedule(
    State(state): State<Arc<AppConfig>>,
    Path(professional_id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let store = Arc::new(SupabaseScheduleStore::new(&state));

    let mut session = ScheduleEditSession::new(store, professional_id);
    session.load().await?;
    session.replace_buffer(WeeklyAvailability::from_raw(&body));
    session.save().await?;

    Ok(Json(json!({
        "professional_id": professional_id,
        "weekly_hours": session.buffer().to_persisted(),
    })))
}
