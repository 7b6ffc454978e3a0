use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{ScheduleError, LEGACY_HOURS_FIELD, WEEKLY_HOURS_FIELD};

/// Persistence seam for a professional's weekly schedule. The edit
/// session only sees raw JSON in and sanitized canonical JSON out;
/// normalization stays in `WeeklyAvailability::from_raw`.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Fetch the raw persisted schedule, whatever encoding it is in.
    async fn load(&self, professional_id: Uuid) -> Result<Value, ScheduleError>;

    /// Persist the canonical encoding. Implementations must clear the
    /// legacy field in the same write.
    async fn save(&self, professional_id: Uuid, schedule: Value) -> Result<(), ScheduleError>;
}

pub struct SupabaseScheduleStore {
    supabase: SupabaseClient,
}

impl SupabaseScheduleStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }
}

#[async_trait]
impl ScheduleStore for SupabaseScheduleStore {
    async fn load(&self, professional_id: Uuid) -> Result<Value, ScheduleError> {
        debug!("Fetching schedule for professional: {}", professional_id);

        let path = format!(
            "/rest/v1/professionals?id=eq.{}&select={},{}",
            professional_id, WEEKLY_HOURS_FIELD, LEGACY_HOURS_FIELD
        );

        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| ScheduleError::Unavailable(e.to_string()))?;

        result
            .into_iter()
            .next()
            .ok_or_else(|| ScheduleError::Unavailable("Professional not found".to_string()))
    }

    async fn save(&self, professional_id: Uuid, schedule: Value) -> Result<(), ScheduleError> {
        debug!("Persisting schedule for professional: {}", professional_id);

        let body = json!({
            WEEKLY_HOURS_FIELD: schedule,
            LEGACY_HOURS_FIELD: Value::Null,
        });

        let path = format!("/rest/v1/professionals?id=eq.{}", professional_id);
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Value> = self
            .supabase
            .request_with_headers(Method::PATCH, &path, Some(body), Some(headers))
            .await
            .map_err(|e| ScheduleError::PersistFailed(e.to_string()))?;

        if result.is_empty() {
            return Err(ScheduleError::PersistFailed(
                "Professional not found".to_string(),
            ));
        }

        Ok(())
    }
}
