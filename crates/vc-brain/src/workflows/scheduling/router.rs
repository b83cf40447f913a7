use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::CalendarGateway;
use super::domain::{DayAvailability, EventTypeId, InvestorId, Slot};
use super::repository::{RepositoryError, SchedulingRepository};
use super::resolver::{AvailabilityError, AvailabilityResolver, Clock};
use crate::error::AppError;

/// Query payload shared by the slot and day-flag endpoints.
///
/// `timezone` is accepted for caller convenience and echoed back, but all
/// stored times are naive UTC and the slot math does not re-project them.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub investor_id: InvestorId,
    pub event_type_id: EventTypeId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SlotsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    pub slots: Vec<Slot>,
}

#[derive(Debug, Serialize)]
pub struct DaysResponse {
    pub days: Vec<DayAvailability>,
}

/// Router builder exposing the availability computations over HTTP.
pub fn scheduling_router<R, C, K>(resolver: Arc<AvailabilityResolver<R, C, K>>) -> Router
where
    R: SchedulingRepository + 'static,
    C: CalendarGateway + 'static,
    K: Clock + 'static,
{
    Router::new()
        .route("/api/v1/scheduling/slots", post(slots_handler::<R, C, K>))
        .route("/api/v1/scheduling/days", post(days_handler::<R, C, K>))
        .with_state(resolver)
}

pub(crate) async fn slots_handler<R, C, K>(
    State(resolver): State<Arc<AvailabilityResolver<R, C, K>>>,
    Json(query): Json<AvailabilityQuery>,
) -> Result<Json<SlotsResponse>, AppError>
where
    R: SchedulingRepository + 'static,
    C: CalendarGateway + 'static,
    K: Clock + 'static,
{
    let AvailabilityQuery {
        investor_id,
        event_type_id,
        start_date,
        end_date,
        timezone,
    } = query;

    let slots = run_resolution(move || {
        resolver.available_slots(&investor_id, &event_type_id, start_date, end_date)
    })
    .await?;

    Ok(Json(SlotsResponse { timezone, slots }))
}

pub(crate) async fn days_handler<R, C, K>(
    State(resolver): State<Arc<AvailabilityResolver<R, C, K>>>,
    Json(query): Json<AvailabilityQuery>,
) -> Result<Json<DaysResponse>, AppError>
where
    R: SchedulingRepository + 'static,
    C: CalendarGateway + 'static,
    K: Clock + 'static,
{
    let AvailabilityQuery {
        investor_id,
        event_type_id,
        start_date,
        end_date,
        ..
    } = query;

    let days = run_resolution(move || {
        resolver.available_days(&investor_id, &event_type_id, start_date, end_date)
    })
    .await?;

    Ok(Json(DaysResponse { days }))
}

/// The resolver is synchronous and may block on calendar HTTP calls, so it
/// runs on the blocking pool rather than a runtime worker.
async fn run_resolution<T, F>(work: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, AvailabilityError> + Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => result.map_err(AppError::from),
        Err(join_err) => Err(AppError::from(AvailabilityError::Repository(
            RepositoryError::Unavailable(format!("availability worker failed: {join_err}")),
        ))),
    }
}
