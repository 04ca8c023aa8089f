//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer; readings are served from the poller snapshots without recomputing.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::Stream;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use super::dto::{
    CalendarReading, GregorianRequest, GregorianResponse, HealthResponse, JulianDayRequest,
    JulianDayResponse, SiderealReading,
};
use super::error::AppError;
use super::state::AppState;
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// How often the SSE stream checks for a new sidereal reading.
const STREAM_POLL_INTERVAL: Duration = Duration::from_millis(200);

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        calendar_reform: state.reform.to_string(),
        sidereal_ready: state.readings.sidereal.is_ready(),
        calendar_ready: state.readings.calendar.is_ready(),
    }))
}

// =============================================================================
// Conversions
// =============================================================================

/// POST /v1/convert/julian-day
///
/// Convert a calendar date (UTC) to a Julian Day.
pub async fn convert_to_julian_day(
    State(state): State<AppState>,
    payload: Result<Json<JulianDayRequest>, JsonRejection>,
) -> HandlerResult<JulianDayResponse> {
    let Json(request) = payload?;
    let response = services::convert_to_julian_day(&request, state.reform)?;
    Ok(Json(response))
}

/// POST /v1/convert/gregorian
///
/// Convert a Julian Day to a calendar date (UTC).
pub async fn convert_to_gregorian(
    State(state): State<AppState>,
    payload: Result<Json<GregorianRequest>, JsonRejection>,
) -> HandlerResult<GregorianResponse> {
    let Json(request) = payload?;
    let response = services::convert_to_gregorian(&request, state.reform)?;
    Ok(Json(response))
}

// =============================================================================
// Readings
// =============================================================================

/// GET /v1/sidereal
///
/// Latest sidereal clock reading.
pub async fn get_sidereal(State(state): State<AppState>) -> HandlerResult<SiderealReading> {
    let reading = state
        .readings
        .sidereal
        .latest()
        .ok_or_else(|| AppError::NotReady("No sidereal reading published yet".to_string()))?;
    Ok(Json(SiderealReading::clone(&reading)))
}

/// GET /v1/calendar
///
/// Latest calendar reading.
pub async fn get_calendar(State(state): State<AppState>) -> HandlerResult<CalendarReading> {
    let reading = state
        .readings
        .calendar
        .latest()
        .ok_or_else(|| AppError::NotReady("No calendar reading published yet".to_string()))?;
    Ok(Json(CalendarReading::clone(&reading)))
}

/// GET /v1/sidereal/stream
///
/// Server-Sent Events: one `sidereal` event per newly published reading.
pub async fn stream_sidereal(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let reader = state.readings.sidereal.clone();
    let stream = async_stream::stream! {
        let mut last: Option<Arc<SiderealReading>> = None;
        loop {
            if let Some(reading) = reader.latest() {
                let is_new = last
                    .as_ref()
                    .map_or(true, |previous| !Arc::ptr_eq(previous, &reading));
                if is_new {
                    let event_data = serde_json::to_string(reading.as_ref()).unwrap_or_default();
                    yield Ok(Event::default().event("sidereal").data(event_data));
                    last = Some(reading);
                }
            }

            tokio::time::sleep(STREAM_POLL_INTERVAL).await;
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
