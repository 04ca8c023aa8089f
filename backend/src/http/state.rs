//! Application state for the HTTP server.

use meeus_core::CalendarReform;

use crate::services::Readings;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Latest poller readings
    pub readings: Readings,
    /// Calendar policy used by the conversion endpoints
    pub reform: CalendarReform,
}

impl AppState {
    pub fn new(readings: Readings, reform: CalendarReform) -> Self {
        Self { readings, reform }
    }
}
