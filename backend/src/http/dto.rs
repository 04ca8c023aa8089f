//! Data Transfer Objects for the HTTP API.
//!
//! Conversion requests and responses come straight from the service layer;
//! readings are the snapshot types published by the pollers.

use serde::{Deserialize, Serialize};

pub use crate::models::{CalendarReading, SiderealReading};
pub use crate::services::{GregorianRequest, GregorianResponse, JulianDayRequest, JulianDayResponse};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Crate version
    pub version: String,
    /// Calendar policy in effect
    pub calendar_reform: String,
    /// Whether each poller has published at least once
    pub sidereal_ready: bool,
    pub calendar_ready: bool,
}
