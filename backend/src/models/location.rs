use serde::{Deserialize, Serialize};

/// Observer site used for local sidereal time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObserverLocation {
    /// Display name of the site
    pub name: String,
    /// Latitude in decimal degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in decimal degrees (-180 to 180), positive east of Greenwich
    pub longitude: f64,
    /// Elevation in meters above sea level (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_m: Option<f64>,
}

impl ObserverLocation {
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        elevation_m: Option<f64>,
    ) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err("Latitude must be between -90 and 90 degrees".to_string());
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err("Longitude must be between -180 and 180 degrees".to_string());
        }
        if let Some(elevation) = elevation_m {
            if !elevation.is_finite() {
                return Err("Elevation must be a finite number of meters".to_string());
            }
        }
        Ok(Self {
            name: name.into(),
            latitude,
            longitude,
            elevation_m,
        })
    }

    /// Greenwich, at the prime meridian.
    pub fn greenwich() -> Self {
        Self {
            name: "Greenwich".to_string(),
            latitude: 51.4769,
            longitude: 0.0,
            elevation_m: Some(46.0),
        }
    }
}

impl Default for ObserverLocation {
    fn default() -> Self {
        Self::greenwich()
    }
}
