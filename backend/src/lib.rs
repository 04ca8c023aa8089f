//! # Meeus Astronomy Service
//!
//! Calendar and sidereal-time service built on the [`meeus_core`] algorithms.
//!
//! The crate wraps the pure conversions of `meeus-core` with the pieces a
//! running service needs: validated request handling, background pollers that
//! keep a current sidereal clock and calendar reading, configuration, and an
//! Axum REST API.
//!
//! ## Architecture
//!
//! - [`config`]: TOML configuration with environment overrides
//! - [`models`]: Observer location and published reading types
//! - [`services`]: Conversions, reading computation, snapshots and pollers
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Example
//!
//! ```
//! use meeus_astronomy::services::{convert_to_julian_day, JulianDayRequest};
//! use meeus_core::CalendarReform;
//!
//! let request = JulianDayRequest::new(1957, 10, 4).at(19, 26, 24.0);
//! let response = convert_to_julian_day(&request, CalendarReform::default()).unwrap();
//! assert_eq!(response.julian_day, 2_436_116.31);
//! ```

pub mod config;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

pub use meeus_core;
