//! Service layer between the numerical core and the outside world.
//!
//! Conversions validate their requests before calling into `meeus_core`;
//! pollers publish readings computed from the wall clock into snapshots that
//! the HTTP layer reads.

pub mod conversion;
pub mod error;
pub mod poller;
pub mod readings;
pub mod snapshot;

pub use conversion::{
    convert_to_gregorian, convert_to_julian_day, julian_day_span, GregorianRequest,
    GregorianResponse, JulianDayRequest, JulianDayResponse,
};
pub use error::{ServiceError, ServiceResult};
pub use poller::{spawn_pollers, PollerHandle, PollerSettings, Readings};
pub use readings::{calendar_reading, julian_day_at, sidereal_reading};
pub use snapshot::{snapshot_channel, SnapshotReader, SnapshotWriter};
