//! Error taxonomy for the booking engine.
//!
//! Malformed-input kinds (`InvalidCoordinate`, `InvalidDuration`,
//! `CrossesMidnight`) mean the caller must fix the request, not retry.
//! `SlotConflict` is recoverable: re-run eligibility to get a fresh
//! candidate list. An empty eligibility result is not an error.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::{BookingId, BookingStatus, PhotographerId, ServiceId};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Latitude outside [-90, 90], longitude outside [-180, 180], or NaN.
    #[error("invalid coordinate: lat {lat}, lng {lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// Requested durations must be strictly positive.
    #[error("duration must be positive, got {minutes} minutes")]
    InvalidDuration { minutes: i64 },

    /// Bookings are single-calendar-day; a span ending past midnight is rejected.
    #[error("span of {minutes} minutes from {start} crosses midnight")]
    CrossesMidnight { start: NaiveTime, minutes: i64 },

    /// A time-off range must start strictly before it ends.
    #[error("time off must start before it ends ({start} .. {end})")]
    InvalidTimeOff {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// A requested service id is not in the service catalog.
    #[error("unknown service {0}")]
    UnknownService(ServiceId),

    /// Booking status transition not allowed by the lifecycle.
    #[error("illegal booking transition {from:?} -> {to:?}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// Confirming requires photographer, date, and start time to be set.
    #[error("booking cannot leave Draft without photographer, date, and start time")]
    MissingAssignment,

    /// Referenced booking does not exist in the store.
    #[error("booking {0} not found")]
    UnknownBooking(BookingId),

    /// The proposed slot overlaps a confirmed booking or time off.
    #[error("slot conflict for photographer {photographer_id} on {date} at {start}")]
    SlotConflict {
        photographer_id: PhotographerId,
        date: NaiveDate,
        start: NaiveTime,
    },
}
