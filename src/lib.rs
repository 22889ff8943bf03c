//! booking-engine core
//!
//! Eligibility, ranking, and conflict checking for assigning photographers
//! to booking requests. All state (roster, existing bookings, time off) is
//! passed in as explicit snapshots; the engine performs no data access of
//! its own, so every decision is reproducible in tests.

pub mod calendar;
pub mod conflict;
pub mod eligibility;
pub mod error;
pub mod geo;
pub mod model;
pub mod ranking;
pub mod role;
