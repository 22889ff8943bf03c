//! Domain model: photographers, bookings, time off, clients, services.
//!
//! These are plain data records exchanged with the surrounding system as
//! JSON snapshots. The engine never loads them itself.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::geo::Coordinates;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(PhotographerId);
string_id!(BookingId);
string_id!(ClientId);
string_id!(ServiceId);
string_id!(TimeOffId);
string_id!(
    /// Groups time-off rows created together so they can be lifted as one.
    TimeOffBlockId
);

/// Weekly availability template: slot start times per day of week.
///
/// Each start time represents one bookable slot of the photographer's
/// `slot_minutes` grain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyTemplate {
    pub monday: Vec<NaiveTime>,
    pub tuesday: Vec<NaiveTime>,
    pub wednesday: Vec<NaiveTime>,
    pub thursday: Vec<NaiveTime>,
    pub friday: Vec<NaiveTime>,
    pub saturday: Vec<NaiveTime>,
    pub sunday: Vec<NaiveTime>,
}

impl WeeklyTemplate {
    pub fn slot_starts(&self, weekday: Weekday) -> &[NaiveTime] {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    pub fn set(&mut self, weekday: Weekday, starts: Vec<NaiveTime>) {
        match weekday {
            Weekday::Mon => self.monday = starts,
            Weekday::Tue => self.tuesday = starts,
            Weekday::Wed => self.wednesday = starts,
            Weekday::Thu => self.thursday = starts,
            Weekday::Fri => self.friday = starts,
            Weekday::Sat => self.saturday = starts,
            Weekday::Sun => self.sunday = starts,
        }
    }
}

/// A photographer's identity and capability profile.
///
/// Deactivated photographers stay on the roster (`active = false`) because
/// historical bookings reference them; they are never hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photographer {
    pub id: PhotographerId,
    pub services: BTreeSet<ServiceId>,
    pub base: Coordinates,
    pub radius_km: f64,
    /// Grain of the calendar: each template entry is one slot of this length.
    pub slot_minutes: u32,
    pub availability: WeeklyTemplate,
    pub active: bool,
}

/// Explicit unavailability override, independent of the weekly template.
///
/// Edits are delete-and-recreate; there is no mutation API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeOff {
    pub id: TimeOffId,
    pub photographer_id: PhotographerId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub block_id: Option<TimeOffBlockId>,
    pub notes: Option<String>,
}

impl TimeOff {
    /// Creates a time-off range, enforcing `start < end`.
    pub fn new(
        id: TimeOffId,
        photographer_id: PhotographerId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, EngineError> {
        if start >= end {
            return Err(EngineError::InvalidTimeOff { start, end });
        }
        Ok(Self {
            id,
            photographer_id,
            start,
            end,
            block_id: None,
            notes: None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Draft,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Whether a booking in this status occupies its photographer's slot.
    pub fn blocks_slot(self) -> bool {
        matches!(self, Self::Confirmed | Self::Completed)
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Confirmed)
                | (Self::Confirmed, Self::Completed)
                | (Self::Confirmed, Self::Cancelled)
        )
    }
}

/// The unit of demand. Drafts have no photographer or slot yet; once
/// confirmed, the slot fields are set and the booking blocks its slot until
/// completed or cancelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub client_id: ClientId,
    pub service_ids: Vec<ServiceId>,
    pub address: Coordinates,
    pub photographer_id: Option<PhotographerId>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    /// Derived from start time plus the summed service durations at confirm.
    pub end_time: Option<NaiveTime>,
    pub status: BookingStatus,
    pub broker_accompanying: bool,
}

impl Booking {
    pub fn draft(
        id: BookingId,
        client_id: ClientId,
        service_ids: Vec<ServiceId>,
        address: Coordinates,
    ) -> Self {
        Self {
            id,
            client_id,
            service_ids,
            address,
            photographer_id: None,
            date: None,
            start_time: None,
            end_time: None,
            status: BookingStatus::Draft,
            broker_accompanying: false,
        }
    }

    /// Transitions Draft -> Confirmed, assigning the slot and deriving the
    /// end time. Fails if the span would leave the calendar day.
    ///
    /// This only applies the transition; conflict checking against other
    /// bookings is [`crate::conflict`]'s job.
    pub fn confirm(
        &mut self,
        photographer_id: PhotographerId,
        date: NaiveDate,
        start_time: NaiveTime,
        duration_minutes: i64,
    ) -> Result<(), EngineError> {
        if !self.status.can_transition_to(BookingStatus::Confirmed) {
            return Err(EngineError::InvalidTransition {
                from: self.status,
                to: BookingStatus::Confirmed,
            });
        }
        let end_time = end_of_span(start_time, duration_minutes)?;
        self.photographer_id = Some(photographer_id);
        self.date = Some(date);
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self.status = BookingStatus::Confirmed;
        Ok(())
    }

    pub fn complete(&mut self) -> Result<(), EngineError> {
        self.transition(BookingStatus::Completed)
    }

    /// Cancels a confirmed booking. The slot is freed by the status change
    /// itself: a cancelled booking no longer blocks its slot.
    pub fn cancel(&mut self) -> Result<(), EngineError> {
        self.transition(BookingStatus::Cancelled)
    }

    fn transition(&mut self, next: BookingStatus) -> Result<(), EngineError> {
        if !self.status.can_transition_to(next) {
            return Err(EngineError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        if self.photographer_id.is_none() || self.date.is_none() || self.start_time.is_none() {
            return Err(EngineError::MissingAssignment);
        }
        self.status = next;
        Ok(())
    }
}

/// Computes `start + minutes`, rejecting non-positive durations and spans
/// that leave the calendar day.
pub(crate) fn end_of_span(start: NaiveTime, minutes: i64) -> Result<NaiveTime, EngineError> {
    if minutes <= 0 {
        return Err(EngineError::InvalidDuration { minutes });
    }
    let (end, wrapped) = start.overflowing_add_signed(TimeDelta::minutes(minutes));
    if wrapped != 0 {
        return Err(EngineError::CrossesMidnight { start, minutes });
    }
    Ok(end)
}

/// A booking request before any photographer is chosen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDraft {
    pub client_id: ClientId,
    pub service_ids: Vec<ServiceId>,
    pub address: Coordinates,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
}

/// The client side of a booking, including photographers this client has
/// blocked. Blocked photographers are excluded from eligibility regardless
/// of distance or availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub blocked_photographers: BTreeSet<PhotographerId>,
}

impl Client {
    pub fn new(id: ClientId) -> Self {
        Self {
            id,
            blocked_photographers: BTreeSet::new(),
        }
    }
}

/// Service durations in minutes. A draft's required span is the sum of its
/// requested services' durations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceCatalog {
    durations: BTreeMap<ServiceId, u32>,
}

impl ServiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service(mut self, id: ServiceId, duration_minutes: u32) -> Self {
        self.durations.insert(id, duration_minutes);
        self
    }

    /// Total duration of the given services in minutes.
    pub fn total_minutes(&self, service_ids: &[ServiceId]) -> Result<i64, EngineError> {
        let mut total: i64 = 0;
        for id in service_ids {
            let minutes = self
                .durations
                .get(id)
                .ok_or_else(|| EngineError::UnknownService(id.clone()))?;
            total += i64::from(*minutes);
        }
        Ok(total)
    }
}

/// One eligible candidate for a booking request. Derived per request by the
/// eligibility filter; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligiblePhotographer {
    pub photographer_id: PhotographerId,
    pub distance_km: f64,
    /// Confirmed/completed bookings already on the requested date.
    pub daily_load: usize,
}
