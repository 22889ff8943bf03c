//! Conflict guard: the last check before a slot is claimed.
//!
//! Eligibility is computed against a snapshot the user may have been looking
//! at for minutes, so the commit path re-runs the overlap check against live
//! state. Read-then-write alone is racy with multiple writers; the store's
//! `confirm` must make the check and the status transition atomic per
//! photographer. [`InMemorySlotStore`] does this under one mutex and is the
//! reference for what a database-backed store must guarantee (serializable
//! transaction or an exclusion constraint over photographer and time range).

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use chrono::{NaiveDate, NaiveTime};
use tracing::{info, warn};

use crate::calendar::{TimeSlot, is_blocked};
use crate::error::EngineError;
use crate::model::{Booking, BookingId, PhotographerId, TimeOff, end_of_span};

/// Verifies that the proposed slot does not overlap any confirmed/completed
/// booking or time off for the photographer. `excluding_booking_id` lets a
/// reschedule ignore the booking's own prior slot.
pub fn assert_no_conflict(
    photographer_id: &PhotographerId,
    date: NaiveDate,
    start: NaiveTime,
    duration_minutes: i64,
    excluding_booking_id: Option<&BookingId>,
    bookings: &[Booking],
    time_off: &[TimeOff],
) -> Result<(), EngineError> {
    let end = end_of_span(start, duration_minutes)?;
    let slot = TimeSlot { start, end };
    if is_blocked(photographer_id, date, slot, excluding_booking_id, bookings, time_off) {
        return Err(EngineError::SlotConflict {
            photographer_id: photographer_id.clone(),
            date,
            start,
        });
    }
    Ok(())
}

/// Persistence seam for the commit path.
///
/// Implementations must make `confirm` atomic with respect to concurrent
/// confirmations for the same photographer: of two racing calls for
/// overlapping slots, exactly one may succeed. Persistence failures
/// propagate unmodified; the engine never retries a slot claim on its own.
pub trait SlotStore {
    /// Claims the slot for a Draft booking, transitioning it to Confirmed.
    fn confirm(
        &self,
        booking_id: &BookingId,
        photographer_id: &PhotographerId,
        date: NaiveDate,
        start: NaiveTime,
        duration_minutes: i64,
    ) -> Result<Booking, EngineError>;

    /// Cancels a Confirmed booking, freeing its slot in the same operation.
    fn cancel(&self, booking_id: &BookingId) -> Result<Booking, EngineError>;
}

/// Commit interface: runs the store's atomic check-and-claim and logs the
/// outcome. Callers handle [`EngineError::SlotConflict`] by re-running
/// eligibility for a fresh candidate list.
pub fn confirm_booking<S: SlotStore>(
    store: &S,
    booking_id: &BookingId,
    photographer_id: &PhotographerId,
    date: NaiveDate,
    start: NaiveTime,
    duration_minutes: i64,
) -> Result<Booking, EngineError> {
    match store.confirm(booking_id, photographer_id, date, start, duration_minutes) {
        Ok(booking) => {
            info!(
                booking = %booking_id,
                photographer = %photographer_id,
                %date,
                %start,
                "booking confirmed"
            );
            Ok(booking)
        }
        Err(err) => {
            if matches!(err, EngineError::SlotConflict { .. }) {
                warn!(
                    booking = %booking_id,
                    photographer = %photographer_id,
                    %date,
                    %start,
                    "slot conflict at commit time"
                );
            }
            Err(err)
        }
    }
}

/// Mutex-serialized store over an owned booking set.
///
/// The conflict check and the Draft -> Confirmed transition happen under a
/// single lock, which is what closes the race window between viewing the
/// eligible list and clicking confirm.
pub struct InMemorySlotStore {
    state: Mutex<StoreState>,
}

struct StoreState {
    bookings: BTreeMap<BookingId, Booking>,
    time_off: Vec<TimeOff>,
}

impl InMemorySlotStore {
    pub fn new(bookings: Vec<Booking>, time_off: Vec<TimeOff>) -> Self {
        let bookings = bookings
            .into_iter()
            .map(|booking| (booking.id.clone(), booking))
            .collect();
        Self {
            state: Mutex::new(StoreState { bookings, time_off }),
        }
    }

    /// Snapshot of one booking's current state.
    pub fn booking(&self, id: &BookingId) -> Option<Booking> {
        self.lock().bookings.get(id).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SlotStore for InMemorySlotStore {
    fn confirm(
        &self,
        booking_id: &BookingId,
        photographer_id: &PhotographerId,
        date: NaiveDate,
        start: NaiveTime,
        duration_minutes: i64,
    ) -> Result<Booking, EngineError> {
        let mut state = self.lock();

        if !state.bookings.contains_key(booking_id) {
            return Err(EngineError::UnknownBooking(booking_id.clone()));
        }

        let snapshot: Vec<Booking> = state.bookings.values().cloned().collect();
        assert_no_conflict(
            photographer_id,
            date,
            start,
            duration_minutes,
            Some(booking_id),
            &snapshot,
            &state.time_off,
        )?;

        let booking = state
            .bookings
            .get_mut(booking_id)
            .ok_or_else(|| EngineError::UnknownBooking(booking_id.clone()))?;
        booking.confirm(photographer_id.clone(), date, start, duration_minutes)?;
        Ok(booking.clone())
    }

    fn cancel(&self, booking_id: &BookingId) -> Result<Booking, EngineError> {
        let mut state = self.lock();
        let booking = state
            .bookings
            .get_mut(booking_id)
            .ok_or_else(|| EngineError::UnknownBooking(booking_id.clone()))?;
        booking.cancel()?;
        Ok(booking.clone())
    }
}
