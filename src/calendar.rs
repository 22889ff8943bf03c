//! Availability calendar: free slots for a photographer on a date.
//!
//! Slots come from the weekly template expanded to the photographer's
//! `slot_minutes` grain. Intervals are half-open `[start, end)`, so a
//! booking ending at 10:00 and another starting at 10:00 do not conflict.

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineError;
use crate::model::{Booking, BookingId, Photographer, PhotographerId, TimeOff, end_of_span};

/// One bookable interval, half-open `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeSlot {
    /// Positive-duration overlap under half-open semantics.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Free slots for `photographer` on `date`, in start order.
///
/// Template entries for the date's weekday are expanded to
/// `[start, start + slot_minutes)`, then any slot intersecting a
/// confirmed/completed booking on that date or a time-off range is removed.
/// A template entry whose slot would not end within the day is skipped:
/// bookings are single-calendar-day, and one photographer's template data
/// must never fail an eligibility call for the rest of the roster.
pub fn free_slots(
    photographer: &Photographer,
    date: NaiveDate,
    bookings: &[Booking],
    time_off: &[TimeOff],
) -> Vec<TimeSlot> {
    let mut slots = Vec::new();
    for &start in photographer.availability.slot_starts(date.weekday()) {
        let Ok(end) = end_of_span(start, i64::from(photographer.slot_minutes)) else {
            debug!(
                photographer = %photographer.id,
                %start,
                slot_minutes = photographer.slot_minutes,
                "skipping template slot that leaves the calendar day"
            );
            continue;
        };
        let slot = TimeSlot { start, end };
        if !is_blocked(&photographer.id, date, slot, None, bookings, time_off) {
            slots.push(slot);
        }
    }
    slots.sort_by_key(|slot| slot.start);
    slots
}

/// Whether the free slots starting exactly at `desired_start` are adjacent
/// and jointly cover `required_minutes`.
///
/// Multi-slot bookings (a 90-minute shoot over two 60-minute slots) qualify
/// only when every needed slot is free and back-to-back; free minutes
/// elsewhere in the day do not count.
pub fn has_contiguous_free_span(
    photographer: &Photographer,
    date: NaiveDate,
    desired_start: NaiveTime,
    required_minutes: i64,
    bookings: &[Booking],
    time_off: &[TimeOff],
) -> Result<bool, EngineError> {
    let needed_end = end_of_span(desired_start, required_minutes)?;
    let slots = free_slots(photographer, date, bookings, time_off);

    let mut cursor = desired_start;
    for slot in slots.iter().skip_while(|slot| slot.start < desired_start) {
        if slot.start != cursor {
            break;
        }
        cursor = slot.end;
        if cursor >= needed_end {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Whether the interval `slot` on `date` intersects a blocking booking or a
/// time-off range for the photographer. Bookings are compared as same-day
/// times; time off is compared in datetime space since ranges may span days.
/// `excluding` skips one booking id, so a reschedule can ignore its own
/// prior slot.
pub(crate) fn is_blocked(
    photographer_id: &PhotographerId,
    date: NaiveDate,
    slot: TimeSlot,
    excluding: Option<&BookingId>,
    bookings: &[Booking],
    time_off: &[TimeOff],
) -> bool {
    let booked = bookings.iter().any(|booking| {
        Some(&booking.id) != excluding
            && booking.photographer_id.as_ref() == Some(photographer_id)
            && booking.status.blocks_slot()
            && booking.date == Some(date)
            && match (booking.start_time, booking.end_time) {
                (Some(start), Some(end)) => slot.overlaps(&TimeSlot { start, end }),
                _ => false,
            }
    });
    if booked {
        return true;
    }

    let slot_start = date.and_time(slot.start);
    let slot_end = date.and_time(slot.end);
    time_off.iter().any(|range| {
        range.photographer_id == *photographer_id
            && range.start < slot_end
            && slot_start < range.end
    })
}
