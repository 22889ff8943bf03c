//! Eligibility filter: which photographers can take a booking request.
//!
//! Runs a short-circuiting predicate pipeline per candidate, cheapest checks
//! first: active, not blocked by the client, offers every requested service,
//! within service radius, and has a contiguous free span for the summed
//! duration. Candidates are independent, so the roster is evaluated in
//! parallel; output keeps roster order. Ordering by preference is
//! [`crate::ranking`]'s job.

use rayon::prelude::*;
use tracing::debug;

use crate::calendar::has_contiguous_free_span;
use crate::error::EngineError;
use crate::geo::distance_km;
use crate::model::{
    Booking, BookingDraft, Client, EligiblePhotographer, Photographer, ServiceCatalog, TimeOff,
};

/// Filters `roster` down to photographers able to take `draft`.
///
/// An empty result is a legitimate outcome (no coverage for this request),
/// not an error. Malformed input (bad coordinates, unknown service, span
/// crossing midnight) fails the whole call; eligibility never partially
/// succeeds on stale or unchecked data.
pub fn find_eligible(
    draft: &BookingDraft,
    roster: &[Photographer],
    client: &Client,
    catalog: &ServiceCatalog,
    bookings: &[Booking],
    time_off: &[TimeOff],
) -> Result<Vec<EligiblePhotographer>, EngineError> {
    let required_minutes = catalog.total_minutes(&draft.service_ids)?;

    let evaluated: Vec<Option<EligiblePhotographer>> = roster
        .par_iter()
        .map(|candidate| evaluate(candidate, draft, client, required_minutes, bookings, time_off))
        .collect::<Result<_, _>>()?;

    Ok(evaluated.into_iter().flatten().collect())
}

fn evaluate(
    candidate: &Photographer,
    draft: &BookingDraft,
    client: &Client,
    required_minutes: i64,
    bookings: &[Booking],
    time_off: &[TimeOff],
) -> Result<Option<EligiblePhotographer>, EngineError> {
    if !candidate.active {
        debug!(photographer = %candidate.id, "rejected: inactive");
        return Ok(None);
    }

    if client.blocked_photographers.contains(&candidate.id) {
        debug!(photographer = %candidate.id, client = %client.id, "rejected: blocked by client");
        return Ok(None);
    }

    if !draft.service_ids.iter().all(|s| candidate.services.contains(s)) {
        debug!(photographer = %candidate.id, "rejected: missing requested service");
        return Ok(None);
    }

    let distance = distance_km(candidate.base, draft.address)?;
    if distance > candidate.radius_km {
        debug!(
            photographer = %candidate.id,
            distance_km = distance,
            radius_km = candidate.radius_km,
            "rejected: outside service radius"
        );
        return Ok(None);
    }

    let free = has_contiguous_free_span(
        candidate,
        draft.date,
        draft.start_time,
        required_minutes,
        bookings,
        time_off,
    )?;
    if !free {
        debug!(
            photographer = %candidate.id,
            date = %draft.date,
            start = %draft.start_time,
            "rejected: no contiguous free span"
        );
        return Ok(None);
    }

    Ok(Some(EligiblePhotographer {
        photographer_id: candidate.id.clone(),
        distance_km: distance,
        daily_load: daily_load(candidate, draft.date, bookings),
    }))
}

/// Confirmed/completed bookings the photographer already has on the date.
fn daily_load(
    photographer: &Photographer,
    date: chrono::NaiveDate,
    bookings: &[Booking],
) -> usize {
    bookings
        .iter()
        .filter(|booking| {
            booking.photographer_id.as_ref() == Some(&photographer.id)
                && booking.status.blocks_slot()
                && booking.date == Some(date)
        })
        .count()
}
