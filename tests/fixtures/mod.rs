//! Test fixtures for booking-engine.
//!
//! Builders with sensible defaults for photographers, drafts, and clients,
//! plus a small real-city coordinate set (São Paulo metro area).

use std::collections::BTreeSet;

use booking_engine::geo::Coordinates;
use booking_engine::model::{
    Booking, BookingDraft, BookingId, Client, ClientId, Photographer, PhotographerId,
    ServiceCatalog, ServiceId, TimeOff, TimeOffId, WeeklyTemplate,
};
use chrono::{NaiveDate, NaiveTime, Weekday};

/// São Paulo city center.
pub const SAO_PAULO: Coordinates = Coordinates { lat: -23.5505, lng: -46.6333 };
/// Guarulhos, ~17 km northeast of the center.
pub const GUARULHOS: Coordinates = Coordinates { lat: -23.4543, lng: -46.5337 };
/// Campinas, ~90 km northwest, outside any metro radius.
pub const CAMPINAS: Coordinates = Coordinates { lat: -22.9099, lng: -47.0626 };

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// 2025-03-10 is a Monday.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

/// Catalog used across scenarios: foto 60min, video 30min, drone 45min.
pub fn catalog() -> ServiceCatalog {
    ServiceCatalog::new()
        .with_service(ServiceId::new("foto"), 60)
        .with_service(ServiceId::new("video"), 30)
        .with_service(ServiceId::new("drone"), 45)
}

/// Builder for test photographers with sensible defaults: active, based at
/// (0, 0), 20 km radius, 60-minute slots, Monday 09:00/10:00/11:00, offers
/// "foto".
#[derive(Clone, Debug)]
pub struct PhotographerBuilder {
    photographer: Photographer,
}

impl PhotographerBuilder {
    pub fn new(id: &str) -> Self {
        let mut availability = WeeklyTemplate::default();
        availability.set(Weekday::Mon, vec![time(9, 0), time(10, 0), time(11, 0)]);
        Self {
            photographer: Photographer {
                id: PhotographerId::new(id),
                services: BTreeSet::from([ServiceId::new("foto")]),
                base: Coordinates::new(0.0, 0.0),
                radius_km: 20.0,
                slot_minutes: 60,
                availability,
                active: true,
            },
        }
    }

    pub fn base(mut self, coordinates: Coordinates) -> Self {
        self.photographer.base = coordinates;
        self
    }

    pub fn radius_km(mut self, radius_km: f64) -> Self {
        self.photographer.radius_km = radius_km;
        self
    }

    pub fn slot_minutes(mut self, slot_minutes: u32) -> Self {
        self.photographer.slot_minutes = slot_minutes;
        self
    }

    pub fn offers(mut self, service: &str) -> Self {
        self.photographer.services.insert(ServiceId::new(service));
        self
    }

    pub fn slots_on(mut self, weekday: Weekday, starts: Vec<NaiveTime>) -> Self {
        self.photographer.availability.set(weekday, starts);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.photographer.active = false;
        self
    }

    pub fn build(self) -> Photographer {
        self.photographer
    }
}

pub fn draft_at(address: Coordinates, start: NaiveTime, services: &[&str]) -> BookingDraft {
    BookingDraft {
        client_id: ClientId::new("client-1"),
        service_ids: services.iter().map(|s| ServiceId::new(*s)).collect(),
        address,
        date: monday(),
        start_time: start,
    }
}

pub fn client() -> Client {
    Client::new(ClientId::new("client-1"))
}

pub fn confirmed_booking(
    id: &str,
    photographer: &str,
    date: NaiveDate,
    start: NaiveTime,
    minutes: i64,
) -> Booking {
    let mut booking = Booking::draft(
        BookingId::new(id),
        ClientId::new("other-client"),
        vec![ServiceId::new("foto")],
        Coordinates::new(0.0, 0.0),
    );
    booking
        .confirm(PhotographerId::new(photographer), date, start, minutes)
        .unwrap();
    booking
}

pub fn time_off(
    id: &str,
    photographer: &str,
    start: chrono::NaiveDateTime,
    end: chrono::NaiveDateTime,
) -> TimeOff {
    TimeOff::new(
        TimeOffId::new(id),
        PhotographerId::new(photographer),
        start,
        end,
    )
    .unwrap()
}
