//! Great-circle distance between coordinates.
//!
//! Straight-line haversine distance is used as the eligibility filter and
//! ranking key. It ignores road networks, so it underestimates real travel;
//! acceptable because it is only compared against a photographer's own
//! service radius and against other candidates measured the same way.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    fn validate(self) -> Result<Self, EngineError> {
        let in_range = self.lat.abs() <= 90.0 && self.lng.abs() <= 180.0;
        if self.lat.is_nan() || self.lng.is_nan() || !in_range {
            return Err(EngineError::InvalidCoordinate {
                lat: self.lat,
                lng: self.lng,
            });
        }
        Ok(self)
    }
}

/// Haversine distance between two points in kilometers.
///
/// Symmetric, and zero for identical points. Rejects NaN or out-of-range
/// coordinates with [`EngineError::InvalidCoordinate`].
pub fn distance_km(a: Coordinates, b: Coordinates) -> Result<f64, EngineError> {
    let a = a.validate()?;
    let b = b.validate()?;

    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    Ok(EARTH_RADIUS_KM * c)
}
