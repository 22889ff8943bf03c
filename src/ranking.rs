//! Ranking of eligible photographers.
//!
//! Closest first (minimizes travel and lateness risk), then lightest daily
//! load (balances work across equally-distant photographers), then id so
//! ties resolve the same way every time.

use crate::model::EligiblePhotographer;

/// Orders eligible candidates by preference. Pure and deterministic: the
/// same input, including ties, always yields the same output order.
pub fn rank(eligible: &[EligiblePhotographer]) -> Vec<EligiblePhotographer> {
    let mut ranked = eligible.to_vec();
    ranked.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.daily_load.cmp(&b.daily_load))
            .then_with(|| a.photographer_id.cmp(&b.photographer_id))
    });
    ranked
}
