use crate::domain::geo::haversine_km;
use crate::domain::model::RestaurantRecord;
use chrono::NaiveTime;

/// Strictly between opening and closing; both boundary instants count as closed.
pub fn is_open_now(current: NaiveTime, opens_at: NaiveTime, closes_at: NaiveTime) -> bool {
    opens_at < current && current < closes_at
}

/// Strictly inside the radius; a point exactly `radius_km` away is outside.
pub fn is_within_radius(lat1: f64, lon1: f64, lat2: f64, lon2: f64, radius_km: f64) -> bool {
    haversine_km(lat1, lon1, lat2, lon2) < radius_km
}

/// Open at `current` and within `radius_km` of (`latitude`, `longitude`).
///
/// Distance is only computed for open restaurants.
pub fn is_candidate(
    record: &RestaurantRecord,
    current: NaiveTime,
    latitude: f64,
    longitude: f64,
    radius_km: f64,
) -> bool {
    is_open_now(current, record.opens_at, record.closes_at)
        && is_within_radius(
            latitude,
            longitude,
            record.latitude,
            record.longitude,
            radius_km,
        )
}
