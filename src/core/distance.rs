use crate::models::Coordinate;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Score points lost per kilometer of distance; the score reaches 0 at 50 km
pub const DEFAULT_DISTANCE_DECAY_PER_KM: f64 = 2.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// Inputs are not validated; callers check ranges upstream.
///
/// # Arguments
/// * `from` - First point in decimal degrees
/// * `to` - Second point in decimal degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push near-antipodal points just past 1
    let a = a.min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Calculate distance score (0-100)
/// Linear decay from 100 at zero distance, floored at 0
#[inline]
pub fn distance_score(distance_km: f64, decay_per_km: f64) -> f64 {
    (100.0 - distance_km * decay_per_km).clamp(0.0, 100.0)
}
