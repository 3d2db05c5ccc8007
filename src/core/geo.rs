//! Plain latitude/longitude geometry: points, haversine distance and
//! lon/lat bounding boxes used by the land and centroid checks.
use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine distance
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn in_bounds(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Great-circle distance in meters
pub fn haversine_m(a: LatLon, b: LatLon) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (b.lon - a.lon).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Axis-aligned lon/lat rectangle; `min_lon <= max_lon`, never wraps the antimeridian
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn is_well_formed(&self) -> bool {
        self.min_lon <= self.max_lon
            && self.min_lat <= self.max_lat
            && LatLon::new(self.min_lat, self.min_lon).in_bounds()
            && LatLon::new(self.max_lat, self.max_lon).in_bounds()
    }

    /// Inclusive containment after growing every side by `buffer_deg`
    pub fn contains(&self, point: LatLon, buffer_deg: f64) -> bool {
        point.lat >= self.min_lat - buffer_deg
            && point.lat <= self.max_lat + buffer_deg
            && point.lon >= self.min_lon - buffer_deg
            && point.lon <= self.max_lon + buffer_deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_matches_known_distance() {
        // New York to London, roughly 5570 km
        let nyc = LatLon::new(40.7128, -74.0060);
        let london = LatLon::new(51.5074, -0.1278);
        let d = haversine_m(nyc, london);
        assert!((d - 5_570_000.0).abs() < 10_000.0, "distance was {d}");
    }

    #[test]
    fn haversine_is_zero_for_same_point() {
        let p = LatLon::new(-12.5, 130.25);
        assert!(haversine_m(p, p) < 1e-6);
    }

    #[test]
    fn one_hundredth_degree_is_about_a_kilometer() {
        let a = LatLon::new(0.0, 10.0);
        let b = LatLon::new(0.01, 10.0);
        let d = haversine_m(a, b);
        assert!((d - 1112.0).abs() < 5.0, "distance was {d}");
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(LatLon::new(90.0, -180.0).in_bounds());
        assert!(!LatLon::new(90.0001, 0.0).in_bounds());
        assert!(!LatLon::new(0.0, f64::NAN).in_bounds());
    }

    #[test]
    fn box_buffer_grows_every_side() {
        let b = BoundingBox {
            min_lon: 0.0,
            min_lat: 0.0,
            max_lon: 1.0,
            max_lat: 1.0,
        };
        assert!(b.contains(LatLon::new(1.0, 1.0), 0.0));
        assert!(!b.contains(LatLon::new(1.2, 0.5), 0.0));
        assert!(b.contains(LatLon::new(1.2, 0.5), 0.25));
        assert!(b.contains(LatLon::new(0.5, -0.2), 0.25));
    }
}
