//! Individual coordinate tests. Each returns `true` when the point passes.
//! Callers run these only on coordinates that already passed [`valid_point`].
use crate::core::geo::{LatLon, haversine_m};
use crate::reference::Gazetteer;
use crate::types::{EqualMode, Iso3};

/// Both coordinates present, finite and within lat/lon bounds
pub fn valid_point(latitude: Option<f64>, longitude: Option<f64>) -> Option<LatLon> {
    let point = LatLon::new(latitude?, longitude?);
    point.in_bounds().then_some(point)
}

/// Flags a zero latitude, a zero longitude, or any point within `radius_deg` of (0, 0)
pub fn passes_zeros(point: LatLon, radius_deg: f64) -> bool {
    if point.lat == 0.0 || point.lon == 0.0 {
        return false;
    }
    point.lat.hypot(point.lon) > radius_deg
}

pub fn passes_equal(point: LatLon, mode: EqualMode) -> bool {
    match mode {
        EqualMode::Identical => point.lat != point.lon,
        EqualMode::Absolute => point.lat.abs() != point.lon.abs(),
    }
}

/// Flags points within `radius_m` of any country or province centroid
pub fn passes_centroids(point: LatLon, radius_m: f64, gazetteer: &Gazetteer) -> bool {
    !gazetteer
        .centroids()
        .any(|centroid| haversine_m(point, centroid) <= radius_m)
}

/// Flags points outside every land box
pub fn passes_seas(point: LatLon, buffer_deg: f64, gazetteer: &Gazetteer) -> bool {
    gazetteer.on_land(point, buffer_deg)
}

/// Point lies inside the land boxes of its own country. `None` when the record
/// has no resolved code or the code has no land boxes to test against.
pub fn passes_countries(
    point: LatLon,
    iso3: Option<Iso3>,
    buffer_deg: f64,
    gazetteer: &Gazetteer,
) -> Option<bool> {
    let iso3 = iso3.filter(|code| gazetteer.has_land_boxes(*code))?;
    Some(gazetteer.within_country(iso3, point, buffer_deg))
}
