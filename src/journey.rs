//! Derived journey geometry for a tracked shipment.
//!
//! A JourneyModel is recomputed on every shipment change and every simulator
//! tick; with a table-sized geocode input it is cheaper to rebuild than to
//! cache.

use crate::geo::{known_point, lookup, GeoPoint, FALLBACK_POINT};
use crate::shipment::TrackedShipment;

/// The three map points and two path segments derived from a shipment.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct JourneyModel {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub current: GeoPoint,
    /// Planned route, origin to destination.
    pub full_route: [GeoPoint; 2],
    /// Progress so far, origin to current position.
    pub progress_route: [GeoPoint; 2],
}

impl JourneyModel {
    /// All points the viewport must cover.
    pub fn points(&self) -> [GeoPoint; 3] {
        [self.origin, self.destination, self.current]
    }
}

/// Builds the journey geometry for a shipment. Pure and deterministic for a
/// fixed input. Unknown place names degrade to the geocode fallback (logged
/// at warn level); a missing current position collapses the progress route
/// to a zero-length segment at the origin so the render surface always
/// receives two well-formed segments.
pub fn build_journey(shipment: &TrackedShipment) -> JourneyModel {
    let origin = resolve_place(&shipment.origin_name);
    let destination = resolve_place(&shipment.destination_name);
    let current = shipment.current_position.unwrap_or(origin);
    JourneyModel {
        origin,
        destination,
        current,
        full_route: [origin, destination],
        progress_route: [origin, current],
    }
}

fn resolve_place(name: &str) -> GeoPoint {
    match known_point(name) {
        Some(p) => p,
        None => {
            log::warn!("unknown place name {:?}, using mid-ocean fallback", name);
            FALLBACK_POINT
        }
    }
}

/// Convenience used by UI labels: origin and destination of a shipment as
/// resolved coordinates.
pub fn route_endpoints(shipment: &TrackedShipment) -> (GeoPoint, GeoPoint) {
    (lookup(&shipment.origin_name), lookup(&shipment.destination_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::FALLBACK_POINT;

    fn shipment(origin: &str, destination: &str, current: Option<GeoPoint>) -> TrackedShipment {
        TrackedShipment {
            id: "PRD002".to_string(),
            name: "Scandinavian Furniture".to_string(),
            origin_name: origin.to_string(),
            destination_name: destination.to_string(),
            vessel_name: "MV Nordic Star".to_string(),
            status: "In Transit".to_string(),
            eta: None,
            image: String::new(),
            current_position: current,
        }
    }

    #[test]
    fn builds_routes_from_geocoded_endpoints() {
        let s = shipment("Sweden", "Los Angeles", Some(GeoPoint::new(40.0, -60.0)));
        let j = build_journey(&s);
        assert_eq!(j.full_route, [GeoPoint::new(57.7089, 11.9746), GeoPoint::new(34.0522, -118.2437)]);
        assert_eq!(j.progress_route, [GeoPoint::new(57.7089, 11.9746), GeoPoint::new(40.0, -60.0)]);
    }

    #[test]
    fn routes_share_the_origin_start_point() {
        let s = shipment("India", "London", Some(GeoPoint::new(19.076, 72.8777)));
        let j = build_journey(&s);
        assert_eq!(j.full_route[0], j.origin);
        assert_eq!(j.progress_route[0], j.origin);
    }

    #[test]
    fn is_deterministic_for_identical_input() {
        let s = shipment("Colombia", "New York", Some(GeoPoint::new(25.7617, -80.1918)));
        assert_eq!(build_journey(&s), build_journey(&s));
    }

    #[test]
    fn missing_current_position_yields_zero_length_progress() {
        let s = shipment("Sweden", "Los Angeles", None);
        let j = build_journey(&s);
        assert_eq!(j.progress_route, [j.origin, j.origin]);
        assert_eq!(j.current, j.origin);
    }

    #[test]
    fn unknown_places_fall_back_mid_ocean() {
        let s = shipment("Nowhere", "Los Angeles", None);
        let j = build_journey(&s);
        assert_eq!(j.origin, FALLBACK_POINT);
        assert_eq!(j.destination, GeoPoint::new(34.0522, -118.2437));
    }
}
