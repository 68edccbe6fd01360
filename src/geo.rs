//! Geographic value types and the static place-name geocode table.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees. Latitude is -90..90, longitude
/// -180..180.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }
}

/// Mid-ocean fallback used when a place name is not in the table, so the
/// map always has something to render.
pub const FALLBACK_POINT: GeoPoint = GeoPoint::new(25.0, -40.0);

/// Exact-match lookup against the known place table. Case-sensitive.
pub fn known_point(place: &str) -> Option<GeoPoint> {
    let point = match place {
        "Colombia" => GeoPoint::new(4.5709, -74.2973),
        "New York" => GeoPoint::new(40.7128, -74.0060),
        "Sweden" => GeoPoint::new(57.7089, 11.9746),
        "Los Angeles" => GeoPoint::new(34.0522, -118.2437),
        "India" => GeoPoint::new(20.5937, 78.9629),
        "London" => GeoPoint::new(51.5074, -0.1278),
        _ => return None,
    };
    Some(point)
}

/// Total geocode lookup: unknown names degrade to [`FALLBACK_POINT`] rather
/// than failing, so rendering is never blocked on a bad record.
pub fn lookup(place: &str) -> GeoPoint {
    known_point(place).unwrap_or(FALLBACK_POINT)
}

#[cfg(test)]
mod tests {
    use super::{known_point, lookup, GeoPoint, FALLBACK_POINT};

    #[test]
    fn lookup_known_places_exact() {
        assert_eq!(lookup("Sweden"), GeoPoint::new(57.7089, 11.9746));
        assert_eq!(lookup("Los Angeles"), GeoPoint::new(34.0522, -118.2437));
        assert_eq!(lookup("Colombia"), GeoPoint::new(4.5709, -74.2973));
        assert_eq!(lookup("New York"), GeoPoint::new(40.7128, -74.0060));
        assert_eq!(lookup("India"), GeoPoint::new(20.5937, 78.9629));
        assert_eq!(lookup("London"), GeoPoint::new(51.5074, -0.1278));
    }

    #[test]
    fn lookup_is_total_with_fallback() {
        assert_eq!(lookup(""), FALLBACK_POINT);
        assert_eq!(lookup("Atlantis"), FALLBACK_POINT);
        assert_eq!(lookup("new york"), FALLBACK_POINT); // case-sensitive
        assert_eq!(lookup("  Sweden "), FALLBACK_POINT);
    }

    #[test]
    fn known_point_misses_report_none() {
        assert!(known_point("Narnia").is_none());
        assert!(known_point("London").is_some());
    }

    #[test]
    fn known_points_are_valid_coordinates() {
        for name in ["Colombia", "New York", "Sweden", "Los Angeles", "India", "London"] {
            let p = lookup(name);
            assert!((-90.0..=90.0).contains(&p.lat), "{} lat out of range", name);
            assert!((-180.0..=180.0).contains(&p.lng), "{} lng out of range", name);
        }
    }
}
