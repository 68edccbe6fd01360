//! Viewport fitting: the camera region the map surface should display.

use crate::geo::GeoPoint;

/// Raw bounding region covering a point set, plus the pixel padding the
/// render surface should keep around it. Degenerate (single-point) bounds
/// are returned as-is; the zoom floor is applied when the camera is derived,
/// not here.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Viewport {
    pub bounds_min: GeoPoint,
    pub bounds_max: GeoPoint,
    pub padding_px: u32,
}

impl Viewport {
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.bounds_min.lat + self.bounds_max.lat) / 2.0,
            (self.bounds_min.lng + self.bounds_max.lng) / 2.0,
        )
    }

    /// Latitude and longitude extent in degrees.
    pub fn span(&self) -> (f64, f64) {
        (
            self.bounds_max.lat - self.bounds_min.lat,
            self.bounds_max.lng - self.bounds_min.lng,
        )
    }

    pub fn is_degenerate(&self) -> bool {
        let (lat_span, lng_span) = self.span();
        lat_span <= f64::EPSILON && lng_span <= f64::EPSILON
    }
}

/// Componentwise min/max bounds over a point set. Returns None for an empty
/// set; for a single point the bounds collapse to that point.
pub fn fit_viewport(points: &[GeoPoint], padding_px: u32) -> Option<Viewport> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in &points[1..] {
        min.lat = min.lat.min(p.lat);
        min.lng = min.lng.min(p.lng);
        max.lat = max.lat.max(p.lat);
        max.lng = max.lng.max(p.lng);
    }
    Some(Viewport {
        bounds_min: min,
        bounds_max: max,
        padding_px,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_contain_every_input_point() {
        let points = [
            GeoPoint::new(57.7089, 11.9746),
            GeoPoint::new(34.0522, -118.2437),
            GeoPoint::new(40.0, -60.0),
        ];
        let vp = fit_viewport(&points, 32).unwrap();
        for p in &points {
            assert!(vp.bounds_min.lat <= p.lat && p.lat <= vp.bounds_max.lat);
            assert!(vp.bounds_min.lng <= p.lng && p.lng <= vp.bounds_max.lng);
        }
    }

    #[test]
    fn sweden_to_los_angeles_bounds_match_extremes() {
        let points = [
            GeoPoint::new(57.7089, 11.9746),
            GeoPoint::new(34.0522, -118.2437),
            GeoPoint::new(40.0, -60.0),
        ];
        let vp = fit_viewport(&points, 0).unwrap();
        assert_eq!(vp.bounds_min, GeoPoint::new(34.0522, -118.2437));
        assert_eq!(vp.bounds_max, GeoPoint::new(57.7089, 11.9746));
    }

    #[test]
    fn single_point_collapses_to_degenerate_bounds() {
        let vp = fit_viewport(&[GeoPoint::new(10.0, 20.0)], 16).unwrap();
        assert_eq!(vp.bounds_min, vp.bounds_max);
        assert!(vp.is_degenerate());
        assert_eq!(vp.center(), GeoPoint::new(10.0, 20.0));
    }

    #[test]
    fn empty_point_set_yields_no_viewport() {
        assert!(fit_viewport(&[], 8).is_none());
    }

    #[test]
    fn identical_points_are_degenerate() {
        let p = GeoPoint::new(-5.0, 100.0);
        let vp = fit_viewport(&[p, p, p], 8).unwrap();
        assert!(vp.is_degenerate());
    }
}
