//! Map render surface capability interface.
//!
//! The journey logic talks to an abstract surface (center, zoom, markers,
//! polylines, events); any concrete mapping widget is an adapter picked at
//! composition time. The shipped adapter is the egui_plot one in drawing.rs.

use crate::geo::GeoPoint;
use crate::journey::JourneyModel;
use crate::shipment::TrackedShipment;
use crate::viewport::Viewport;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum MarkerKind {
    Origin,
    Destination,
    Vessel,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Marker {
    pub id: String,
    pub position: GeoPoint,
    pub kind: MarkerKind,
    pub label: String,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PathStyle {
    pub color: egui::Color32,
    pub width: f32,
    pub dashed: bool,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Polyline {
    pub points: Vec<GeoPoint>,
    pub style: PathStyle,
}

#[derive(Clone, PartialEq, Debug)]
pub enum SurfaceEvent {
    Loaded,
    MarkerClicked(String),
}

/// Camera for the map surface. Zoom level z displays a longitudinal span of
/// 360 / 2^z degrees.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Camera {
    pub center: GeoPoint,
    pub zoom: f64,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
}

pub trait MapSurface {
    fn set_center(&mut self, center: GeoPoint);
    fn set_zoom(&mut self, zoom: f64);
    fn add_marker(&mut self, marker: Marker);
    fn add_polyline(&mut self, line: Polyline);
    fn take_events(&mut self) -> Vec<SurfaceEvent>;
    /// Removes all markers and polylines. Camera is untouched.
    fn clear(&mut self);
}

/// Derives a camera that covers the viewport bounds plus padding. Degenerate
/// bounds would otherwise ask for infinite zoom; the limits clamp to a fixed
/// close-up level instead.
pub fn camera_for(viewport: &Viewport, limits: ZoomLimits) -> Camera {
    let (lat_span, lng_span) = viewport.span();
    // Latitude counts double: the plot viewport is roughly 2:1 in degrees.
    let padding_frac = viewport.padding_px as f64 / 512.0;
    let span = lng_span.max(lat_span * 2.0) * (1.0 + padding_frac);
    let zoom = if span > 0.0 {
        (360.0 / span).log2()
    } else {
        limits.max
    };
    Camera {
        center: viewport.center(),
        zoom: zoom.clamp(limits.min, limits.max),
    }
}

pub fn apply_camera(surface: &mut dyn MapSurface, camera: Camera) {
    surface.set_center(camera.center);
    surface.set_zoom(camera.zoom);
}

pub const ORIGIN_MARKER_ID: &str = "origin";
pub const DESTINATION_MARKER_ID: &str = "destination";

/// Pushes the journey scene (three markers, two path segments) onto the
/// surface. The vessel marker carries the shipment id so click events can be
/// routed back to the record.
pub fn render_journey(
    surface: &mut dyn MapSurface,
    shipment: &TrackedShipment,
    journey: &JourneyModel,
) {
    surface.clear();
    surface.add_polyline(Polyline {
        points: journey.full_route.to_vec(),
        style: PathStyle {
            color: egui::Color32::GRAY,
            width: 1.0,
            dashed: true,
        },
    });
    surface.add_polyline(Polyline {
        points: journey.progress_route.to_vec(),
        style: PathStyle {
            color: egui::Color32::from_rgb(100, 255, 218),
            width: 2.0,
            dashed: false,
        },
    });
    surface.add_marker(Marker {
        id: ORIGIN_MARKER_ID.to_string(),
        position: journey.origin,
        kind: MarkerKind::Origin,
        label: shipment.origin_name.clone(),
    });
    surface.add_marker(Marker {
        id: DESTINATION_MARKER_ID.to_string(),
        position: journey.destination,
        kind: MarkerKind::Destination,
        label: shipment.destination_name.clone(),
    });
    surface.add_marker(Marker {
        id: shipment.id.clone(),
        position: journey.current,
        kind: MarkerKind::Vessel,
        label: shipment.vessel_name.clone(),
    });
}
