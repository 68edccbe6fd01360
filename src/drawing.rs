//! egui_plot rendering: the concrete map-surface adapter and the fleet
//! overview map.

use crate::geo::GeoPoint;
use crate::shipment::{Vessel, VesselStatus};
use crate::surface::{Camera, MapSurface, Marker, MarkerKind, Polyline, SurfaceEvent};
use eframe::egui;
use egui_plot::{Line, Plot, PlotBounds, PlotPoint, PlotPoints, Points, Text};

pub fn marker_color(kind: MarkerKind) -> egui::Color32 {
    match kind {
        MarkerKind::Origin => egui::Color32::from_rgb(80, 200, 120),
        MarkerKind::Destination => egui::Color32::from_rgb(230, 90, 90),
        MarkerKind::Vessel => egui::Color32::from_rgb(100, 255, 218),
    }
}

fn marker_radius(kind: MarkerKind) -> f32 {
    match kind {
        MarkerKind::Vessel => 6.0,
        _ => 4.5,
    }
}

/// Map surface adapter drawing with egui_plot. Commands accumulate between
/// frames; `show` paints them and translates plot interaction into surface
/// events.
pub struct PlotSurface {
    camera: Camera,
    markers: Vec<Marker>,
    polylines: Vec<Polyline>,
    events: Vec<SurfaceEvent>,
    loaded: bool,
}

impl PlotSurface {
    pub fn new(camera: Camera) -> Self {
        PlotSurface {
            camera,
            markers: Vec::new(),
            polylines: Vec::new(),
            events: Vec::new(),
            loaded: false,
        }
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    fn plot_bounds(&self) -> PlotBounds {
        let lng_half = 180.0 / 2f64.powf(self.camera.zoom);
        let lat_half = lng_half / 2.0;
        PlotBounds::from_min_max(
            [self.camera.center.lng - lng_half, self.camera.center.lat - lat_half],
            [self.camera.center.lng + lng_half, self.camera.center.lat + lat_half],
        )
    }

    pub fn show(&mut self, ui: &mut egui::Ui, id: &str, width: f32, height: f32) {
        if !self.loaded {
            self.loaded = true;
            self.events.push(SurfaceEvent::Loaded);
        }

        let bounds = self.plot_bounds();
        let plot = Plot::new(id)
            .width(width)
            .height(height)
            .show_axes([false, false])
            .show_grid(true)
            .show_x(false)
            .show_y(false)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false);

        let markers = self.markers.clone();
        let polylines = self.polylines.clone();
        let response = plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(bounds);

            // Equator and prime meridian for orientation.
            plot_ui.line(
                Line::new("", PlotPoints::new(vec![[-180.0, 0.0], [180.0, 0.0]]))
                    .color(egui::Color32::DARK_GRAY)
                    .width(0.5),
            );
            plot_ui.line(
                Line::new("", PlotPoints::new(vec![[0.0, -90.0], [0.0, 90.0]]))
                    .color(egui::Color32::DARK_GRAY)
                    .width(0.5),
            );

            for polyline in &polylines {
                let pts: Vec<[f64; 2]> = polyline.points.iter().map(|p| [p.lng, p.lat]).collect();
                let mut line = Line::new("", PlotPoints::new(pts))
                    .color(polyline.style.color)
                    .width(polyline.style.width);
                if polyline.style.dashed {
                    line = line.style(egui_plot::LineStyle::dashed_loose());
                }
                plot_ui.line(line);
            }

            for marker in &markers {
                plot_ui.points(
                    Points::new("", vec![[marker.position.lng, marker.position.lat]])
                        .color(marker_color(marker.kind))
                        .radius(marker_radius(marker.kind))
                        .filled(true),
                );
                if !marker.label.is_empty() {
                    plot_ui.text(
                        Text::new(
                            "",
                            PlotPoint::new(marker.position.lng, marker.position.lat + 1.5),
                            marker.label.clone(),
                        )
                        .color(egui::Color32::WHITE),
                    );
                }
            }
        });

        if response.response.clicked() {
            if let Some(pos) = response.response.hover_pos() {
                let plot_pos = response.transform.value_from_position(pos);
                let threshold = 360.0 / 2f64.powf(self.camera.zoom) * 0.02;
                if let Some(hit) = nearest_marker(&self.markers, plot_pos.x, plot_pos.y, threshold) {
                    self.events.push(SurfaceEvent::MarkerClicked(hit));
                }
            }
        }
    }
}

fn nearest_marker(markers: &[Marker], lng: f64, lat: f64, threshold: f64) -> Option<String> {
    let mut best: Option<(f64, &Marker)> = None;
    for marker in markers {
        let dx = marker.position.lng - lng;
        let dy = marker.position.lat - lat;
        let dist_sq = dx * dx + dy * dy;
        if dist_sq < threshold * threshold && best.map_or(true, |(d, _)| dist_sq < d) {
            best = Some((dist_sq, marker));
        }
    }
    best.map(|(_, m)| m.id.clone())
}

impl MapSurface for PlotSurface {
    fn set_center(&mut self, center: GeoPoint) {
        self.camera.center = center;
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.camera.zoom = zoom;
    }

    fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    fn add_polyline(&mut self, line: Polyline) {
        self.polylines.push(line);
    }

    fn take_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }

    fn clear(&mut self) {
        self.markers.clear();
        self.polylines.clear();
    }
}

fn vessel_color(status: VesselStatus) -> egui::Color32 {
    match status {
        VesselStatus::Active => egui::Color32::from_rgb(100, 255, 218),
        VesselStatus::InPort => egui::Color32::from_rgb(120, 160, 255),
        VesselStatus::Anchored => egui::Color32::from_rgb(240, 200, 90),
    }
}

/// World map of the fleet roster. Returns the id of a vessel clicked this
/// frame, if any.
pub fn draw_fleet_map(
    ui: &mut egui::Ui,
    id: &str,
    vessels: &[Vessel],
    selected: Option<&str>,
    width: f32,
    height: f32,
) -> Option<String> {
    let plot = Plot::new(id)
        .width(width)
        .height(height)
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-90.0)
        .include_y(90.0)
        .show_axes([false, false])
        .show_x(false)
        .show_y(false)
        .allow_scroll(false);

    let response = plot.show(ui, |plot_ui| {
        plot_ui.line(
            Line::new("", PlotPoints::new(vec![[-180.0, 0.0], [180.0, 0.0]]))
                .color(egui::Color32::DARK_GRAY)
                .width(0.5),
        );
        plot_ui.line(
            Line::new("", PlotPoints::new(vec![[0.0, -90.0], [0.0, 90.0]]))
                .color(egui::Color32::DARK_GRAY)
                .width(0.5),
        );
        for vessel in vessels {
            let is_selected = selected == Some(vessel.id.as_str());
            plot_ui.points(
                Points::new("", vec![[vessel.position.lng, vessel.position.lat]])
                    .color(vessel_color(vessel.status))
                    .radius(if is_selected { 7.0 } else { 4.5 })
                    .filled(true),
            );
            plot_ui.text(
                Text::new(
                    "",
                    PlotPoint::new(vessel.position.lng, vessel.position.lat + 3.0),
                    vessel.name.clone(),
                )
                .color(if is_selected {
                    egui::Color32::WHITE
                } else {
                    egui::Color32::GRAY
                }),
            );
        }
    });

    if response.response.clicked() {
        if let Some(pos) = response.response.hover_pos() {
            let plot_pos = response.transform.value_from_position(pos);
            let mut best: Option<(f64, &Vessel)> = None;
            for vessel in vessels {
                let dx = vessel.position.lng - plot_pos.x;
                let dy = vessel.position.lat - plot_pos.y;
                let dist_sq = dx * dx + dy * dy;
                if dist_sq < 36.0 && best.map_or(true, |(d, _)| dist_sq < d) {
                    best = Some((dist_sq, vessel));
                }
            }
            return best.map(|(_, v)| v.id.clone());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ZoomLimits;
    use crate::viewport::fit_viewport;

    fn marker(id: &str, lat: f64, lng: f64) -> Marker {
        Marker {
            id: id.to_string(),
            position: GeoPoint::new(lat, lng),
            kind: MarkerKind::Vessel,
            label: String::new(),
        }
    }

    #[test]
    fn nearest_marker_respects_threshold() {
        let markers = vec![marker("a", 10.0, 10.0), marker("b", 12.0, 10.0)];
        assert_eq!(nearest_marker(&markers, 10.1, 10.1, 1.0), Some("a".to_string()));
        assert_eq!(nearest_marker(&markers, 10.0, 11.9, 1.0), Some("b".to_string()));
        assert_eq!(nearest_marker(&markers, 50.0, 50.0, 1.0), None);
    }

    #[test]
    fn plot_bounds_cover_fitted_viewport() {
        let points = [
            GeoPoint::new(57.7089, 11.9746),
            GeoPoint::new(34.0522, -118.2437),
            GeoPoint::new(40.0, -60.0),
        ];
        let vp = fit_viewport(&points, 32).unwrap();
        let camera = crate::surface::camera_for(&vp, ZoomLimits { min: 1.0, max: 8.0 });
        let surface = PlotSurface::new(camera);
        let bounds = surface.plot_bounds();
        for p in &points {
            assert!(bounds.min()[0] <= p.lng && p.lng <= bounds.max()[0]);
        }
    }

    #[test]
    fn recenter_keeps_zoom() {
        let mut surface = PlotSurface::new(Camera {
            center: GeoPoint::new(0.0, 0.0),
            zoom: 5.0,
        });
        surface.set_center(GeoPoint::new(40.0, -60.0));
        assert_eq!(surface.camera().zoom, 5.0);
        assert_eq!(surface.camera().center, GeoPoint::new(40.0, -60.0));
    }
}
