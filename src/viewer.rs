//! Viewer state and per-tab UI rendering.
//!
//! Owns ViewerState (data, selection, tracker, map surface, admin session)
//! and renders the dashboard, fleet map, and product tracking tabs. The
//! admin tab lives in admin.rs, the settings side panel in settings.rs.

use crate::admin::AdminForm;
use crate::config::TrackingConfig;
use crate::demo::demo_vessels;
use crate::drawing::{draw_fleet_map, PlotSurface};
use crate::geo::GeoPoint;
use crate::journey::{build_journey, route_endpoints};
use crate::shipment::{fleet_stats, TrackedShipment, Vessel};
use crate::store::{AuthState, RestStore, Session, StoreLoadState};
use crate::surface::{render_journey, Camera, MapSurface, SurfaceEvent};
use crate::tracker::{JitterFeed, LiveTracker, PositionFeed};
use eframe::egui;
use egui_dock::TabViewer;
use std::sync::mpsc;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Tab {
    Dashboard,
    FleetMap,
    Tracking,
    Admin,
}

impl Tab {
    pub(crate) const ALL: [Tab; 4] = [Tab::Dashboard, Tab::FleetMap, Tab::Tracking, Tab::Admin];

    fn title(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::FleetMap => "Fleet Map",
            Tab::Tracking => "Product Tracking",
            Tab::Admin => "Admin",
        }
    }
}

pub(crate) struct ViewerState {
    // Backend and data.
    pub(crate) store: Option<RestStore>,
    pub(crate) shipments: StoreLoadState,
    pub(crate) vessels: Vec<Vessel>,
    pub(crate) shipments_rx: Option<mpsc::Receiver<Result<Vec<TrackedShipment>, String>>>,
    pub(crate) mutation_rx: Option<mpsc::Receiver<Result<(), String>>>,
    pub(crate) auth_rx: Option<mpsc::Receiver<Result<Session, String>>>,
    pub(crate) populate_rx: Option<mpsc::Receiver<usize>>,

    // Selection and search.
    pub(crate) vessel_query: String,
    pub(crate) selected_vessel: Option<String>,
    pub(crate) shipment_query: String,
    pub(crate) selected_shipment: Option<String>,
    pub(crate) last_fitted_shipment: Option<String>,

    // Journey map.
    pub(crate) map: PlotSurface,
    pub(crate) tracker: LiveTracker,
    pub(crate) feed: Box<dyn PositionFeed>,
    pub(crate) tracking_cfg: TrackingConfig,
    pub(crate) map_fullscreen: bool,

    // Admin.
    pub(crate) auth: AuthState,
    pub(crate) session: Option<Session>,
    pub(crate) login_email: String,
    pub(crate) login_password: String,
    pub(crate) admin_form: AdminForm,
    pub(crate) editing_id: Option<String>,
    pub(crate) confirm_delete: Option<String>,
    pub(crate) last_mutation_error: Option<String>,

    // Settings.
    pub(crate) dark_mode: bool,
    pub(crate) show_side_panel: bool,
    pub(crate) auto_refresh: bool,
    pub(crate) refresh_elapsed: f64,
}

impl ViewerState {
    pub(crate) fn new(store: Option<RestStore>) -> Self {
        let tracking_cfg = TrackingConfig::new();
        ViewerState {
            store,
            shipments: StoreLoadState::NotLoaded,
            vessels: demo_vessels(),
            shipments_rx: None,
            mutation_rx: None,
            auth_rx: None,
            populate_rx: None,
            vessel_query: String::new(),
            selected_vessel: None,
            shipment_query: String::new(),
            selected_shipment: None,
            last_fitted_shipment: None,
            map: PlotSurface::new(Camera {
                center: GeoPoint::new(25.0, -40.0),
                zoom: tracking_cfg.zoom_limits.min,
            }),
            tracker: LiveTracker::new(tracking_cfg.tick_period_secs),
            feed: Box::new(JitterFeed::new(tracking_cfg.jitter_max_deg)),
            tracking_cfg,
            map_fullscreen: false,
            auth: AuthState::SignedOut,
            session: None,
            login_email: String::new(),
            login_password: String::new(),
            admin_form: AdminForm::default(),
            editing_id: None,
            confirm_delete: None,
            last_mutation_error: None,
            dark_mode: true,
            show_side_panel: true,
            auto_refresh: true,
            refresh_elapsed: 0.0,
        }
    }

    pub(crate) fn loaded_shipments(&self) -> &[TrackedShipment] {
        match &self.shipments {
            StoreLoadState::Loaded(shipments) => shipments,
            _ => &[],
        }
    }

    pub(crate) fn selected_shipment_record(&self) -> Option<&TrackedShipment> {
        let id = self.selected_shipment.as_deref()?;
        self.loaded_shipments().iter().find(|s| s.id == id)
    }

    /// Spawns a background list fetch unless one is already in flight. A
    /// refresh of already-loaded data keeps the current list visible until
    /// the new one arrives, so selection, refit, and live tracking keep
    /// working through the fetch window.
    pub(crate) fn start_refresh(&mut self) {
        let Some(store) = self.store.clone() else {
            return;
        };
        if self.shipments_rx.is_some() {
            return;
        }
        if !matches!(self.shipments, StoreLoadState::Loaded(_)) {
            self.shipments = StoreLoadState::Loading;
        }
        let (tx, rx) = mpsc::channel();
        self.shipments_rx = Some(rx);
        std::thread::spawn(move || {
            let _ = tx.send(store.list());
        });
    }

    fn show_dashboard(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.heading("VoyageTrack");
        ui.label("Real-time vessel tracking and monitoring");
        ui.add_space(12.0);

        let stats = fleet_stats(&self.vessels, self.loaded_shipments());
        let cards: [(&str, String, String); 4] = [
            ("Active Vessels", stats.active.to_string(), "vessels reporting".to_string()),
            ("In Port", stats.in_port.to_string(), "docked worldwide".to_string()),
            ("En Route", stats.en_route.to_string(), "under way".to_string()),
            ("Total Routes", stats.routes.to_string(), "tracked shipping lanes".to_string()),
        ];
        ui.columns(4, |cols| {
            for (col, (title, value, description)) in cols.iter_mut().zip(cards) {
                egui::Frame::group(col.style()).show(col, |ui| {
                    ui.label(egui::RichText::new(title).small());
                    ui.label(egui::RichText::new(value).heading().strong());
                    ui.label(egui::RichText::new(description).small().weak());
                });
            }
        });

        ui.add_space(12.0);
        match &self.shipments {
            StoreLoadState::NotLoaded | StoreLoadState::Loading => {
                ui.label("Loading shipments…");
            }
            StoreLoadState::Failed(e) => {
                ui.colored_label(egui::Color32::LIGHT_RED, format!("Shipment fetch failed: {}", e));
            }
            StoreLoadState::Loaded(shipments) => {
                ui.label(format!(
                    "{} tracked shipments · {} vessels in the roster",
                    shipments.len(),
                    self.vessels.len()
                ));
            }
        }
        if self.store.is_none() {
            ui.add_space(4.0);
            ui.label(
                egui::RichText::new("Demo mode: no backend configured, showing sample data.")
                    .small()
                    .weak(),
            );
        }
    }

    fn show_fleet_map(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Search:");
            ui.text_edit_singleline(&mut self.vessel_query);
            if ui.button(if self.map_fullscreen { "Exit fullscreen" } else { "Fullscreen" }).clicked() {
                self.map_fullscreen = !self.map_fullscreen;
            }
        });
        ui.add_space(4.0);

        let filtered: Vec<Vessel> = self
            .vessels
            .iter()
            .filter(|v| v.matches_query(&self.vessel_query))
            .cloned()
            .collect();

        let avail = ui.available_size();
        if self.map_fullscreen {
            if let Some(id) = draw_fleet_map(
                ui,
                "fleet_map",
                &filtered,
                self.selected_vessel.as_deref(),
                avail.x,
                avail.y - 8.0,
            ) {
                self.selected_vessel = Some(id);
            }
            return;
        }

        let map_width = avail.x * 0.6;
        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                ui.set_width(avail.x - map_width - 16.0);
                ui.label(egui::RichText::new("Active Vessels").strong());
                egui::ScrollArea::vertical().max_height(avail.y - 40.0).show(ui, |ui| {
                    egui::Grid::new("vessel_table").striped(true).num_columns(5).show(ui, |ui| {
                        ui.label(egui::RichText::new("ID").small().strong());
                        ui.label(egui::RichText::new("Vessel").small().strong());
                        ui.label(egui::RichText::new("Type").small().strong());
                        ui.label(egui::RichText::new("Status").small().strong());
                        ui.label(egui::RichText::new("Last Update").small().strong());
                        ui.end_row();
                        for vessel in &filtered {
                            let selected = self.selected_vessel.as_deref() == Some(vessel.id.as_str());
                            if ui.selectable_label(selected, &vessel.id).clicked() {
                                self.selected_vessel = Some(vessel.id.clone());
                            }
                            ui.vertical(|ui| {
                                ui.label(&vessel.name);
                                ui.label(egui::RichText::new(&vessel.location).small().weak());
                            });
                            ui.label(vessel.kind.label());
                            ui.label(vessel.status.label());
                            ui.label(vessel.last_update_label());
                            ui.end_row();
                        }
                    });
                });
            });
            if let Some(id) = draw_fleet_map(
                ui,
                "fleet_map",
                &filtered,
                self.selected_vessel.as_deref(),
                map_width,
                avail.y - 24.0,
            ) {
                self.selected_vessel = Some(id);
            }
        });
    }

    fn show_tracking(&mut self, ui: &mut egui::Ui) {
        match &self.shipments {
            StoreLoadState::NotLoaded | StoreLoadState::Loading => {
                ui.label("Loading shipments…");
                return;
            }
            StoreLoadState::Failed(e) => {
                ui.colored_label(egui::Color32::LIGHT_RED, format!("Shipment fetch failed: {}", e));
                if ui.button("Retry").clicked() {
                    self.shipments = StoreLoadState::NotLoaded;
                }
                return;
            }
            StoreLoadState::Loaded(_) => {}
        }

        ui.horizontal(|ui| {
            ui.label("Search products:");
            ui.text_edit_singleline(&mut self.shipment_query);
            if self.store.is_some() && ui.button("Refresh").clicked() {
                self.start_refresh();
            }
        });
        ui.add_space(4.0);

        let filtered: Vec<TrackedShipment> = self
            .loaded_shipments()
            .iter()
            .filter(|s| s.matches_query(&self.shipment_query))
            .cloned()
            .collect();

        let avail = ui.available_size();
        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                ui.set_width(avail.x * 0.3);
                ui.label(egui::RichText::new("Products").strong());
                egui::ScrollArea::vertical().max_height(avail.y - 40.0).show(ui, |ui| {
                    egui::Grid::new("shipment_table").striped(true).num_columns(3).show(ui, |ui| {
                        ui.label(egui::RichText::new("ID").small().strong());
                        ui.label(egui::RichText::new("Product").small().strong());
                        ui.label(egui::RichText::new("Status").small().strong());
                        ui.end_row();
                        for shipment in &filtered {
                            let selected =
                                self.selected_shipment.as_deref() == Some(shipment.id.as_str());
                            if ui.selectable_label(selected, &shipment.id).clicked() {
                                self.selected_shipment = Some(shipment.id.clone());
                            }
                            ui.label(&shipment.name);
                            ui.label(&shipment.status);
                            ui.end_row();
                        }
                    });
                });
            });

            ui.vertical(|ui| {
                let Some(shipment) = self.selected_shipment_record().cloned() else {
                    ui.label("Select a product to see its journey.");
                    return;
                };
                self.show_journey_panel(ui, &shipment, avail);
            });
        });
    }

    fn show_journey_panel(
        &mut self,
        ui: &mut egui::Ui,
        shipment: &TrackedShipment,
        avail: egui::Vec2,
    ) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(&shipment.name).heading());
            ui.label(
                egui::RichText::new(&shipment.status)
                    .color(egui::Color32::from_rgb(100, 255, 218)),
            );
        });
        ui.label(egui::RichText::new(format!("ID: {}", shipment.id)).small().weak());
        ui.add_space(4.0);

        let (origin_pt, destination_pt) = route_endpoints(shipment);
        egui::Grid::new("shipment_detail").num_columns(2).show(ui, |ui| {
            ui.label("Origin");
            ui.label(format!(
                "{} ({:.4}, {:.4})",
                shipment.origin_name, origin_pt.lat, origin_pt.lng
            ));
            ui.end_row();
            ui.label("Destination");
            ui.label(format!(
                "{} ({:.4}, {:.4})",
                shipment.destination_name, destination_pt.lat, destination_pt.lng
            ));
            ui.end_row();
            ui.label("Vessel");
            ui.label(&shipment.vessel_name);
            ui.end_row();
            ui.label("Expected arrival");
            match shipment.eta {
                Some(eta) => ui.label(eta.format("%B %e, %Y").to_string()),
                None => ui.label("—"),
            };
            ui.end_row();
        });
        ui.add_space(4.0);

        let mut live = self.tracker.is_tracking();
        if ui.checkbox(&mut live, "Live tracking").changed() {
            if live {
                self.tracker.enable(&shipment.id);
            } else {
                self.tracker.disable();
            }
        }

        // Journey geometry is rebuilt every frame; it is cheaper than caching.
        let journey = build_journey(shipment);
        render_journey(&mut self.map, shipment, &journey);
        let map_width = avail.x * 0.62;
        self.map.show(ui, "journey_map", map_width, avail.y * 0.6);

        for event in self.map.take_events() {
            match event {
                SurfaceEvent::Loaded => log::debug!("journey map surface ready"),
                SurfaceEvent::MarkerClicked(id) => {
                    if self.loaded_shipments().iter().any(|s| s.id == id) {
                        self.selected_shipment = Some(id);
                    }
                }
            }
        }
    }
}

impl TabViewer for ViewerState {
    type Tab = Tab;

    fn title(&mut self, tab: &mut Self::Tab) -> egui::WidgetText {
        tab.title().into()
    }

    fn ui(&mut self, ui: &mut egui::Ui, tab: &mut Self::Tab) {
        match tab {
            Tab::Dashboard => self.show_dashboard(ui),
            Tab::FleetMap => self.show_fleet_map(ui),
            Tab::Tracking => self.show_tracking(ui),
            Tab::Admin => self.show_admin(ui),
        }
    }

    fn closeable(&mut self, _tab: &mut Self::Tab) -> bool {
        false
    }

    fn scroll_bars(&self, _tab: &Self::Tab) -> [bool; 2] {
        [false, true]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_shipments;

    fn state_with_store() -> ViewerState {
        // Nothing listens on port 9; the background fetch fails harmlessly.
        ViewerState::new(Some(RestStore::new("http://127.0.0.1:9", "anon-key")))
    }

    #[test]
    fn refresh_keeps_loaded_list_and_tracking_alive() {
        let mut v = state_with_store();
        v.shipments = StoreLoadState::Loaded(demo_shipments());
        v.tracker.enable("PRD001");

        v.start_refresh();

        assert!(v.shipments_rx.is_some());
        assert!(v.loaded_shipments().iter().any(|s| s.id == "PRD001"));
        assert!(v.tracker.is_tracking());
    }

    #[test]
    fn initial_fetch_enters_loading_state() {
        let mut v = state_with_store();
        v.start_refresh();
        assert!(matches!(v.shipments, StoreLoadState::Loading));
        assert!(v.shipments_rx.is_some());
    }

    #[test]
    fn refresh_is_not_restarted_while_in_flight() {
        let mut v = state_with_store();
        v.shipments = StoreLoadState::Loaded(demo_shipments());
        v.start_refresh();
        v.start_refresh();
        // Still one fetch, and the list is still the one on screen.
        assert_eq!(v.loaded_shipments().len(), 3);
    }
}
