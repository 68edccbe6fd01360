//! Application shell and eframe integration.
//!
//! Owns the dock layout and drives the per-frame loop: draining background
//! fetch results, refitting the camera on selection changes, advancing the
//! live tracker, and rendering the tab area.

use crate::config::BackendConfig;
use crate::demo::demo_shipments;
use crate::journey::build_journey;
use crate::store::{AuthState, RestStore, StoreLoadState};
use crate::surface::{apply_camera, camera_for, MapSurface};
use crate::viewer::{Tab, ViewerState};
use crate::viewport::fit_viewport;
use eframe::egui;
use egui_dock::{DockArea, DockState};

pub(crate) struct App {
    dock_state: DockState<Tab>,
    viewer: ViewerState,
}

impl App {
    pub(crate) fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let backend = BackendConfig::from_env();
        if !backend.is_configured() {
            log::info!("no backend configured, starting in demo mode");
        }
        let store = backend
            .base_url
            .zip(backend.api_key)
            .map(|(url, key)| RestStore::new(&url, &key));
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        App {
            dock_state: DockState::new(Tab::ALL.to_vec()),
            viewer: ViewerState::new(store),
        }
    }

    fn drain_channels(&mut self) {
        let v = &mut self.viewer;

        if let Some(rx) = &v.shipments_rx {
            if let Ok(result) = rx.try_recv() {
                match result {
                    Ok(shipments) => v.shipments = StoreLoadState::Loaded(shipments),
                    Err(e) => {
                        log::warn!("shipment fetch failed: {}", e);
                        // A failed refresh keeps showing the last good list.
                        if !matches!(v.shipments, StoreLoadState::Loaded(_)) {
                            v.shipments = StoreLoadState::Failed(e);
                        }
                    }
                }
                v.shipments_rx = None;
            }
        }

        if let Some(rx) = &v.auth_rx {
            if let Ok(result) = rx.try_recv() {
                match result {
                    Ok(session) => {
                        log::info!("signed in as {}", session.email);
                        v.session = Some(session.clone());
                        v.auth = AuthState::SignedIn(session);
                        v.login_password.clear();
                    }
                    Err(e) => {
                        log::warn!("sign-in failed: {}", e);
                        v.auth = AuthState::Failed(e);
                    }
                }
                v.auth_rx = None;
            }
        }

        let mut refresh = false;
        if let Some(rx) = &v.mutation_rx {
            if let Ok(result) = rx.try_recv() {
                match result {
                    Ok(()) => refresh = true,
                    Err(e) => {
                        log::warn!("mutation failed: {}", e);
                        v.last_mutation_error = Some(e);
                    }
                }
                v.mutation_rx = None;
            }
        }
        if let Some(rx) = &v.populate_rx {
            if let Ok(created) = rx.try_recv() {
                log::info!("seeded {} demo shipments", created);
                refresh = true;
                v.populate_rx = None;
            }
        }
        if refresh {
            v.start_refresh();
        }
    }

    /// Refit runs synchronously on identity change, before any tick of the
    /// (now cancelled) tracker can land on the new shipment.
    fn handle_selection_change(&mut self) {
        let v = &mut self.viewer;
        if v.selected_shipment == v.last_fitted_shipment {
            return;
        }
        v.tracker.on_shipment_changed(v.selected_shipment.as_deref());
        let Some(shipment) = v.selected_shipment_record() else {
            // Record not visible yet (initial load still in flight); the
            // refit retries once it appears.
            if v.selected_shipment.is_none() {
                v.last_fitted_shipment = None;
            }
            return;
        };
        let journey = build_journey(shipment);
        if let Some(viewport) =
            fit_viewport(&journey.points(), v.tracking_cfg.viewport_padding_px)
        {
            let camera = camera_for(&viewport, v.tracking_cfg.zoom_limits);
            apply_camera(&mut v.map, camera);
            log::debug!("viewport refit for {:?}", v.selected_shipment);
        }
        v.last_fitted_shipment = v.selected_shipment.clone();
    }

    fn advance_tracker(&mut self, dt: f64) {
        let v = &mut self.viewer;
        let Some(id) = v.tracker.tracked_shipment().map(str::to_string) else {
            return;
        };
        let Some(shipment) = v.loaded_shipments().iter().find(|s| s.id == id).cloned() else {
            // The record is gone from the last completed load (deleted on
            // the backend). A refresh in flight keeps the previous list
            // visible, so this never fires mid-fetch.
            v.tracker.disable();
            return;
        };
        let current = shipment
            .current_position
            .unwrap_or_else(|| build_journey(&shipment).origin);
        if let Some(next) = v.tracker.advance(dt, current, v.feed.as_mut()) {
            if let StoreLoadState::Loaded(list) = &mut v.shipments {
                if let Some(slot) = list.iter_mut().find(|s| s.id == id) {
                    *slot = slot.with_position(next);
                }
            }
            // Follow the vessel at the user's zoom level; no full refit.
            v.map.set_center(next);
            log::debug!("tick moved {} to ({:.4}, {:.4})", id, next.lat, next.lng);
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_channels();

        {
            let v = &mut self.viewer;
            ctx.set_visuals(if v.dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });

            if matches!(v.shipments, StoreLoadState::NotLoaded) {
                if v.store.is_some() {
                    v.start_refresh();
                } else {
                    v.shipments = StoreLoadState::Loaded(demo_shipments());
                }
            }
            if v.selected_shipment.is_none() {
                v.selected_shipment = v.loaded_shipments().first().map(|s| s.id.clone());
            }
        }

        self.handle_selection_change();

        let dt = ctx.input(|i| i.stable_dt) as f64;
        self.advance_tracker(dt);

        {
            let v = &mut self.viewer;
            if v.auto_refresh && v.store.is_some() {
                v.refresh_elapsed += dt;
                if v.refresh_elapsed >= v.tracking_cfg.refresh_interval_secs {
                    v.refresh_elapsed = 0.0;
                    v.start_refresh();
                }
            }
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("⚓ VoyageTrack").strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⚙").clicked() {
                        self.viewer.show_side_panel = !self.viewer.show_side_panel;
                    }
                });
            });
        });

        if self.viewer.show_side_panel {
            egui::SidePanel::right("settings_panel")
                .default_width(220.0)
                .show(ctx, |ui| {
                    self.viewer.show_settings(ui);
                });
        }

        DockArea::new(&mut self.dock_state)
            .style(egui_dock::Style::from_egui(ctx.style().as_ref()))
            .show(ctx, &mut self.viewer);

        // Keep timers moving even without input events.
        ctx.request_repaint();
    }
}
