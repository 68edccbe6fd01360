//! Admin tab: backend sign-in and the shipment CRUD form.
//!
//! Authentication is delegated to the backend's auth endpoint; there are no
//! client-side credentials.

use crate::geo::GeoPoint;
use crate::shipment::TrackedShipment;
use crate::store::AuthState;
use crate::viewer::ViewerState;
use chrono::{DateTime, NaiveDate, Utc};
use eframe::egui;
use std::sync::mpsc;

/// Editable form state for creating or updating a shipment record.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct AdminForm {
    pub id: String,
    pub name: String,
    pub origin: String,
    pub destination: String,
    pub ship: String,
    pub status: String,
    /// ETA date as YYYY-MM-DD.
    pub eta: String,
    pub image: String,
    pub lat: String,
    pub lng: String,
}

impl AdminForm {
    pub(crate) fn from_shipment(shipment: &TrackedShipment) -> Self {
        AdminForm {
            id: shipment.id.clone(),
            name: shipment.name.clone(),
            origin: shipment.origin_name.clone(),
            destination: shipment.destination_name.clone(),
            ship: shipment.vessel_name.clone(),
            status: shipment.status.clone(),
            eta: shipment.eta.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            image: shipment.image.clone(),
            lat: shipment.current_position.map(|p| p.lat.to_string()).unwrap_or_default(),
            lng: shipment.current_position.map(|p| p.lng.to_string()).unwrap_or_default(),
        }
    }

    pub(crate) fn to_shipment(&self) -> Result<TrackedShipment, String> {
        if self.id.trim().is_empty() {
            return Err("product id is required".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("product name is required".to_string());
        }
        let eta = if self.eta.trim().is_empty() {
            None
        } else {
            let date = NaiveDate::parse_from_str(self.eta.trim(), "%Y-%m-%d")
                .map_err(|e| format!("bad ETA date: {}", e))?;
            let midnight = date
                .and_hms_opt(0, 0, 0)
                .ok_or("bad ETA date")?;
            Some(DateTime::<Utc>::from_naive_utc_and_offset(midnight, Utc))
        };
        let current_position = match (self.lat.trim(), self.lng.trim()) {
            ("", "") => None,
            (lat, lng) => {
                let lat: f64 = lat.parse().map_err(|_| "bad latitude".to_string())?;
                let lng: f64 = lng.parse().map_err(|_| "bad longitude".to_string())?;
                if !(-90.0..=90.0).contains(&lat) {
                    return Err("latitude out of range".to_string());
                }
                if !(-180.0..=180.0).contains(&lng) {
                    return Err("longitude out of range".to_string());
                }
                Some(GeoPoint::new(lat, lng))
            }
        };
        Ok(TrackedShipment {
            id: self.id.trim().to_string(),
            name: self.name.trim().to_string(),
            origin_name: self.origin.trim().to_string(),
            destination_name: self.destination.trim().to_string(),
            vessel_name: self.ship.trim().to_string(),
            status: self.status.trim().to_string(),
            eta,
            image: self.image.trim().to_string(),
            current_position,
        })
    }
}

enum Mutation {
    Create(TrackedShipment),
    Update(String, TrackedShipment),
    Delete(String),
}

impl ViewerState {
    pub(crate) fn show_admin(&mut self, ui: &mut egui::Ui) {
        if self.store.is_none() {
            ui.add_space(8.0);
            ui.label("The admin console needs a configured backend.");
            ui.label(
                egui::RichText::new(
                    "Set VOYAGETRACK_SUPABASE_URL and VOYAGETRACK_SUPABASE_KEY and restart.",
                )
                .small()
                .weak(),
            );
            return;
        }

        match &self.auth {
            AuthState::SignedIn(_) => self.show_admin_console(ui),
            _ => self.show_login(ui),
        }
    }

    fn show_login(&mut self, ui: &mut egui::Ui) {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.set_max_width(360.0);
            ui.heading("Admin Login");
            ui.label(egui::RichText::new("Welcome back! Please login to continue.").weak());
            ui.add_space(12.0);
            ui.add(
                egui::TextEdit::singleline(&mut self.login_email).hint_text("Email"),
            );
            ui.add(
                egui::TextEdit::singleline(&mut self.login_password)
                    .hint_text("Password")
                    .password(true),
            );
            ui.add_space(8.0);

            let signing_in = matches!(self.auth, AuthState::SigningIn);
            if signing_in {
                ui.label("Signing in…");
            } else if ui.button("Sign in").clicked() {
                self.start_sign_in();
            }
            if let AuthState::Failed(e) = &self.auth {
                ui.colored_label(egui::Color32::LIGHT_RED, e);
            }
        });
    }

    fn start_sign_in(&mut self) {
        let Some(store) = self.store.clone() else {
            return;
        };
        let email = self.login_email.trim().to_string();
        let password = self.login_password.clone();
        if email.is_empty() || password.is_empty() {
            self.auth = AuthState::Failed("email and password are required".to_string());
            return;
        }
        let (tx, rx) = mpsc::channel();
        self.auth_rx = Some(rx);
        self.auth = AuthState::SigningIn;
        std::thread::spawn(move || {
            let _ = tx.send(store.sign_in(&email, &password));
        });
    }

    fn show_admin_console(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Admin Dashboard");
            if let AuthState::SignedIn(session) = &self.auth {
                ui.label(egui::RichText::new(&session.email).small().weak());
            }
            if ui.button("Logout").clicked() {
                self.auth = AuthState::SignedOut;
                self.session = None;
                self.login_password.clear();
                return;
            }
            if ui.button("Seed demo data").clicked() {
                self.start_populate();
            }
        });
        if let Some(e) = &self.last_mutation_error {
            ui.colored_label(egui::Color32::LIGHT_RED, e);
        }
        ui.separator();

        let editing = self.editing_id.is_some();
        ui.label(
            egui::RichText::new(if editing { "Edit Product" } else { "Create Product" }).strong(),
        );
        egui::Grid::new("admin_form").num_columns(2).show(ui, |ui| {
            ui.label("Product ID");
            ui.add_enabled(!editing, egui::TextEdit::singleline(&mut self.admin_form.id));
            ui.end_row();
            ui.label("Product Name");
            ui.text_edit_singleline(&mut self.admin_form.name);
            ui.end_row();
            ui.label("Origin");
            ui.text_edit_singleline(&mut self.admin_form.origin);
            ui.end_row();
            ui.label("Destination");
            ui.text_edit_singleline(&mut self.admin_form.destination);
            ui.end_row();
            ui.label("Ship Name");
            ui.text_edit_singleline(&mut self.admin_form.ship);
            ui.end_row();
            ui.label("Status");
            ui.text_edit_singleline(&mut self.admin_form.status);
            ui.end_row();
            ui.label("ETA (YYYY-MM-DD)");
            ui.text_edit_singleline(&mut self.admin_form.eta);
            ui.end_row();
            ui.label("Image URL");
            ui.text_edit_singleline(&mut self.admin_form.image);
            ui.end_row();
            ui.label("Current latitude");
            ui.text_edit_singleline(&mut self.admin_form.lat);
            ui.end_row();
            ui.label("Current longitude");
            ui.text_edit_singleline(&mut self.admin_form.lng);
            ui.end_row();
        });

        ui.horizontal(|ui| {
            let label = if editing { "Update Product" } else { "Create Product" };
            if ui.button(label).clicked() {
                match self.admin_form.to_shipment() {
                    Ok(shipment) => {
                        self.last_mutation_error = None;
                        let mutation = match self.editing_id.clone() {
                            Some(id) => Mutation::Update(id, shipment),
                            None => Mutation::Create(shipment),
                        };
                        self.start_mutation(mutation);
                        self.reset_form();
                    }
                    Err(e) => self.last_mutation_error = Some(e),
                }
            }
            if editing && ui.button("Cancel").clicked() {
                self.reset_form();
            }
        });

        ui.separator();
        ui.label(egui::RichText::new("Products").strong());
        let shipments: Vec<TrackedShipment> = self.loaded_shipments().to_vec();
        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("admin_table").striped(true).num_columns(5).show(ui, |ui| {
                ui.label(egui::RichText::new("ID").small().strong());
                ui.label(egui::RichText::new("Name").small().strong());
                ui.label(egui::RichText::new("Route").small().strong());
                ui.label(egui::RichText::new("Status").small().strong());
                ui.label(egui::RichText::new("Actions").small().strong());
                ui.end_row();
                for shipment in &shipments {
                    ui.label(&shipment.id);
                    ui.label(&shipment.name);
                    ui.label(format!("{} → {}", shipment.origin_name, shipment.destination_name));
                    ui.label(&shipment.status);
                    ui.horizontal(|ui| {
                        if ui.button("Edit").clicked() {
                            self.editing_id = Some(shipment.id.clone());
                            self.admin_form = AdminForm::from_shipment(shipment);
                        }
                        if self.confirm_delete.as_deref() == Some(shipment.id.as_str()) {
                            if ui.button("Confirm delete").clicked() {
                                self.start_mutation(Mutation::Delete(shipment.id.clone()));
                                self.confirm_delete = None;
                            }
                            if ui.button("Keep").clicked() {
                                self.confirm_delete = None;
                            }
                        } else if ui.button("Delete").clicked() {
                            self.confirm_delete = Some(shipment.id.clone());
                        }
                    });
                    ui.end_row();
                }
            });
        });
    }

    pub(crate) fn reset_form(&mut self) {
        self.editing_id = None;
        self.admin_form = AdminForm::default();
    }

    fn session_store(&self) -> Option<crate::store::RestStore> {
        let store = self.store.clone()?;
        Some(match &self.session {
            Some(session) => store.with_session(session),
            None => store,
        })
    }

    fn start_mutation(&mut self, mutation: Mutation) {
        let Some(store) = self.session_store() else {
            return;
        };
        let (tx, rx) = mpsc::channel();
        self.mutation_rx = Some(rx);
        std::thread::spawn(move || {
            let result = match mutation {
                Mutation::Create(shipment) => store.create(&shipment),
                Mutation::Update(id, shipment) => store.update(&id, &shipment),
                Mutation::Delete(id) => store.delete(&id),
            };
            let _ = tx.send(result);
        });
    }

    fn start_populate(&mut self) {
        let Some(store) = self.session_store() else {
            return;
        };
        let (tx, rx) = mpsc::channel();
        self.populate_rx = Some(rx);
        std::thread::spawn(move || {
            let _ = tx.send(crate::demo::populate(&store));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> AdminForm {
        AdminForm {
            id: "PRD010".to_string(),
            name: "Test Cargo".to_string(),
            origin: "Sweden".to_string(),
            destination: "Los Angeles".to_string(),
            ship: "MV Test".to_string(),
            status: "Loading".to_string(),
            eta: "2025-05-01".to_string(),
            image: String::new(),
            lat: "57.7".to_string(),
            lng: "11.97".to_string(),
        }
    }

    #[test]
    fn form_parses_to_shipment() {
        let s = filled_form().to_shipment().unwrap();
        assert_eq!(s.id, "PRD010");
        assert_eq!(s.current_position, Some(GeoPoint::new(57.7, 11.97)));
        assert_eq!(s.eta.unwrap().format("%Y-%m-%d").to_string(), "2025-05-01");
    }

    #[test]
    fn form_requires_id_and_name() {
        let mut f = filled_form();
        f.id.clear();
        assert!(f.to_shipment().is_err());
        let mut f = filled_form();
        f.name = "  ".to_string();
        assert!(f.to_shipment().is_err());
    }

    #[test]
    fn form_rejects_out_of_range_coordinates() {
        let mut f = filled_form();
        f.lat = "91".to_string();
        assert!(f.to_shipment().is_err());
        let mut f = filled_form();
        f.lng = "-200".to_string();
        assert!(f.to_shipment().is_err());
    }

    #[test]
    fn form_allows_empty_eta_and_position() {
        let mut f = filled_form();
        f.eta.clear();
        f.lat.clear();
        f.lng.clear();
        let s = f.to_shipment().unwrap();
        assert!(s.eta.is_none());
        assert!(s.current_position.is_none());
    }

    #[test]
    fn form_round_trips_from_shipment() {
        let s = filled_form().to_shipment().unwrap();
        let back = AdminForm::from_shipment(&s).to_shipment().unwrap();
        assert_eq!(s, back);
    }
}
