//! Side-panel settings for display, tracking, and refresh options.

use crate::tracker::JitterFeed;
use crate::viewer::ViewerState;
use eframe::egui;

impl ViewerState {
    pub(crate) fn show_settings(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Display").strong());
        ui.checkbox(&mut self.dark_mode, "Dark mode");

        ui.separator();
        ui.label(egui::RichText::new("Live tracking").strong());
        let mut period = self.tracker.period();
        ui.horizontal(|ui| {
            ui.label("Tick period:");
            if ui
                .add(egui::DragValue::new(&mut period).range(1.0..=120.0).suffix(" s"))
                .changed()
            {
                self.tracking_cfg.tick_period_secs = period;
                self.tracker.set_period(period);
            }
        });
        ui.horizontal(|ui| {
            ui.label("Jitter bound:");
            let mut jitter = self.tracking_cfg.jitter_max_deg;
            if ui
                .add(
                    egui::DragValue::new(&mut jitter)
                        .range(0.001..=0.05)
                        .speed(0.001)
                        .suffix("°"),
                )
                .changed()
            {
                self.tracking_cfg.jitter_max_deg = jitter;
                self.feed = Box::new(JitterFeed::new(jitter));
            }
        });
        ui.horizontal(|ui| {
            ui.label("Fit padding:");
            ui.add(
                egui::DragValue::new(&mut self.tracking_cfg.viewport_padding_px)
                    .range(0..=128)
                    .suffix(" px"),
            );
        });

        ui.separator();
        ui.label(egui::RichText::new("Data").strong());
        ui.checkbox(&mut self.auto_refresh, "Auto refresh shipments");
        ui.horizontal(|ui| {
            ui.label("Interval:");
            ui.add(
                egui::DragValue::new(&mut self.tracking_cfg.refresh_interval_secs)
                    .range(10.0..=600.0)
                    .suffix(" s"),
            );
        });
        if self.store.is_some() {
            if ui.button("Refresh now").clicked() {
                self.start_refresh();
            }
        } else {
            ui.label(egui::RichText::new("Demo mode").small().weak());
        }

        ui.separator();
        ui.label(
            egui::RichText::new(format!("voyagetrack {}", env!("GIT_HASH")))
                .small()
                .weak(),
        );
    }
}
