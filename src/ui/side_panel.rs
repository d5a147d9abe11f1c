// src/ui/side_panel.rs

use std::sync::Arc;
use eframe::egui::{self, Context, Ui};
use log::warn;
use parking_lot::RwLock;

use crate::session::Session;

/// Slider limits for the drawn vector length.
const SCALE_RANGE: std::ops::RangeInclusive<f64> = 0.25..=5.0;

/// Manages the left-side panel with the drill controls and airplane details.
pub struct SidePanel {
    session: Arc<RwLock<Session>>,
    pub show_side_panel: bool,
}

impl SidePanel {
    pub fn new(session: Arc<RwLock<Session>>) -> Self {
        Self {
            session,
            show_side_panel: true,
        }
    }

    /// Called each frame, updates the side panel UI if it's visible.
    pub fn update(&mut self, ctx: &Context) {
        if !self.show_side_panel {
            return;
        }

        egui::SidePanel::left("controls_panel")
            .default_width(220.0)
            .resizable(false)
            .show(ctx, |ui| {
                self.show_controls(ui);
                ui.separator();
                self.show_airplanes(ui);
            });
    }

    fn show_controls(&self, ui: &mut Ui) {
        ui.heading("Drill");

        if ui.button("New scenario").clicked() {
            self.session.write().regenerate();
        }
        if ui.button("Check").clicked() {
            self.session.write().check();
        }

        let mut scale = self.session.read().vector_scale();
        let response = ui.add(egui::Slider::new(&mut scale, SCALE_RANGE).text("Vector scale"));
        if response.changed() {
            if let Err(err) = self.session.write().set_vector_scale(scale) {
                warn!("{}", err);
            }
        }
    }

    /// Start, heading and speed of both airplanes.
    fn show_airplanes(&self, ui: &mut Ui) {
        ui.heading("Airplanes");

        let session = self.session.read();
        let scenario = session.scenario();
        for (name, plane) in [("A", scenario.first()), ("B", scenario.second())] {
            let p = plane.position0();
            ui.label(format!(
                "{}: ({:.0}, {:.0})  {:05.1}°  {:.1}",
                name,
                p.x,
                p.y,
                plane.heading_degrees(),
                plane.speed()
            ));
        }
    }
}
