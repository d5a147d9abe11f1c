// src/ui/status_bar.rs

use std::sync::Arc;
use eframe::egui::{self, Context};
use parking_lot::RwLock;

use crate::session::Session;
use crate::ui::central_panel::screen_to_arena;

pub struct StatusBar {
    session: Arc<RwLock<Session>>,
    /// Screen rectangle of the arena canvas, for pointer readout.
    pub canvas: Option<egui::Rect>,
}

impl StatusBar {
    pub fn new(session: Arc<RwLock<Session>>) -> Self {
        Self { session, canvas: None }
    }

    pub fn update(&mut self, ctx: &Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let session = self.session.read(); // Keep the read lock short.

            let coord_label = match (self.canvas, ui.input().pointer.hover_pos()) {
                (Some(rect), Some(pos)) if rect.contains(pos) => {
                    let p = screen_to_arena(rect, session.arena(), pos);
                    format!("({}, {})", p.x as i32, p.y as i32)
                }
                _ => String::new(),
            };

            ui.horizontal(|ui| {
                ui.label(&session.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(coord_label);
                });
            });
        });
    }
}
