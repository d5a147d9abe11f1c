//! # Main Window Module
//!
//! The drill window, built with eframe/egui:
//! - A left side panel with the controls and airplane details.
//! - A central canvas showing the arena.
//! - A bottom status bar for messages and the pointer position.
//!
//! All three share one [`Session`] behind an `Arc<RwLock<_>>`.

use std::error::Error;
use std::sync::Arc;

use log::info;
use parking_lot::RwLock;

use crate::config::Settings;
use crate::session::Session;
use crate::ui::{CentralPanel, SidePanel, StatusBar};

/// MainWindow holds the panels of the UI.
pub struct MainWindow {
    central_panel: CentralPanel,
    side_panel: SidePanel,
    status_bar: StatusBar,
}

impl MainWindow {
    pub fn new(session: Arc<RwLock<Session>>) -> Self {
        MainWindow {
            central_panel: CentralPanel::new(Arc::clone(&session)),
            side_panel: SidePanel::new(Arc::clone(&session)),
            status_bar: StatusBar::new(session),
        }
    }

    /// Draws the complete UI layout. Side and bottom panels go first so the
    /// canvas gets the remaining space.
    pub fn show(&mut self, ctx: &egui::Context) {
        self.side_panel.update(ctx);
        self.status_bar.canvas = self.central_panel.canvas_rect();
        self.status_bar.update(ctx);
        self.central_panel.update(ctx);
    }
}

impl eframe::App for MainWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

/// Runs the drill as an egui application.
pub fn run_main_window(settings: &Settings) -> Result<(), Box<dyn Error>> {
    let session = Arc::new(RwLock::new(Session::new(settings)?));

    let side = settings.arena.size as f32;
    let native_options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(side + 260.0, side + 60.0)),
        ..Default::default()
    };

    info!("Opening drill window");
    eframe::run_native(
        "Flight Control",
        native_options,
        Box::new(move |_cc| Box::new(MainWindow::new(session))),
    );
    // run_native returns () so we simply return Ok.
    Ok(())
}
