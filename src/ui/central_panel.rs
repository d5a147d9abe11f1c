//! Central panel UI module: draws the arena, both airplanes and their vectors,
//! captures the user's drag gesture and overlays the answer after a check.

use std::sync::Arc;
use parking_lot::RwLock;
use eframe::egui::{self, Align2, Color32, Context, FontId, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::aircraft::MotionModel;
use crate::session::Session;
use crate::utils::geometry::{Arena, Point2D};

/// Side of the square drawn at each airplane's start.
const MARKER_SIZE: f32 = 10.0;

/// The `CentralPanel` struct provides the arena viewport.
pub struct CentralPanel {
    session: Arc<RwLock<Session>>,

    /// Where the arena was drawn last frame.
    canvas: Option<Rect>,
}

impl CentralPanel {
    pub fn new(session: Arc<RwLock<Session>>) -> Self {
        Self { session, canvas: None }
    }

    pub fn canvas_rect(&self) -> Option<Rect> {
        self.canvas
    }

    /// Called each frame to update the central panel.
    pub fn update(&mut self, ctx: &Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::from_gray(20)))
            .show(ctx, |ui| {
                let arena = *self.session.read().arena();
                let side = arena.size as f32;
                let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::drag());
                let rect = response.rect;
                self.canvas = Some(rect);

                // --- Input: one line per drag gesture ---
                if response.drag_started() {
                    if let Some(pos) = ui.input().pointer.press_origin() {
                        self.session.write().begin_measurement(screen_to_arena(rect, &arena, pos));
                    }
                }
                if response.drag_released() {
                    let pos = ui.input().pointer.interact_pos();
                    if let Some(pos) = pos.or_else(|| ui.input().pointer.hover_pos()) {
                        self.session.write().finish_measurement(screen_to_arena(rect, &arena, pos));
                    }
                }

                // --- Drawing ---
                painter.rect_filled(rect, 0.0, Color32::BLACK);
                let session = self.session.read();
                self.draw_airplanes(&painter, rect, &session);
                self.draw_user_line(&painter, rect, &session, ui.input().pointer.hover_pos());
                self.draw_report(&painter, rect, &session);
                drop(session);

                if response.dragged() {
                    ctx.request_repaint();
                }
            });
    }

    fn draw_airplanes(&self, painter: &Painter, rect: Rect, session: &Session) {
        let arena = session.arena();
        let scenario = session.scenario();
        for plane in [scenario.first(), scenario.second()] {
            self.draw_airplane(painter, rect, arena, plane, session.vector_scale());
        }
    }

    /// Start position as a white square plus the velocity vector.
    fn draw_airplane(
        &self,
        painter: &Painter,
        rect: Rect,
        arena: &Arena,
        plane: &MotionModel,
        scale: f64,
    ) {
        let start = arena_to_screen(rect, arena, &plane.position0());
        painter.rect_filled(
            Rect::from_center_size(start, Vec2::splat(MARKER_SIZE)),
            0.0,
            Color32::WHITE,
        );
        let tip = arena_to_screen(rect, arena, &plane.vector_tip(scale));
        painter.line_segment([start, tip], Stroke::new(1.0, Color32::WHITE));
    }

    fn draw_user_line(&self, painter: &Painter, rect: Rect, session: &Session, hover: Option<Pos2>) {
        let arena = session.arena();
        let stroke = Stroke::new(1.0, Color32::GREEN);

        if let (Some(start), Some(pointer)) = (session.pending_start(), hover) {
            // Still dragging.
            painter.line_segment([arena_to_screen(rect, arena, &start), pointer], stroke);
        } else if let Some(line) = session.measurement() {
            painter.line_segment(
                [arena_to_screen(rect, arena, &line.start), arena_to_screen(rect, arena, &line.end)],
                stroke,
            );
        }
    }

    /// True closest-approach segment in red, distances next to the user's line.
    fn draw_report(&self, painter: &Painter, rect: Rect, session: &Session) {
        let Some(report) = session.report() else {
            return;
        };
        let arena = session.arena();

        let p1 = arena_to_screen(rect, arena, &report.approach.first);
        let p2 = arena_to_screen(rect, arena, &report.approach.second);
        painter.line_segment([p1, p2], Stroke::new(1.0, Color32::RED));

        let anchor = match session.measurement() {
            Some(line) => arena_to_screen(rect, arena, &line.end),
            None => p2,
        };
        let font = FontId::proportional(14.0);
        painter.text(
            anchor + Vec2::new(40.0, -20.0),
            Align2::LEFT_BOTTOM,
            report.true_distance.to_string(),
            font.clone(),
            Color32::RED,
        );
        if let Some(user) = report.user_distance {
            painter.text(
                anchor + Vec2::new(40.0, 0.0),
                Align2::LEFT_BOTTOM,
                user.to_string(),
                font,
                Color32::GREEN,
            );
        }
    }
}

/// Converts arena coordinates to screen coordinates inside `rect`.
pub fn arena_to_screen(rect: Rect, arena: &Arena, p: &Point2D) -> Pos2 {
    let k = rect.width() / arena.size as f32;
    Pos2::new(rect.min.x + p.x as f32 * k, rect.min.y + p.y as f32 * k)
}

/// Converts screen coordinates inside `rect` to arena coordinates.
pub fn screen_to_arena(rect: Rect, arena: &Arena, pos: Pos2) -> Point2D {
    let k = arena.size / rect.width() as f64;
    Point2D::new((pos.x - rect.min.x) as f64 * k, (pos.y - rect.min.y) as f64 * k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_coordinate_conversion() {
        let arena = Arena::default();
        let rect = Rect::from_min_size(Pos2::new(250.0, 30.0), Vec2::splat(800.0));

        let screen = arena_to_screen(rect, &arena, &Point2D::new(100.0, 700.0));
        assert_eq!(screen, Pos2::new(350.0, 730.0));

        let back = screen_to_arena(rect, &arena, screen);
        assert_approx_eq!(back.x, 100.0);
        assert_approx_eq!(back.y, 700.0);
    }

    #[test]
    fn test_scaled_canvas() {
        let arena = Arena::default();
        let rect = Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::splat(400.0));
        let p = screen_to_arena(rect, &arena, Pos2::new(200.0, 100.0));
        assert_approx_eq!(p.x, 400.0);
        assert_approx_eq!(p.y, 200.0);
    }
}
