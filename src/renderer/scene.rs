//! Builds the frame's triangles from the session (pixel space, y down)

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{GameSession, Screen};

/// Segments per balloon/claw ellipse
pub const ELLIPSE_SEGMENTS: u32 = 32;
/// Stroke width for the claw string and arrow shaft
pub const STROKE_WIDTH: f32 = 4.0;

/// Clear color for the current screen
pub fn clear_color(screen: Screen) -> [f32; 4] {
    match screen {
        Screen::Playing => colors::BACKGROUND,
        _ => colors::OVERLAY,
    }
}

/// Triangles for the play field. Empty outside Playing (the overlay is text only).
pub fn build_scene(session: &GameSession) -> Vec<Vertex> {
    if session.screen != Screen::Playing {
        return Vec::new();
    }

    let mut vertices = Vec::new();
    let claw = session.claw;

    // Claw string and oval
    vertices.extend(shapes::line(
        Vec2::new(claw.x, 0.0),
        Vec2::new(claw.x, claw.y),
        STROKE_WIDTH,
        colors::CLAW,
    ));
    vertices.extend(shapes::ellipse(
        Vec2::new(claw.x, claw.y + 5.0),
        12.0,
        8.0,
        colors::CLAW,
        ELLIPSE_SEGMENTS,
    ));

    // Arrow shaft and head
    if session.projectile.dropping {
        let tip_y = session.projectile.y;
        vertices.extend(shapes::line(
            Vec2::new(claw.x, claw.y),
            Vec2::new(claw.x, tip_y),
            STROKE_WIDTH,
            colors::ARROW,
        ));
        vertices.extend(shapes::triangle(
            Vec2::new(claw.x - 5.0, tip_y),
            Vec2::new(claw.x, tip_y + 8.0),
            Vec2::new(claw.x + 5.0, tip_y),
            colors::ARROW,
        ));
    }

    for balloon in &session.balloons {
        vertices.extend(shapes::ellipse(
            balloon.pos,
            session.settings.balloon_width / 2.0,
            session.settings.balloon_height / 2.0,
            balloon.color.rgba(),
            ELLIPSE_SEGMENTS,
        ));
    }

    vertices
}
