//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for a filled axis-aligned ellipse
pub fn ellipse(
    center: Vec2,
    radius_x: f32,
    radius_y: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius_x * theta1.cos(),
            center.y + radius_y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius_x * theta2.cos(),
            center.y + radius_y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a thick line segment (a quad)
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a = from + perp;
    let b = from - perp;
    let c = to + perp;
    let d = to - perp;

    // Two triangles
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Generate vertices for a filled triangle
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_ellipse_extent() {
        let verts = ellipse(Vec2::new(100.0, 50.0), 25.0, 17.5, WHITE, 32);
        assert_eq!(verts.len(), 96);
        let max_x = verts.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        let max_y = verts.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert!((max_x - 125.0).abs() < 0.01);
        assert!((max_y - 67.5).abs() < 0.1);
    }

    #[test]
    fn test_line_width() {
        let verts = line(Vec2::new(10.0, 0.0), Vec2::new(10.0, 100.0), 4.0, WHITE);
        assert_eq!(verts.len(), 6);
        for v in &verts {
            assert!((v.position[0] - 10.0).abs() <= 2.0 + 1e-4);
        }
    }

    #[test]
    fn test_degenerate_line_is_empty() {
        assert!(line(Vec2::ONE, Vec2::ONE, 4.0, WHITE).is_empty());
    }
}
