//! Triangle tessellation for 2D primitives
//!
//! All shapes come out as flat triangle lists in logical canvas units.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Segment count for a curve of `radius`, enough to look round at 800x600
pub fn segments_for(radius: f32, span: f32) -> u32 {
    let full = (radius * 1.5).clamp(12.0, 64.0);
    ((full * span / TAU).ceil() as u32).max(4)
}

/// Axis-aligned filled rectangle
pub fn rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> [Vertex; 6] {
    let (x2, y2) = (x + w, y + h);
    [
        Vertex::new(x, y, color),
        Vertex::new(x2, y, color),
        Vertex::new(x, y2, color),
        Vertex::new(x, y2, color),
        Vertex::new(x2, y, color),
        Vertex::new(x2, y2, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Thick band along a circle between angles `start` and `end`.
///
/// A full ring is `arc_band(c, r, w, 0.0, TAU, ..)`.
pub fn arc_band(
    center: Vec2,
    radius: f32,
    width: f32,
    start: f32,
    end: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let inner_r = (radius - width / 2.0).max(0.0);
    let outer_r = radius + width / 2.0;
    let span = end - start;
    let at = |r: f32, theta: f32| center + Vec2::new(r * theta.cos(), r * theta.sin());

    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = start + span * (i as f32 / segments as f32);
        let theta2 = start + span * ((i + 1) as f32 / segments as f32);

        let inner1 = at(inner_r, theta1);
        let outer1 = at(outer_r, theta1);
        let inner2 = at(inner_r, theta2);
        let outer2 = at(outer_r, theta2);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Straight stroke from `a` to `b` as a quad
pub fn line(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> [Vertex; 6] {
    let dir = (b - a).normalize_or_zero();
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a1 = a + perp;
    let a2 = a - perp;
    let b1 = b + perp;
    let b2 = b - perp;

    [
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b2.x, b2.y, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_rect_covers_corners() {
        let v = rect(10.0, 20.0, 30.0, 5.0, WHITE);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 25.0);
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let center = Vec2::new(100.0, 100.0);
        let v = circle(center, 10.0, WHITE, 16);
        assert_eq!(v.len(), 48);
        for vertex in v {
            let p = Vec2::from(vertex.position);
            assert!(p.distance(center) <= 10.0 + 1e-3);
        }
    }

    #[test]
    fn test_half_arc_stays_on_one_side() {
        // 0..PI sweeps through +y, which is the bottom half on a y-down canvas
        let center = Vec2::new(50.0, 50.0);
        let v = arc_band(center, 12.0, 2.0, 0.0, PI, WHITE, 8);
        assert_eq!(v.len(), 48);
        for vertex in v {
            assert!(vertex.position[1] >= center.y - 1e-3);
            let d = Vec2::from(vertex.position).distance(center);
            assert!(d >= 11.0 - 1e-3 && d <= 13.0 + 1e-3);
        }
    }

    #[test]
    fn test_line_width() {
        let v = line(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 2.0, WHITE);
        assert_eq!(v[0].position, [0.0, 1.0]);
        assert_eq!(v[1].position, [0.0, -1.0]);
        assert_eq!(v[5].position, [10.0, -1.0]);
    }

    #[test]
    fn test_segments_scale_with_size() {
        assert!(segments_for(3.0, TAU) >= 12);
        assert!(segments_for(40.0, TAU) > segments_for(3.0, TAU));
        assert!(segments_for(100.0, TAU) <= 64);
        assert!(segments_for(10.0, PI) >= 4);
    }
}
