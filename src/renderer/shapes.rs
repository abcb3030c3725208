//! Shape generation for 2D primitives
//!
//! All coordinates are in pixels with y growing downward.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

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

/// Axis-aligned filled rectangle around `center`
pub fn rect(center: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let half = size * 0.5;
    let mut vertices = Vec::with_capacity(6);
    quad(
        &mut vertices,
        center + Vec2::new(-half.x, -half.y),
        center + Vec2::new(half.x, -half.y),
        center + Vec2::new(half.x, half.y),
        center + Vec2::new(-half.x, half.y),
        color,
    );
    vertices
}

/// Single filled triangle
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Swept-back arrowhead pointing up, spanning `radius` in each direction
pub fn arrowhead(center: Vec2, radius: f32, color: [f32; 4]) -> Vec<Vertex> {
    let nose = center + Vec2::new(0.0, -radius);
    let notch = center + Vec2::new(0.0, radius * 0.5);
    let left = center + Vec2::new(-radius, radius);
    let right = center + Vec2::new(radius, radius);

    let mut vertices = triangle(nose, left, notch, color);
    vertices.extend(triangle(nose, notch, right, color));
    vertices
}

/// Plus sign made of two bars
pub fn cross(center: Vec2, size: f32, color: [f32; 4]) -> Vec<Vertex> {
    let bar = size * 0.3;
    let mut vertices = rect(center, Vec2::new(size, bar), color);
    vertices.extend(rect(center, Vec2::new(bar, size), color));
    vertices
}

/// Zig-zag lightning bolt
pub fn bolt(center: Vec2, size: f32, color: [f32; 4]) -> Vec<Vertex> {
    let h = size * 0.5;
    let top = center + Vec2::new(h * 0.3, -h);
    let mid_left = center + Vec2::new(-h * 0.5, h * 0.1);
    let mid_right = center + Vec2::new(h * 0.5, -h * 0.1);
    let bottom = center + Vec2::new(-h * 0.3, h);

    let mut vertices = triangle(top, mid_left, center, color);
    vertices.extend(triangle(center, mid_right, bottom, color));
    vertices
}

/// Two triangles covering the quad `a b c d` (in winding order)
fn quad(vertices: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) {
    vertices.push(Vertex::new(a.x, a.y, color));
    vertices.push(Vertex::new(b.x, b.y, color));
    vertices.push(Vertex::new(c.x, c.y, color));

    vertices.push(Vertex::new(a.x, a.y, color));
    vertices.push(Vertex::new(c.x, c.y, color));
    vertices.push(Vertex::new(d.x, d.y, color));
}
