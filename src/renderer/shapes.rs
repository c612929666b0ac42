//! Shape generation for 2D primitives
//!
//! Every function returns a triangle list in surface pixels.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

fn quad(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) {
    // a-b-c-d in winding order
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));

    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(c.x, c.y, color));
    out.push(Vertex::new(d.x, d.y, color));
}

/// Axis-aligned rectangle from its top-left corner
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    let max = min + size;
    quad(
        &mut vertices,
        min,
        Vec2::new(max.x, min.y),
        max,
        Vec2::new(min.x, max.y),
        color,
    );
    vertices
}

/// Rectangle centred on `center`
pub fn rect_centered(center: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    rect(center - size / 2.0, size, color)
}

pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Thick line segment
pub fn line(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    let mut vertices = Vec::with_capacity(6);
    quad(&mut vertices, a + perp, b + perp, b - perp, a - perp, color);
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, Vec2::splat(radius), 0.0, color, segments)
}

/// Filled ellipse with `radii` along its own axes, rotated by `rotation`
pub fn ellipse(
    center: Vec2,
    radii: Vec2,
    rotation: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(3);
    let (sin, cos) = rotation.sin_cos();
    let point = |i: u32| {
        let theta = (i as f32 / segments as f32) * TAU;
        let local = Vec2::new(radii.x * theta.cos(), radii.y * theta.sin());
        center + Vec2::new(local.x * cos - local.y * sin, local.x * sin + local.y * cos)
    };

    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    for i in 0..segments {
        let p1 = point(i);
        let p2 = point(i + 1);

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    arc_band(center, inner_radius, outer_radius, 0.0, TAU, color, segments)
}

/// Pie slice from `start` to `end` (radians, screen orientation)
pub fn wedge(
    center: Vec2,
    radius: f32,
    start: f32,
    end: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(1);
    let span = end - start;
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = start + span * (i as f32 / segments as f32);
        let theta2 = start + span * ((i + 1) as f32 / segments as f32);
        let p1 = center + Vec2::new(theta1.cos(), theta1.sin()) * radius;
        let p2 = center + Vec2::new(theta2.cos(), theta2.sin()) * radius;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Stroked arc centred on `radius`, `width` thick
pub fn arc_stroke(
    center: Vec2,
    radius: f32,
    width: f32,
    start: f32,
    end: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let half = width / 2.0;
    arc_band(center, radius - half, radius + half, start, end, color, segments)
}

/// Thick arc band between two radii
fn arc_band(
    center: Vec2,
    inner_r: f32,
    outer_r: f32,
    start: f32,
    end: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let span = end - start;
    if span.abs() <= f32::EPSILON {
        return Vec::new();
    }
    let segments = segments.max(1);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = start + span * (i as f32 / segments as f32);
        let theta2 = start + span * ((i + 1) as f32 / segments as f32);
        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());

        quad(
            &mut vertices,
            center + dir1 * inner_r,
            center + dir1 * outer_r,
            center + dir2 * outer_r,
            center + dir2 * inner_r,
            color,
        );
    }

    vertices
}

/// Fan-filled polygon; `points` must be star-shaped around `hub`
pub fn polygon(hub: Vec2, points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity(points.len() * 3);
    for (i, p1) in points.iter().enumerate() {
        let p2 = points[(i + 1) % points.len()];
        vertices.push(Vertex::new(hub.x, hub.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }
    vertices
}

/// Sample a quadratic Bezier curve (excluding its start point)
pub fn quadratic_curve(from: Vec2, control: Vec2, to: Vec2, steps: u32) -> Vec<Vec2> {
    let steps = steps.max(1);
    (1..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            let u = 1.0 - t;
            from * (u * u) + control * (2.0 * u * t) + to * (t * t)
        })
        .collect()
}
