//! Shape generation for 2D primitives
//!
//! Everything is emitted as a plain triangle list in surface pixels. Gradients
//! are baked into per-vertex colors and interpolated by the rasterizer.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Linear blend between two colors
pub fn lerp_color(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// Push two triangles covering the quad a-b-c-d (clockwise or not)
fn quad(vertices: &mut Vec<Vertex>, corners: [(Vec2, [f32; 4]); 4]) {
    let [a, b, c, d] = corners;
    for (p, color) in [a, b, c, a, c, d] {
        vertices.push(Vertex::new(p.x, p.y, color));
    }
}

/// Solid axis-aligned rectangle
pub fn rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Vec<Vertex> {
    vertical_gradient_rect(x, y, w, h, color, color)
}

/// Rectangle blending from `top` to `bottom`
pub fn vertical_gradient_rect(
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    top: [f32; 4],
    bottom: [f32; 4],
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    if w <= 0.0 || h <= 0.0 {
        return vertices;
    }
    quad(
        &mut vertices,
        [
            (Vec2::new(x, y), top),
            (Vec2::new(x + w, y), top),
            (Vec2::new(x + w, y + h), bottom),
            (Vec2::new(x, y + h), bottom),
        ],
    );
    vertices
}

/// Rectangle with a horizontal gradient through `stops` (offset in 0..=1, color),
/// one vertical band per pair of adjacent stops
pub fn horizontal_gradient_rect(
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    stops: &[(f32, [f32; 4])],
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(stops.len().saturating_sub(1) * 6);
    if w <= 0.0 || h <= 0.0 {
        return vertices;
    }
    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        let x0 = x + w * t0;
        let x1 = x + w * t1;
        quad(
            &mut vertices,
            [
                (Vec2::new(x0, y), c0),
                (Vec2::new(x1, y), c1),
                (Vec2::new(x1, y + h), c1),
                (Vec2::new(x0, y + h), c0),
            ],
        );
    }
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, radius, radius, color, color, segments)
}

/// Filled ellipse whose color blends from `inner` at the center to `outer` at the rim
pub fn ellipse(
    center: Vec2,
    radius_x: f32,
    radius_y: f32,
    inner: [f32; 4],
    outer: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, inner));
        vertices.push(Vertex::new(
            center.x + radius_x * theta1.cos(),
            center.y + radius_y * theta1.sin(),
            outer,
        ));
        vertices.push(Vertex::new(
            center.x + radius_x * theta2.cos(),
            center.y + radius_y * theta2.sin(),
            outer,
        ));
    }

    vertices
}

/// Circle with a radial gradient: solid `inner` out to `inner_radius`, then
/// blending to `outer` at `radius`
pub fn radial_gradient_circle(
    center: Vec2,
    inner_radius: f32,
    radius: f32,
    inner: [f32; 4],
    outer: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = circle(center, inner_radius, inner, segments);
    let segments = segments.max(3);
    vertices.reserve((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());

        quad(
            &mut vertices,
            [
                (center + dir1 * inner_radius, inner),
                (center + dir1 * radius, outer),
                (center + dir2 * radius, outer),
                (center + dir2 * inner_radius, inner),
            ],
        );
    }

    vertices
}

pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Sample a quadratic Bezier curve, endpoints included
pub fn quadratic_points(start: Vec2, control: Vec2, end: Vec2, segments: u32) -> Vec<Vec2> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            let u = 1.0 - t;
            start * (u * u) + control * (2.0 * u * t) + end * (t * t)
        })
        .collect()
}

/// Fill a closed outline as a fan around `center`, coloring each vertex with `color_at`
pub fn polygon(center: Vec2, outline: &[Vec2], color_at: impl Fn(Vec2) -> [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(outline.len() * 3);
    if outline.len() < 2 {
        return vertices;
    }
    let center_color = color_at(center);
    for i in 0..outline.len() {
        let a = outline[i];
        let b = outline[(i + 1) % outline.len()];
        vertices.push(Vertex::new(center.x, center.y, center_color));
        vertices.push(Vertex::new(a.x, a.y, color_at(a)));
        vertices.push(Vertex::new(b.x, b.y, color_at(b)));
    }
    vertices
}

/// Rotate vertices in place about `pivot` (positive turns clockwise on a y-down surface)
pub fn rotate_about(vertices: &mut [Vertex], pivot: Vec2, angle: f32) {
    let (sin, cos) = angle.sin_cos();
    for v in vertices {
        let d = Vec2::from(v.position) - pivot;
        v.position = [
            pivot.x + d.x * cos - d.y * sin,
            pivot.y + d.x * sin + d.y * cos,
        ];
    }
}
