//! Scene assembly
//!
//! Turns a [`GameState`] into an ordered list of layers, back to front:
//! sky, stars, clouds, pipes, ground, bird, overlay. Later layers paint over
//! earlier ones. Building a scene never mutates the state.

use glam::Vec2;

use super::shapes::{
    circle, ellipse, horizontal_gradient_rect, lerp_color, polygon, quadratic_points,
    radial_gradient_circle, rect, rotate_about, triangle, vertical_gradient_rect,
};
use super::vertex::{Vertex, colors};
use crate::consts::{PIPE_CAP_HEIGHT, PIPE_CAP_OVERHANG, SPIKE_HEIGHT, SPIKE_WIDTH};
use crate::rgba;
use crate::sim::{Bird, GamePhase, GameState, Pipe, Scenery};
use crate::settings::BirdTheme;

const CIRCLE_SEGMENTS: u32 = 32;
const STAR_SEGMENTS: u32 = 8;
const CURVE_SEGMENTS: u32 = 8;
const CLOUD_SHADOW_OFFSET: f32 = 5.0;
const CLOUD_RIM_FADE: f32 = 0.7;
const HIGHLIGHT_INSET: f32 = 5.0;
const HIGHLIGHT_WIDTH: f32 = 10.0;
const WING_FLAP_PERIOD: f32 = 8.0;

/// Draw order, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LayerKind {
    Sky,
    Stars,
    Clouds,
    Pipes,
    Ground,
    Bird,
    Overlay,
}

#[derive(Debug, Clone)]
pub struct Layer {
    pub kind: LayerKind,
    pub vertices: Vec<Vertex>,
}

/// One frame's geometry in surface pixels
#[derive(Debug, Clone)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub layers: Vec<Layer>,
}

impl Scene {
    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    /// All vertices in draw order
    pub fn vertices(&self) -> Vec<Vertex> {
        let mut out = Vec::with_capacity(self.vertex_count());
        for layer in &self.layers {
            out.extend_from_slice(&layer.vertices);
        }
        out
    }

    pub fn vertex_count(&self) -> usize {
        self.layers.iter().map(|l| l.vertices.len()).sum()
    }
}

/// Build the full scene for the current state
pub fn build_scene(state: &GameState) -> Scene {
    let night = state.sky.night_intensity();
    let layers = vec![
        Layer {
            kind: LayerKind::Sky,
            vertices: sky(state),
        },
        Layer {
            kind: LayerKind::Stars,
            vertices: stars(&state.scenery, state.frame, night),
        },
        Layer {
            kind: LayerKind::Clouds,
            vertices: clouds(&state.scenery, 1.0 - night),
        },
        Layer {
            kind: LayerKind::Pipes,
            vertices: pipes(&state.pipes, state.ground_y()),
        },
        Layer {
            kind: LayerKind::Ground,
            vertices: ground(state),
        },
        Layer {
            kind: LayerKind::Bird,
            vertices: bird(&state.bird, state.settings.theme(), state.frame),
        },
        Layer {
            kind: LayerKind::Overlay,
            vertices: overlay(state),
        },
    ];

    Scene {
        width: state.viewport.width,
        height: state.viewport.height,
        layers,
    }
}

fn sky(state: &GameState) -> Vec<Vertex> {
    vertical_gradient_rect(
        0.0,
        0.0,
        state.viewport.width,
        state.viewport.height,
        rgba(state.sky.current, 1.0),
        rgba(state.sky.horizon(), 1.0),
    )
}

fn stars(scenery: &Scenery, frame: u64, alpha: f32) -> Vec<Vertex> {
    if alpha <= 0.0 {
        return Vec::new();
    }
    let mut vertices = Vec::new();
    for star in &scenery.stars {
        let radius = star.twinkle_radius(frame);
        if radius > 0.0 {
            vertices.extend(circle(star.pos, radius, colors::STAR, STAR_SEGMENTS));
        }
    }
    vertices.into_iter().map(|v| v.faded(alpha)).collect()
}

fn clouds(scenery: &Scenery, alpha: f32) -> Vec<Vertex> {
    if alpha <= 0.0 {
        return Vec::new();
    }
    let mut vertices = Vec::new();
    for cloud in &scenery.clouds {
        // Shadows first so no part's shadow covers another part
        for part in &cloud.parts {
            let center = cloud.pos + part.offset + Vec2::splat(CLOUD_SHADOW_OFFSET);
            vertices.extend(ellipse(
                center,
                part.radius_x,
                part.radius_y,
                colors::CLOUD_SHADOW,
                colors::CLOUD_SHADOW,
                CIRCLE_SEGMENTS,
            ));
        }
        for part in &cloud.parts {
            vertices.extend(ellipse(
                cloud.pos + part.offset,
                part.radius_x,
                part.radius_y,
                [1.0, 1.0, 1.0, part.opacity],
                [1.0, 1.0, 1.0, part.opacity * CLOUD_RIM_FADE],
                CIRCLE_SEGMENTS,
            ));
        }
    }
    vertices.into_iter().map(|v| v.faded(alpha)).collect()
}

fn pipe(pipe: &Pipe, ground_y: f32) -> Vec<Vertex> {
    let body = [
        (0.0, colors::PIPE_EDGE),
        (0.5, colors::PIPE_CENTER),
        (1.0, colors::PIPE_EDGE),
    ];
    let cap = [
        (0.0, colors::CAP_EDGE),
        (0.5, colors::CAP_CENTER),
        (1.0, colors::CAP_EDGE),
    ];
    let lower_height = ground_y - pipe.bottom;
    let cap_x = pipe.x - PIPE_CAP_OVERHANG;
    let cap_w = pipe.width + PIPE_CAP_OVERHANG * 2.0;

    let mut v = horizontal_gradient_rect(pipe.x, 0.0, pipe.width, pipe.top, &body);
    v.extend(horizontal_gradient_rect(
        pipe.x,
        pipe.bottom,
        pipe.width,
        lower_height,
        &body,
    ));
    v.extend(horizontal_gradient_rect(
        cap_x,
        pipe.top - PIPE_CAP_HEIGHT,
        cap_w,
        PIPE_CAP_HEIGHT,
        &cap,
    ));
    v.extend(horizontal_gradient_rect(
        cap_x,
        pipe.bottom,
        cap_w,
        PIPE_CAP_HEIGHT,
        &cap,
    ));
    let hx = pipe.x + HIGHLIGHT_INSET;
    v.extend(rect(hx, 0.0, HIGHLIGHT_WIDTH, pipe.top, colors::PIPE_HIGHLIGHT));
    v.extend(rect(
        hx,
        pipe.bottom,
        HIGHLIGHT_WIDTH,
        lower_height,
        colors::PIPE_HIGHLIGHT,
    ));
    v
}

fn pipes(pipes: &[Pipe], ground_y: f32) -> Vec<Vertex> {
    // Newest first, so older pipes end up on top
    pipes.iter().rev().flat_map(|p| pipe(p, ground_y)).collect()
}

fn ground(state: &GameState) -> Vec<Vertex> {
    let ground_y = state.ground_y();
    let width = state.viewport.width;
    let mut vertices = vertical_gradient_rect(
        0.0,
        ground_y,
        width,
        state.ground_height(),
        colors::GROUND_TOP,
        colors::GROUND_BOTTOM,
    );

    let grass_color = |p: Vec2| {
        lerp_color(
            colors::GRASS_ROOT,
            colors::GRASS_TIP,
            (ground_y - p.y) / SPIKE_HEIGHT,
        )
    };
    let mut x = state.grass_offset;
    while x < width + SPIKE_WIDTH {
        let outline = quadratic_points(
            Vec2::new(x - SPIKE_WIDTH / 2.0, ground_y),
            Vec2::new(x, ground_y - SPIKE_HEIGHT),
            Vec2::new(x + SPIKE_WIDTH / 2.0, ground_y),
            CURVE_SEGMENTS,
        );
        vertices.extend(polygon(Vec2::new(x, ground_y), &outline, grass_color));
        x += SPIKE_WIDTH / 4.0;
    }
    vertices
}

/// Wing tilt for a frame, oscillating around a slight downward bias
pub fn wing_angle(frame: u64) -> f32 {
    use std::f32::consts::PI;
    (frame as f32 / WING_FLAP_PERIOD).sin() * (PI / 8.0) - PI / 16.0
}

fn wing_outline(r: f32) -> Vec<Vec2> {
    let curves = [
        (Vec2::new(-0.7, 0.0), Vec2::new(-0.5, -1.2), Vec2::new(0.0, -0.7)),
        (Vec2::new(0.0, -0.7), Vec2::new(0.5, -0.5), Vec2::new(0.7, 0.0)),
        (Vec2::new(0.7, 0.0), Vec2::new(0.5, 0.5), Vec2::new(0.0, 0.7)),
        (Vec2::new(0.0, 0.7), Vec2::new(-0.5, 1.2), Vec2::new(-0.7, 0.0)),
    ];
    let mut outline = Vec::new();
    for (start, control, end) in curves {
        let mut pts = quadratic_points(start * r, control * r, end * r, CURVE_SEGMENTS);
        // Each curve starts where the previous one ended
        pts.pop();
        outline.extend(pts);
    }
    outline
}

fn bird(bird: &Bird, theme: &BirdTheme, frame: u64) -> Vec<Vertex> {
    let r = bird.radius;
    let center = Vec2::new(bird.x, bird.y);
    let body = rgba(theme.body, 1.0);
    let wing = rgba(theme.wing, 1.0);

    let mut vertices =
        radial_gradient_circle(center, r / 4.0, r, wing, body, CIRCLE_SEGMENTS);

    let outline: Vec<Vec2> = wing_outline(r).into_iter().map(|p| center + p).collect();
    let mut wing_vertices = polygon(center, &outline, |_| wing);
    rotate_about(&mut wing_vertices, center, wing_angle(frame));
    vertices.extend(wing_vertices);

    let eye = center + Vec2::new(r * 0.4, -r * 0.3);
    vertices.extend(circle(eye, 5.0, colors::EYE, CIRCLE_SEGMENTS / 2));
    vertices.extend(circle(
        eye + Vec2::new(2.0, 0.0),
        2.0,
        colors::PUPIL,
        CIRCLE_SEGMENTS / 4,
    ));

    vertices.extend(triangle(
        center + Vec2::new(r * 0.8, 0.0),
        center + Vec2::new(r + 10.0, -2.0),
        center + Vec2::new(r + 10.0, 2.0),
        rgba(theme.beak, 1.0),
    ));

    rotate_about(&mut vertices, center, bird.rotation);
    vertices
}

fn overlay(state: &GameState) -> Vec<Vertex> {
    let (w, h) = (state.viewport.width, state.viewport.height);
    match state.phase {
        GamePhase::NotStarted => {
            let button = state.theme_button();
            rect(button.x, button.y, button.w, button.h, colors::THEME_BUTTON)
        }
        GamePhase::Paused => rect(0.0, 0.0, w, h, colors::PAUSE_DIM),
        GamePhase::GameOver { landed: true } => rect(0.0, 0.0, w, h, colors::GAME_OVER_DIM),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DAY_COLOR, NIGHT_COLOR};
    use crate::highscores::HighScore;
    use crate::settings::Settings;
    use crate::sim::Viewport;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(
            Viewport::new(800.0, 600.0),
            Tuning::default(),
            11,
            HighScore::new(0),
            Settings::new(0),
        )
    }

    #[test]
    fn test_layers_in_draw_order() {
        let scene = build_scene(&state());
        let kinds: Vec<LayerKind> = scene.layers.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LayerKind::Sky,
                LayerKind::Stars,
                LayerKind::Clouds,
                LayerKind::Pipes,
                LayerKind::Ground,
                LayerKind::Bird,
                LayerKind::Overlay,
            ]
        );
        assert!(kinds.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(scene.vertices().len(), scene.vertex_count());
    }

    #[test]
    fn test_daytime_hides_stars() {
        let scene = build_scene(&state());
        assert!(scene.layer(LayerKind::Stars).unwrap().vertices.is_empty());
        assert!(!scene.layer(LayerKind::Clouds).unwrap().vertices.is_empty());
    }

    #[test]
    fn test_night_hides_clouds() {
        let mut state = state();
        state.sky.current = NIGHT_COLOR;
        let scene = build_scene(&state);
        assert!(scene.layer(LayerKind::Clouds).unwrap().vertices.is_empty());
        assert!(!scene.layer(LayerKind::Stars).unwrap().vertices.is_empty());
    }

    #[test]
    fn test_dusk_crossfades() {
        let mut state = state();
        state.sky.current = (DAY_COLOR + NIGHT_COLOR) / 2.0;
        let scene = build_scene(&state);
        for v in &scene.layer(LayerKind::Stars).unwrap().vertices {
            assert!((v.color[3] - 0.5).abs() < 1e-4);
        }
        for v in &scene.layer(LayerKind::Clouds).unwrap().vertices {
            assert!(v.color[3] <= 0.8 * 0.5 + 1e-4);
        }
    }

    #[test]
    fn test_sky_top_uses_current_color() {
        let scene = build_scene(&state());
        let sky = &scene.layer(LayerKind::Sky).unwrap().vertices;
        let top = sky.iter().find(|v| v.position[1] == 0.0).unwrap();
        assert_eq!(top.color, rgba(DAY_COLOR, 1.0));
    }

    #[test]
    fn test_overlay_per_phase() {
        let mut state = state();
        let button = state.theme_button();
        let scene = build_scene(&state);
        let overlay = &scene.layer(LayerKind::Overlay).unwrap().vertices;
        assert_eq!(overlay.len(), 6);
        assert!(overlay.iter().all(|v| v.position[0] >= button.x));

        state.phase = GamePhase::Playing;
        assert!(build_scene(&state).layer(LayerKind::Overlay).unwrap().vertices.is_empty());

        state.phase = GamePhase::Paused;
        let scene = build_scene(&state);
        assert_eq!(scene.layer(LayerKind::Overlay).unwrap().vertices[0].color, colors::PAUSE_DIM);

        state.phase = GamePhase::GameOver { landed: false };
        assert!(build_scene(&state).layer(LayerKind::Overlay).unwrap().vertices.is_empty());

        state.phase = GamePhase::GameOver { landed: true };
        let scene = build_scene(&state);
        assert_eq!(scene.layer(LayerKind::Overlay).unwrap().vertices[0].color, colors::GAME_OVER_DIM);
    }

    #[test]
    fn test_pipe_geometry_stops_at_ground() {
        let mut state = state();
        state.pipes.push(Pipe::with_gap(400.0, 150.0, &state.tuning));
        let ground_y = state.ground_y();
        let scene = build_scene(&state);
        let pipes = &scene.layer(LayerKind::Pipes).unwrap().vertices;
        assert!(!pipes.is_empty());
        for v in pipes {
            assert!(v.position[1] >= 0.0 && v.position[1] <= ground_y);
            assert!(v.position[0] >= 395.0 && v.position[0] <= 470.0);
        }
    }

    #[test]
    fn test_bird_uses_theme_and_rotation() {
        let mut state = state();
        let beak = rgba(state.settings.theme().beak, 1.0);
        state.bird.rotation = std::f32::consts::FRAC_PI_2;
        let scene = build_scene(&state);
        let bird = &scene.layer(LayerKind::Bird).unwrap().vertices;
        // Beak tip points straight down after a quarter turn
        let tip = bird
            .iter()
            .filter(|v| v.color == beak)
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert!((tip - (state.bird.y + state.bird.radius + 10.0)).abs() < 2.5);
    }

    #[test]
    fn test_grass_follows_offset() {
        let mut state = state();
        let a = build_scene(&state);
        state.grass_offset = -5.0;
        let b = build_scene(&state);
        let first_x = |s: &Scene| {
            s.layer(LayerKind::Ground).unwrap().vertices[6].position[0]
        };
        assert_eq!(first_x(&a) - first_x(&b), 5.0);
    }

    #[test]
    fn test_wing_angle_range() {
        use std::f32::consts::PI;
        for frame in 0..100 {
            let a = wing_angle(frame);
            assert!(a >= -3.0 * PI / 16.0 - 1e-6 && a <= PI / 16.0 + 1e-6);
        }
    }
}
