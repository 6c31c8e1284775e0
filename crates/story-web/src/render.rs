use glam::Vec2;
use story_core::{Frame, Route, RoutePosition, Zone};
use wasm_bindgen::JsValue;
use web_sys as web;

use crate::constants::*;
use crate::format::ViewTransform;

/// Flattened route plus each vertex's share of the total length, computed
/// once per dashboard.
pub struct RouteGeometry {
    points: Vec<Vec2>,
    fractions: Vec<f32>,
    pen_up: Vec<bool>,
}

impl RouteGeometry {
    pub fn new(route: &Route) -> Self {
        let total = route.total_length().max(f32::EPSILON);
        let fractions = route.vertex_lengths().iter().map(|l| l / total).collect();
        let pen_up = (0..route.points().len())
            .map(|i| route.starts_subpath(i))
            .collect();
        Self {
            points: route.points().to_vec(),
            fractions,
            pen_up,
        }
    }

    fn vertices(&self) -> impl Iterator<Item = (Vec2, f32, bool)> + '_ {
        self.points
            .iter()
            .zip(&self.fractions)
            .zip(&self.pen_up)
            .map(|((p, f), up)| (*p, *f, *up))
    }
}

/// Per-second values lifted from the latest frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameSignals {
    pub alert: bool,
    pub offline: bool,
    pub incident_progress: f64,
    pub day_cycle: f64,
}

impl FrameSignals {
    pub fn of(frame: &Frame<'_>) -> Self {
        Self {
            alert: frame.alert,
            offline: frame.offline,
            incident_progress: frame.incident_progress,
            day_cycle: frame.day_cycle,
        }
    }
}

pub struct Scene<'a> {
    pub view_size: Vec2,
    pub zone: Zone,
    pub progress: f64,
    pub position: RoutePosition,
    pub signals: FrameSignals,
    pub geometry: &'a RouteGeometry,
}

pub fn draw(ctx: &web::CanvasRenderingContext2d, canvas_size: Vec2, scene: &Scene<'_>) {
    let xf = ViewTransform::fit(scene.view_size, canvas_size);
    let scale = xf.scale as f64;

    ctx.set_fill_style_str(COLOR_BACKGROUND);
    ctx.fill_rect(0.0, 0.0, canvas_size.x as f64, canvas_size.y as f64);
    ctx.set_fill_style_str(&format!(
        "rgba(56, 189, 248, {:.3})",
        0.04 + 0.08 * scene.signals.day_cycle.clamp(0.0, 1.0)
    ));
    ctx.fill_rect(0.0, 0.0, canvas_size.x as f64, canvas_size.y as f64);

    // silent zone underlay
    ctx.set_line_width(ZONE_LINE_WIDTH * scale);
    ctx.set_stroke_style_str(COLOR_ZONE);
    stroke_where(ctx, &xf, scene.geometry, |f| {
        scene.zone.contains(f as f64)
    });

    // full route, dashed
    ctx.set_line_width(ROUTE_LINE_WIDTH * scale);
    ctx.set_stroke_style_str(COLOR_ROUTE);
    let dash = js_sys::Array::of2(
        &JsValue::from_f64(ROUTE_DASH[0] * scale),
        &JsValue::from_f64(ROUTE_DASH[1] * scale),
    );
    let _ = ctx.set_line_dash(&dash);
    stroke_where(ctx, &xf, scene.geometry, |_| true);
    let _ = ctx.set_line_dash(&js_sys::Array::new());

    // travelled part, ending exactly at the marker
    ctx.set_stroke_style_str(COLOR_TRAVELLED);
    let travelled = scene.progress as f32;
    ctx.begin_path();
    let mut started = false;
    for (p, f, pen_up) in scene.geometry.vertices() {
        if f > travelled {
            break;
        }
        if pen_up {
            started = false;
        }
        line_or_move(ctx, xf.apply(p), &mut started);
    }
    if started {
        let m = xf.apply(scene.position.point);
        ctx.line_to(m.x as f64, m.y as f64);
    }
    ctx.stroke();

    draw_marker(ctx, &xf, &scene.position, &scene.signals);
}

fn stroke_where(
    ctx: &web::CanvasRenderingContext2d,
    xf: &ViewTransform,
    geometry: &RouteGeometry,
    keep: impl Fn(f32) -> bool,
) {
    ctx.begin_path();
    let mut started = false;
    for (p, f, pen_up) in geometry.vertices() {
        if pen_up {
            started = false;
        }
        if keep(f) {
            line_or_move(ctx, xf.apply(p), &mut started);
        } else {
            started = false;
        }
    }
    ctx.stroke();
}

#[inline]
fn line_or_move(ctx: &web::CanvasRenderingContext2d, p: Vec2, started: &mut bool) {
    if *started {
        ctx.line_to(p.x as f64, p.y as f64);
    } else {
        ctx.move_to(p.x as f64, p.y as f64);
        *started = true;
    }
}

fn draw_marker(
    ctx: &web::CanvasRenderingContext2d,
    xf: &ViewTransform,
    position: &RoutePosition,
    signals: &FrameSignals,
) {
    let at = xf.apply(position.point);
    let size = MARKER_SIZE * xf.scale as f64;
    ctx.save();
    let _ = ctx.translate(at.x as f64, at.y as f64);

    // alert halo widens and fades as the incident runs its course
    if signals.alert {
        let t = signals.incident_progress.clamp(0.0, 1.0);
        ctx.set_global_alpha(0.6 * (1.0 - 0.5 * t));
        ctx.set_stroke_style_str(COLOR_MARKER_ALERT);
        ctx.set_line_width(2.0 * xf.scale as f64);
        ctx.begin_path();
        let _ = ctx.arc(0.0, 0.0, size * (1.3 + t), 0.0, std::f64::consts::TAU);
        ctx.stroke();
    }

    let _ = ctx.rotate((position.heading_deg as f64).to_radians());
    ctx.set_global_alpha(if signals.offline { 0.7 } else { 1.0 });
    ctx.set_fill_style_str(if signals.alert {
        COLOR_MARKER_ALERT
    } else {
        COLOR_MARKER
    });
    ctx.begin_path();
    ctx.move_to(size, 0.0);
    ctx.line_to(-size * 0.6, size * 0.55);
    ctx.line_to(-size * 0.3, 0.0);
    ctx.line_to(-size * 0.6, -size * 0.55);
    ctx.close_path();
    ctx.fill();
    ctx.restore();
}
