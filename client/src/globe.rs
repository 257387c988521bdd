use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use satwatch_shared::{GeodeticSample, Observer, SampleSeries};

use crate::colors::{
    BACKGROUND, BILLBOARD, BILLBOARD_TEXT, GRATICULE, MARKER, OBSERVER, TRAJECTORY, brighten,
    rgba_css,
};
use crate::ticker::{Updatable, register_with_view, unregister_from_view};
use crate::widgets::MarkerState;

const GRATICULE_STEP_DEG: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillboardSlot {
    Start,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Billboard {
    pub slot: BillboardSlot,
    pub label: String,
    pub time: String,
    pub at: GeodeticSample,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

/// Drawing primitives the globe needs. Coordinates are degrees.
pub trait GlobeSurface {
    fn clear(&mut self);
    fn polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke);
    fn point(&mut self, lon: f64, lat: f64, radius_px: f64, color: &str);
    fn billboard(&mut self, lon: f64, lat: f64, lines: [&str; 2], emphasized: bool);
}

/// Static part of a globe view.
pub struct GlobeScene {
    pub trajectory: Arc<SampleSeries<GeodeticSample>>,
    pub observer: Observer,
    pub billboards: Vec<Billboard>,
}

/// Per-tick part of a globe view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeFrame {
    pub marker: MarkerState,
    pub emphasis: Option<BillboardSlot>,
}

pub type FrameFn = Arc<dyn Fn(DateTime<Utc>) -> GlobeFrame + Send + Sync>;

/// Splits a (lon, lat) track wherever consecutive points jump across the antimeridian.
pub fn split_at_antimeridian(points: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    let mut segments: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    for &(lon, lat) in points {
        if let Some(&(prev_lon, _)) = current.last()
            && (lon - prev_lon).abs() > 180.0
        {
            segments.push(std::mem::take(&mut current));
        }
        current.push((lon, lat));
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Equirectangular projection of (lon, lat) onto a `width` x `height` surface.
pub fn project(lon: f64, lat: f64, width: f64, height: f64) -> (f64, f64) {
    let x = (lon + 180.0) / 360.0 * width;
    let y = (90.0 - lat) / 180.0 * height;
    (x, y)
}

fn graticule() -> impl Iterator<Item = Vec<(f64, f64)>> {
    let meridians = (-180..=180).step_by(GRATICULE_STEP_DEG as usize).map(|lon| {
        let lon = f64::from(lon);
        vec![(lon, -90.0), (lon, 90.0)]
    });
    let parallels = (-60..=60).step_by(GRATICULE_STEP_DEG as usize).map(|lat| {
        let lat = f64::from(lat);
        vec![(-180.0, lat), (180.0, lat)]
    });
    meridians.chain(parallels)
}

/// Paints one frame. Pure in `(scene, frame)`: the surface sees the same calls for the same input.
pub fn draw_scene(surface: &mut impl GlobeSurface, scene: &GlobeScene, frame: GlobeFrame) {
    surface.clear();

    let grid = Stroke {
        color: rgba_css(GRATICULE, 0.25),
        width: 1.0,
    };
    for line in graticule() {
        surface.polyline(&line, &grid);
    }

    let track = Stroke {
        color: rgba_css(TRAJECTORY, 1.0),
        width: 3.0,
    };
    let points: Vec<(f64, f64)> = scene
        .trajectory
        .samples()
        .iter()
        .map(|s| (s.lon, s.lat))
        .collect();
    for segment in split_at_antimeridian(&points) {
        surface.polyline(&segment, &track);
    }

    for billboard in &scene.billboards {
        surface.billboard(
            billboard.at.lon,
            billboard.at.lat,
            [&billboard.label, &billboard.time],
            frame.emphasis == Some(billboard.slot),
        );
    }

    surface.point(scene.observer.lon, scene.observer.lat, 6.0, &rgba_css(OBSERVER, 1.0));

    if let MarkerState::At(sample) = frame.marker {
        surface.point(sample.lon, sample.lat, 7.5, &rgba_css(MARKER, 1.0));
    }
}

/// 2D canvas implementation of [`GlobeSurface`].
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let width = f64::from(canvas.client_width().max(1));
        let height = (width / 2.0).round();
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())?;
        Some(Self { ctx, width, height })
    }

    fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        project(lon, lat, self.width, self.height)
    }
}

impl GlobeSurface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.set_fill_style_str(&rgba_css(BACKGROUND, 1.0));
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke) {
        let Some((&(lon, lat), rest)) = points.split_first() else {
            return;
        };
        self.ctx.set_stroke_style_str(&stroke.color);
        self.ctx.set_line_width(stroke.width);
        self.ctx.begin_path();
        let (x, y) = self.project(lon, lat);
        self.ctx.move_to(x, y);
        for &(lon, lat) in rest {
            let (x, y) = self.project(lon, lat);
            self.ctx.line_to(x, y);
        }
        self.ctx.stroke();
    }

    fn point(&mut self, lon: f64, lat: f64, radius_px: f64, color: &str) {
        let (x, y) = self.project(lon, lat);
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        self.ctx.arc(x, y, radius_px, 0.0, std::f64::consts::TAU).ok();
        self.ctx.fill();
    }

    fn billboard(&mut self, lon: f64, lat: f64, lines: [&str; 2], emphasized: bool) {
        const W: f64 = 112.0;
        const H: f64 = 38.0;
        let (x, y) = self.project(lon, lat);
        let (left, top) = (x + 7.0, y - H - 10.0);

        let fill = if emphasized {
            brighten(BILLBOARD, 1.6)
        } else {
            BILLBOARD
        };
        self.ctx.set_fill_style_str(&rgba_css(fill, 0.92));
        self.ctx.fill_rect(left, top, W, H);
        self.ctx.begin_path();
        self.ctx.move_to(x, y);
        self.ctx.line_to(left + 10.0, top + H);
        self.ctx.line_to(left + 24.0, top + H);
        self.ctx.fill();

        self.ctx.set_fill_style_str(&rgba_css(BILLBOARD_TEXT, 1.0));
        self.ctx.set_font("12px 'JetBrains Mono', monospace");
        self.ctx.fill_text(lines[0], left + 8.0, top + 15.0).ok();
        self.ctx.set_font("bold 13px 'JetBrains Mono', monospace");
        self.ctx.fill_text(lines[1], left + 8.0, top + 31.0).ok();
    }
}

struct GlobePainter {
    surface: RefCell<CanvasSurface>,
    scene: Arc<GlobeScene>,
    frame: FrameFn,
}

impl Updatable for GlobePainter {
    fn on_tick(&self, now: DateTime<Utc>) {
        draw_scene(&mut *self.surface.borrow_mut(), &self.scene, (self.frame)(now));
    }
}

/// Globe canvas that repaints on every tick of the current view.
#[component]
pub fn Globe(scene: Arc<GlobeScene>, frame: FrameFn) -> impl IntoView {
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    Effect::new(move || {
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        let Some(surface) = CanvasSurface::new(&canvas) else {
            web_sys::console::warn_1(&"globe: 2d context unavailable".into());
            return;
        };
        let painter = Rc::new(GlobePainter {
            surface: RefCell::new(surface),
            scene: Arc::clone(&scene),
            frame: Arc::clone(&frame),
        });
        painter.on_tick(Utc::now());
        if let Some(id) = register_with_view(painter) {
            on_cleanup(move || unregister_from_view(id));
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            class="globe"
            style="width: 100%; display: block; border: 1px solid #282c3e; border-radius: 6px;"
        />
    }
}
