use glam::Vec2;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use story_core::{LogError, ScenarioId, StoryEngine, TICK_INTERVAL_MS};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::clock::IntervalClock;
use crate::constants::*;
use crate::display::DisplayState;
use crate::dom::{self, Listener};
use crate::format;
use crate::frame::AnimationLoop;
use crate::render::{self, FrameSignals, RouteGeometry, Scene};

struct Story {
    engine: StoryEngine,
    display: DisplayState,
    started: Instant,
}

impl Story {
    #[inline]
    fn now_sec(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

struct Views {
    document: web::Document,
    root: web::Element,
    clock: web::Element,
    phase: web::Element,
    metric_values: Vec<web::Element>,
    log_list: web::Element,
    input: web::HtmlInputElement,
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    canvas_size: Cell<Vec2>,
    geometry: RouteGeometry,
    signals: Cell<FrameSignals>,
}

impl Views {
    fn build(
        document: &web::Document,
        root: &web::Element,
        engine: &StoryEngine,
    ) -> anyhow::Result<Self> {
        let scenario = engine.scenario();
        root.set_inner_html("");
        root.class_list().add_1("story-dashboard").map_err(dom::js_err)?;

        let header = dom::append(document, root, "header", "story-header")?;
        dom::set_text(&dom::append(document, &header, "h2", "story-title")?, scenario.title);
        dom::set_text(&dom::append(document, &header, "p", "story-subtitle")?, scenario.subtitle);
        let clock = dom::append(document, &header, "span", "story-clock")?;
        let phase = dom::append(document, &header, "span", "story-phase")?;

        let grid = dom::append(document, root, "div", "story-metrics")?;
        let mut metric_values = Vec::with_capacity(scenario.metrics.len());
        for spec in &scenario.metrics {
            let cell = dom::append(document, &grid, "div", "story-metric")?;
            cell.set_attribute("data-metric", spec.key).map_err(dom::js_err)?;
            dom::set_text(&dom::append(document, &cell, "span", "story-metric-label")?, spec.label);
            metric_values.push(dom::append(document, &cell, "span", "story-metric-value")?);
        }

        let canvas: web::HtmlCanvasElement = dom::append(document, root, "canvas", "story-map")?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let ctx: web::CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(dom::js_err)?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let canvas_size = Cell::new(dom::sync_canvas_backing_size(&canvas));

        let log_list = dom::append(document, root, "ul", "story-log")?;
        let form = dom::append(document, root, "div", "story-log-form")?;
        let input: web::HtmlInputElement = dom::append(document, &form, "input", "story-log-input")?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        input.set_type("text");
        input.set_placeholder("Mensaje del operador…");
        input.set_max_length(LOG_INPUT_MAX_CHARS as i32);

        Ok(Self {
            document: document.clone(),
            root: root.clone(),
            clock,
            phase,
            metric_values,
            log_list,
            input,
            canvas,
            ctx,
            canvas_size,
            geometry: RouteGeometry::new(engine.sampler().route()),
            signals: Cell::new(FrameSignals::of(&engine.frame())),
        })
    }

    /// Everything that changes once per story second.
    fn render_tick(&self, engine: &StoryEngine) {
        let frame = engine.frame();
        self.signals.set(FrameSignals::of(&frame));
        let loop_seconds = engine.scenario().loop_seconds;
        dom::set_text(&self.clock, &format::clock_label(frame.seconds, loop_seconds));
        dom::set_text(&self.phase, frame.phase.label());
        self.phase
            .set_class_name(&format!("story-phase {}", format::phase_class(frame.phase)));

        let classes = self.root.class_list();
        let _ = classes.toggle_with_force(CLASS_OFFLINE, frame.offline);
        let _ = classes.toggle_with_force(CLASS_ALERT, frame.alert);

        self.log_list.set_inner_html("");
        for line in &frame.logs {
            let class = line.kind.as_str();
            let Ok(item) = dom::append(&self.document, &self.log_list, "li", class) else {
                continue;
            };
            if let Ok(head) = dom::append(&self.document, &item, "span", "story-log-header") {
                dom::set_text(&head, &format::log_header(line));
            }
            if let Ok(body) = dom::append(&self.document, &item, "span", "story-log-message") {
                dom::set_text(&body, line.message);
            }
        }
    }

    fn render_metrics(&self, story: &Story, now_sec: f64) {
        for (i, (el, spec)) in self
            .metric_values
            .iter()
            .zip(&story.engine.scenario().metrics)
            .enumerate()
        {
            if let Some(value) = story.display.metric(i, now_sec) {
                dom::set_text(el, &format::metric_text(value, spec.decimals, spec.unit));
            }
        }
    }

    fn draw(&self, story: &Story, now_sec: f64) {
        let engine = &story.engine;
        let progress = story.display.journey(now_sec);
        let scene = Scene {
            view_size: engine.scenario().view_size,
            zone: engine.scenario().silent_zone,
            progress,
            position: engine.sampler().sample(progress),
            signals: self.signals.get(),
            geometry: &self.geometry,
        };
        render::draw(&self.ctx, self.canvas_size.get(), &scene);
    }
}

/// One mounted story dashboard. Dropping it stops the clock and the
/// animation loop and detaches its listeners.
pub struct Dashboard {
    story: Rc<RefCell<Story>>,
    views: Rc<Views>,
    _clock: IntervalClock,
    _animation: AnimationLoop,
    _listeners: Vec<Listener>,
}

impl Dashboard {
    pub fn mount(
        document: &web::Document,
        root: &web::Element,
        id: ScenarioId,
    ) -> anyhow::Result<Self> {
        let engine = StoryEngine::builtin(id)?;
        let views = Rc::new(Views::build(document, root, &engine)?);
        let display = DisplayState::new(&engine.frame(), engine.scenario().journey_easing);
        let story = Rc::new(RefCell::new(Story {
            engine,
            display,
            started: Instant::now(),
        }));
        {
            let s = story.borrow();
            views.render_tick(&s.engine);
            views.render_metrics(&s, s.now_sec());
        }

        let clock = {
            let story = story.clone();
            let views = views.clone();
            IntervalClock::start(TICK_INTERVAL_MS, move || {
                let mut guard = story.borrow_mut();
                let s = &mut *guard;
                let tick = s.engine.tick();
                let now = s.now_sec();
                let frame = s.engine.frame();
                s.display.retarget(&frame, tick.wrapped, now);
                views.render_tick(&s.engine);
            })?
        };

        let animation = {
            let story = story.clone();
            let views = views.clone();
            AnimationLoop::start(move || {
                let s = story.borrow();
                let now = s.now_sec();
                if !s.display.is_settled(now) {
                    views.render_metrics(&s, now);
                }
                views.draw(&s, now);
            })?
        };

        let mut listeners = Vec::new();
        {
            let story = story.clone();
            let views_key = views.clone();
            listeners.push(Listener::new(views.input.as_ref(), "keydown", move |ev| {
                let is_enter = ev
                    .dyn_ref::<web::KeyboardEvent>()
                    .map(|k| k.key() == "Enter")
                    .unwrap_or(false);
                if is_enter {
                    ev.prevent_default();
                    submit_from_input(&story, &views_key);
                }
            })?);
        }
        if let Some(window) = web::window() {
            let views_resize = views.clone();
            listeners.push(Listener::new(window.as_ref(), "resize", move |_| {
                views_resize
                    .canvas_size
                    .set(dom::sync_canvas_backing_size(&views_resize.canvas));
            })?);
        }

        log::info!("[story] mounted {}", id);
        Ok(Self {
            story,
            views,
            _clock: clock,
            _animation: animation,
            _listeners: listeners,
        })
    }

    /// Back to second 0 with an empty operator log.
    pub fn reset(&self) {
        let mut guard = self.story.borrow_mut();
        let s = &mut *guard;
        s.engine.reset();
        let frame = s.engine.frame();
        s.display.jump(&frame);
        self.views.render_tick(&s.engine);
    }

    pub fn submit(&self, text: &str) -> Result<(), LogError> {
        let mut s = self.story.borrow_mut();
        s.engine.submit(text)?;
        self.views.render_tick(&s.engine);
        Ok(())
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.views.root.set_inner_html("");
        let s = self.story.borrow();
        log::info!("[story] unmounted {}", s.engine.scenario().id);
    }
}

fn submit_from_input(story: &Rc<RefCell<Story>>, views: &Views) {
    let text = views.input.value();
    let mut s = story.borrow_mut();
    match s.engine.submit(&text) {
        Ok(id) => {
            log::debug!("[story] operator message #{} at {}s", id, s.engine.seconds());
            views.input.set_value("");
            views.render_tick(&s.engine);
        }
        Err(LogError::EmptyMessage) => log::debug!("[story] ignored blank operator message"),
    }
}
