use std::cell::RefCell;
use std::rc::Rc;
use story_core::{
    ClockTime, CorridorFeed, ModeChange, ModeSwitch, ViewMode, CORRIDOR_LEDGER_DELAY_MS,
    CORRIDOR_STEP_MS,
};
use web_sys as web;

use crate::clock::{IntervalClock, Timeout};
use crate::constants::{CLASS_COMMUNITY, CLASS_VISIBLE, LEDGER_OVERLAY_TEXT};
use crate::dom::{self, Listener};
use crate::format;

struct ConsoleState {
    feed: CorridorFeed,
    switch: ModeSwitch,
}

struct Panels {
    document: web::Document,
    root: web::Element,
    toggle: web::Element,
    subtitle: web::Element,
    telemetry: web::Element,
    summary: web::Element,
    log: web::Element,
    overlay: web::Element,
}

impl Panels {
    fn build(document: &web::Document, root: &web::Element) -> anyhow::Result<Self> {
        let header = dom::append(document, root, "header", "corridor-header")?;
        let toggle = dom::append(document, &header, "button", "corridor-mode")?;
        toggle.set_attribute("type", "button").map_err(dom::js_err)?;
        let subtitle = dom::append(document, &header, "span", "corridor-subtitle")?;
        let overlay = dom::append(document, root, "div", "corridor-ledger")?;
        dom::set_text(&overlay, LEDGER_OVERLAY_TEXT);
        Ok(Self {
            document: document.clone(),
            root: root.clone(),
            toggle,
            subtitle,
            telemetry: dom::append(document, root, "dl", "corridor-telemetry")?,
            summary: dom::append(document, root, "dl", "corridor-summary")?,
            log: dom::append(document, root, "ul", "corridor-log")?,
            overlay,
        })
    }

    fn render(&self, state: &ConsoleState) {
        let feed = &state.feed;
        let mode = state.switch.current();
        dom::set_text(&self.toggle, &format::mode_toggle_label(&state.switch));
        dom::set_text(&self.subtitle, mode.subtitle());
        let _ = self
            .root
            .class_list()
            .toggle_with_force(CLASS_COMMUNITY, mode == ViewMode::Community);
        let _ = self
            .overlay
            .class_list()
            .toggle_with_force(CLASS_VISIBLE, state.switch.overlay_visible());

        fill_rows(&self.document, &self.telemetry, &format::telemetry_rows(feed.telemetry()));
        let summary = format::summary_rows(&feed.summary(), feed.telemetry(), mode);
        fill_rows(&self.document, &self.summary, &summary);
        self.log.set_inner_html("");
        for line in feed.lines() {
            if let Ok(li) = dom::append(&self.document, &self.log, "li", "corridor-line") {
                dom::set_text(&li, line);
            }
        }
    }
}

fn fill_rows(document: &web::Document, list: &web::Element, rows: &[(&str, String)]) {
    list.set_inner_html("");
    for (label, value) in rows {
        if let Ok(dt) = dom::append(document, list, "dt", "") {
            dom::set_text(&dt, label);
        }
        if let Ok(dd) = dom::append(document, list, "dd", "") {
            dom::set_text(&dd, value);
        }
    }
}

fn wall_clock() -> ClockTime {
    let now = js_sys::Date::new_0();
    ClockTime {
        hours: now.get_hours() as u8,
        minutes: now.get_minutes() as u8,
        seconds: now.get_seconds() as u8,
    }
}

/// Live corridor console: a random-walk feed stepped on its own interval,
/// with a corporate/community toggle.
pub struct CorridorConsole {
    panels: Rc<Panels>,
    ledger: Rc<RefCell<Option<Timeout>>>,
    _clock: IntervalClock,
    _toggle: Listener,
}

impl CorridorConsole {
    pub fn mount(
        document: &web::Document,
        root: &web::Element,
        seed: u64,
    ) -> anyhow::Result<Self> {
        root.set_inner_html("");
        root.class_list().add_1("corridor-console").map_err(dom::js_err)?;
        let panels = Rc::new(Panels::build(document, root)?);
        let state = Rc::new(RefCell::new(ConsoleState {
            feed: CorridorFeed::new(seed),
            switch: ModeSwitch::default(),
        }));
        panels.render(&state.borrow());

        let clock = {
            let panels = panels.clone();
            let state = state.clone();
            IntervalClock::start(CORRIDOR_STEP_MS, move || {
                let mut state = state.borrow_mut();
                state.feed.step(wall_clock());
                panels.render(&state);
            })?
        };

        let ledger: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
        let toggle = {
            let button = panels.toggle.clone();
            let panels = panels.clone();
            let ledger = ledger.clone();
            Listener::new(button.as_ref(), "click", move |_| {
                let change = state.borrow_mut().switch.toggle();
                match change {
                    ModeChange::Deferred(next) => {
                        log::info!("[story] corridor console: ledger check before {:?}", next);
                        let landing = {
                            let state = state.clone();
                            let panels = panels.clone();
                            move || {
                                let mut state = state.borrow_mut();
                                state.switch.complete();
                                panels.render(&state);
                            }
                        };
                        match Timeout::start(CORRIDOR_LEDGER_DELAY_MS, landing) {
                            // replacing the slot drops the previous, already fired timer
                            Ok(timer) => *ledger.borrow_mut() = Some(timer),
                            Err(e) => {
                                log::warn!("[story] no ledger timer, switching now: {}", e);
                                state.borrow_mut().switch.complete();
                            }
                        }
                    }
                    ModeChange::Immediate(mode) => {
                        log::info!("[story] corridor console: {:?} view", mode);
                    }
                    ModeChange::Ignored => return,
                }
                panels.render(&state.borrow());
            })?
        };

        log::info!("[story] corridor console mounted (seed {})", seed);
        Ok(Self {
            panels,
            ledger,
            _clock: clock,
            _toggle: toggle,
        })
    }
}

impl Drop for CorridorConsole {
    fn drop(&mut self) {
        // a pending community switch must not land on a cleared root
        self.ledger.borrow_mut().take();
        self.panels.root.set_inner_html("");
        log::info!("[story] corridor console unmounted");
    }
}
