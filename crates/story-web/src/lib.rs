#![cfg(target_arch = "wasm32")]
use fnv::FnvHashMap;
use std::cell::{Cell, RefCell};
use story_core::ScenarioId;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod clock;
mod console;
pub mod constants;
mod dashboard;
mod display;
mod dom;
pub mod format;
mod frame;
mod render;

use console::CorridorConsole;
use constants::{CORRIDOR_ATTR, SCENARIO_ATTR};
use dashboard::Dashboard;

// Values are held only so their Drop runs on unmount.
#[allow(dead_code)]
enum Mounted {
    Story(Dashboard),
    Corridor(CorridorConsole),
}

thread_local! {
    static MOUNTED: RefCell<FnvHashMap<u32, Mounted>> = RefCell::new(FnvHashMap::default());
    static NEXT_ID: Cell<u32> = const { Cell::new(1) };
}

fn register(mounted: Mounted) -> u32 {
    let id = NEXT_ID.with(|n| {
        let id = n.get();
        n.set(id.wrapping_add(1));
        id
    });
    MOUNTED.with(|m| m.borrow_mut().insert(id, mounted));
    id
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("story-web starting");

    match mount_all() {
        Ok(count) => log::info!("[story] {} widget(s) mounted", count),
        Err(e) => log::error!("mount error: {:?}", e),
    }
    Ok(())
}

/// Mount every element tagged with a scenario slug or the corridor marker.
fn mount_all() -> anyhow::Result<usize> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let mut count = 0;

    for el in dom::elements_with_attr(&document, SCENARIO_ATTR)? {
        let slug = el.get_attribute(SCENARIO_ATTR).unwrap_or_default();
        let id = match slug.parse::<ScenarioId>() {
            Ok(id) => id,
            Err(e) => {
                log::warn!("[story] skipping element: {}", e);
                continue;
            }
        };
        match Dashboard::mount(&document, &el, id) {
            Ok(d) => {
                register(Mounted::Story(d));
                count += 1;
            }
            Err(e) => log::error!("[story] {} failed to mount: {:?}", id, e),
        }
    }

    for el in dom::elements_with_attr(&document, CORRIDOR_ATTR)? {
        match CorridorConsole::mount(&document, &el, corridor_seed()) {
            Ok(c) => {
                register(Mounted::Corridor(c));
                count += 1;
            }
            Err(e) => log::error!("[story] corridor console failed to mount: {:?}", e),
        }
    }
    Ok(count)
}

fn corridor_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(_) => js_sys::Date::now() as u64,
    }
}

/// JS-side handle to a dashboard mounted after page load.
#[wasm_bindgen]
pub struct DashboardHandle {
    id: u32,
}

#[wasm_bindgen]
impl DashboardHandle {
    /// Mount `scenario` (a slug such as `"cold-chain"`) into `#element_id`.
    pub fn mount(element_id: &str, scenario: &str) -> Result<DashboardHandle, JsValue> {
        let document = dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
        let el: web::Element = document
            .get_element_by_id(element_id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{element_id}")))?;
        let scenario = scenario
            .parse::<ScenarioId>()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let dashboard = Dashboard::mount(&document, &el, scenario)
            .map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
        Ok(DashboardHandle {
            id: register(Mounted::Story(dashboard)),
        })
    }

    pub fn reset(&self) {
        MOUNTED.with(|m| {
            if let Some(Mounted::Story(d)) = m.borrow().get(&self.id) {
                d.reset();
            }
        });
    }

    /// Add an operator message at the current story second.
    pub fn submit(&self, text: &str) -> Result<(), JsValue> {
        MOUNTED.with(|m| match m.borrow().get(&self.id) {
            Some(Mounted::Story(d)) => d
                .submit(text)
                .map_err(|e| JsValue::from_str(&e.to_string())),
            _ => Err(JsValue::from_str("dashboard is not mounted")),
        })
    }

    /// Stop timers, detach listeners and clear the element.
    pub fn unmount(self) {
        let removed = MOUNTED.with(|m| m.borrow_mut().remove(&self.id));
        drop(removed);
    }
}
