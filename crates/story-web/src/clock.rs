use anyhow::anyhow;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A `setInterval` timer that lives exactly as long as this value.
///
/// Dropping it clears the interval and releases the JS closure, so an
/// unmounted dashboard leaves no timer behind.
pub struct IntervalClock {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

impl IntervalClock {
    pub fn start(period_ms: i32, mut on_tick: impl FnMut() + 'static) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        let closure = Closure::wrap(Box::new(move || on_tick()) as Box<dyn FnMut()>);
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms,
            )
            .map_err(|e| anyhow!("setInterval failed: {:?}", e))?;
        log::debug!("[clock] interval {} started every {} ms", handle, period_ms);
        Ok(Self {
            handle,
            _closure: closure,
        })
    }
}

impl Drop for IntervalClock {
    fn drop(&mut self) {
        if let Some(w) = web::window() {
            w.clear_interval_with_handle(self.handle);
        }
        log::debug!("[clock] interval {} cleared", self.handle);
    }
}

/// A one-shot `setTimeout`. Dropping it before it fires cancels the callback.
pub struct Timeout {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn start(delay_ms: i32, on_fire: impl FnOnce() + 'static) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        let mut on_fire = Some(on_fire);
        let closure = Closure::wrap(Box::new(move || {
            if let Some(f) = on_fire.take() {
                f();
            }
        }) as Box<dyn FnMut()>);
        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms,
            )
            .map_err(|e| anyhow!("setTimeout failed: {:?}", e))?;
        log::debug!("[clock] timeout {} armed for {} ms", handle, delay_ms);
        Ok(Self {
            handle,
            _closure: closure,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(w) = web::window() {
            w.clear_timeout_with_handle(self.handle);
        }
    }
}
