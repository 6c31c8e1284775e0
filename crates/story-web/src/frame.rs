use anyhow::anyhow;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct LoopState {
    pending: Cell<Option<i32>>,
    tick: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl LoopState {
    fn schedule(&self) {
        let Some(w) = web::window() else {
            return;
        };
        if let Some(tick) = self.tick.borrow().as_ref() {
            match w.request_animation_frame(tick.as_ref().unchecked_ref()) {
                Ok(id) => self.pending.set(Some(id)),
                Err(e) => log::error!("[story] requestAnimationFrame failed: {:?}", e),
            }
        }
    }
}

/// `requestAnimationFrame` loop that stops when dropped.
///
/// The callback only holds a weak reference back to the loop, so dropping the
/// handle cancels the pending frame and frees the closure.
pub struct AnimationLoop {
    state: Rc<LoopState>,
}

impl AnimationLoop {
    pub fn start(mut on_frame: impl FnMut() + 'static) -> anyhow::Result<Self> {
        if web::window().is_none() {
            return Err(anyhow!("no window"));
        }
        let state = Rc::new(LoopState {
            pending: Cell::new(None),
            tick: RefCell::new(None),
        });
        let weak: Weak<LoopState> = Rc::downgrade(&state);
        *state.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.pending.set(None);
            on_frame();
            state.schedule();
        }) as Box<dyn FnMut()>));
        state.schedule();
        Ok(Self { state })
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let Some(id) = self.state.pending.take() {
            if let Some(w) = web::window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
    }
}
