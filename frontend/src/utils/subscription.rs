use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::EventTarget;

/// An event listener that is removed when this value is dropped.
pub struct EventSubscription {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut()>,
}

impl EventSubscription {
    pub fn new(target: &EventTarget, event: &'static str, handler: Box<dyn FnMut()>) -> Result<Self, JsValue> {
        let callback = Closure::wrap(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    pub fn window(event: &'static str, handler: Box<dyn FnMut()>) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        Self::new(&window, event, handler)
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

#[derive(Default)]
struct FrameState {
    handle: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl FrameState {
    fn schedule(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        if let Some(callback) = self.callback.borrow().as_ref() {
            let handle = window.request_animation_frame(callback.as_ref().unchecked_ref())?;
            self.handle.set(Some(handle));
        }
        Ok(())
    }
}

/// A requestAnimationFrame loop. The next frame is cancelled and the tick
/// closure released when this value is dropped.
pub struct FrameLoop {
    state: Rc<FrameState>,
}

impl FrameLoop {
    pub fn start(mut tick: Box<dyn FnMut(f64)>) -> Result<Self, JsValue> {
        let state = Rc::new(FrameState::default());
        let weak = Rc::downgrade(&state);
        let callback = Closure::wrap(Box::new(move |now: f64| {
            let Some(state) = weak.upgrade() else { return };
            state.handle.set(None);
            tick(now);
            if let Err(e) = state.schedule() {
                log::warn!("Frame loop stopped: {:?}", e);
            }
        }) as Box<dyn FnMut(f64)>);

        *state.callback.borrow_mut() = Some(callback);
        state.schedule()?;
        Ok(Self { state })
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let (Some(handle), Some(window)) = (self.state.handle.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(handle);
        }
        self.state.callback.borrow_mut().take();
    }
}
