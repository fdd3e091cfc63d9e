use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// Sections start mounting when they come within half a viewport of the screen.
pub const PRELOAD_MARGIN: &str = "50% 0px 50% 0px";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountState {
    NotLoaded,
    Loading,
    Mounted,
}

impl MountState {
    /// One step forward. Never goes back.
    pub fn advance(self) -> Self {
        match self {
            MountState::NotLoaded => MountState::Loading,
            MountState::Loading | MountState::Mounted => MountState::Mounted,
        }
    }

    pub fn is_mounted(self) -> bool {
        self == MountState::Mounted
    }
}

/// Fires at most once, on the first intersecting observation.
#[derive(Debug, Default)]
pub struct MountGate {
    fired: bool,
}

impl MountGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true only for the observation that opens the gate.
    pub fn observe(&mut self, intersecting: bool) -> bool {
        if self.fired || !intersecting {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// Watches one element and calls `on_enter` the first time it nears the
/// viewport. Observation stops after that, or when the gate is dropped.
pub struct ViewportGate {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl ViewportGate {
    pub fn observe(element: &Element, on_enter: Box<dyn FnOnce()>) -> Result<Self, JsValue> {
        let mut gate = MountGate::new();
        let mut on_enter = Some(on_enter);
        let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            let intersecting = entries.iter().any(|entry| {
                entry
                    .dyn_into::<IntersectionObserverEntry>()
                    .map(|entry| entry.is_intersecting())
                    .unwrap_or(false)
            });
            if gate.observe(intersecting) {
                observer.disconnect();
                if let Some(on_enter) = on_enter.take() {
                    on_enter();
                }
            }
        }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_root_margin(PRELOAD_MARGIN);
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        observer.observe(element);

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    /// The margin the browser applies, as it reports it back.
    pub fn root_margin(&self) -> String {
        self.observer.root_margin()
    }
}

impl Drop for ViewportGate {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
