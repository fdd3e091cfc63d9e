//! Browser checks. Run with `wasm-pack test --headless --firefox frontend`.
#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;
use mankind_frontend::motion::choreography::{measure_of, ScrollChoreography};
use mankind_frontend::motion::gate::ViewportGate;
use mankind_frontend::motion::registry::Marker;
use mankind_frontend::render::lifecycle::MountedSection;
use mankind_frontend::render::particles::SceneSpec;
use mankind_frontend::render::surface::WebPlatform;
use mankind_frontend::utils::subscription::EventSubscription;

wasm_bindgen_test_configure!(run_in_browser);

fn container() -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let element: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
    element.style().set_property("width", "320px").unwrap();
    element.style().set_property("height", "200px").unwrap();
    document.body().unwrap().append_child(&element).unwrap();
    element
}

#[wasm_bindgen_test]
fn particle_surface_detaches_its_canvas_on_teardown() {
    let host = container();
    match MountedSection::mount(&WebPlatform::new(host.clone()), &SceneSpec::gallery()) {
        Ok(section) => {
            assert_eq!(host.child_element_count(), 1);
            drop(section);
            assert_eq!(host.child_element_count(), 0);
        }
        // Headless runners without WebGL2 never attach a canvas.
        Err(_) => assert_eq!(host.child_element_count(), 0),
    }
    host.remove();
}

#[wasm_bindgen_test]
fn dropped_subscription_stops_listening() {
    let host = container();
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let subscription = EventSubscription::new(&host, "ping", Box::new(move || counter.set(counter.get() + 1))).unwrap();

    let event = web_sys::Event::new("ping").unwrap();
    host.dispatch_event(&event).unwrap();
    drop(subscription);
    host.dispatch_event(&event).unwrap();

    assert_eq!(calls.get(), 1);
    host.remove();
}

#[wasm_bindgen_test]
fn section_scope_releases_its_triggers() {
    let host = container();
    let choreography = ScrollChoreography::new();
    {
        let timelines = choreography.scope("gallery");
        timelines.scrub(measure_of(&host), Marker::TOP_BOTTOM, Marker::BOTTOM_TOP, |_| {});
        timelines.toggle(measure_of(&host), Marker::top_at(0.8), Marker::BOTTOM_TOP, |_| {});
        assert_eq!(choreography.trigger_count(), 2);
    }
    assert_eq!(choreography.trigger_count(), 0);
    host.remove();
}

#[wasm_bindgen_test]
fn viewport_gate_preloads_half_a_screen_ahead() {
    let host = container();
    let gate = ViewportGate::observe(&host, Box::new(|| {})).unwrap();
    assert_eq!(gate.root_margin(), "50% 0px 50% 0px");
    drop(gate);
    host.remove();
}
