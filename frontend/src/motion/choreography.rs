use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{Element, HtmlElement};
use wasm_bindgen::JsCast;
use yew::prelude::*;
use crate::motion::registry::{Crossing, ElementBounds, Marker, Measure, ScrollRegistry, Trigger, TriggerId};

fn viewport_height() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

fn scroll_y() -> f64 {
    web_sys::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

/// Document-relative box of an attached element.
pub fn measure_element(element: &Element) -> Option<ElementBounds> {
    if !element.is_connected() {
        return None;
    }
    let rect = element.get_bounding_client_rect();
    Some(ElementBounds {
        top: rect.top() + scroll_y(),
        height: rect.height(),
    })
}

pub fn measure_ref(node: &NodeRef) -> Measure {
    let node = node.clone();
    Box::new(move || node.cast::<Element>().as_ref().and_then(measure_element))
}

pub fn measure_of(element: &Element) -> Measure {
    let element = element.clone();
    Box::new(move || measure_element(&element))
}

/// The first viewport height of the document, for effects tied to the top of the page.
pub fn measure_first_screen() -> Measure {
    Box::new(|| {
        Some(ElementBounds {
            top: 0.0,
            height: viewport_height(),
        })
    })
}

pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.style().set_property(property, value);
    }
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

pub fn children_matching(root: &Element, selector: &str) -> Vec<Element> {
    let mut found = Vec::new();
    if let Ok(list) = root.query_selector_all(selector) {
        for i in 0..list.length() {
            if let Some(element) = list.item(i).and_then(|node| node.dyn_into::<Element>().ok()) {
                found.push(element);
            }
        }
    }
    found
}

struct Shared {
    registry: RefCell<ScrollRegistry>,
    /// Removals that arrived while the registry was busy running callbacks.
    deferred: RefCell<Vec<TriggerId>>,
}

/// The page-wide registry, handed to sections through context.
#[derive(Clone)]
pub struct ScrollChoreography(Rc<Shared>);

impl PartialEq for ScrollChoreography {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl ScrollChoreography {
    pub fn new() -> Self {
        Self::with_registry(ScrollRegistry::new(viewport_height(), scroll_y()))
    }

    pub fn with_registry(registry: ScrollRegistry) -> Self {
        Self(Rc::new(Shared {
            registry: RefCell::new(registry),
            deferred: RefCell::new(Vec::new()),
        }))
    }

    pub fn scope(&self, section: &'static str) -> SectionTimelines {
        SectionTimelines {
            choreography: self.clone(),
            section,
            ids: RefCell::new(Vec::new()),
        }
    }

    pub fn refresh(&self) {
        match self.0.registry.try_borrow_mut() {
            Ok(mut registry) => {
                self.flush_into(&mut registry);
                registry.refresh(viewport_height());
            }
            Err(_) => log::warn!("Scroll registry busy, skipped a refresh"),
        }
    }

    pub fn update(&self) {
        match self.0.registry.try_borrow_mut() {
            Ok(mut registry) => {
                self.flush_into(&mut registry);
                registry.update(scroll_y());
            }
            Err(_) => log::debug!("Scroll registry busy, skipped an update"),
        }
    }

    /// Applies removals that were postponed. Returns how many triggers went away.
    pub fn flush_deferred(&self) -> usize {
        match self.0.registry.try_borrow_mut() {
            Ok(mut registry) => self.flush_into(&mut registry),
            Err(_) => 0,
        }
    }

    fn flush_into(&self, registry: &mut ScrollRegistry) -> usize {
        let ids: Vec<TriggerId> = self.0.deferred.borrow_mut().drain(..).collect();
        if ids.is_empty() {
            return 0;
        }
        registry.remove(&ids)
    }

    fn release(&self, section: &'static str, ids: Vec<TriggerId>) {
        match self.0.registry.try_borrow_mut() {
            Ok(mut registry) => {
                let removed = registry.remove(&ids);
                log::debug!("Released {} scroll triggers for {}", removed, section);
            }
            Err(_) => {
                log::warn!("Scroll registry busy, deferring release of {} triggers for {}", ids.len(), section);
                self.0.deferred.borrow_mut().extend(ids);
            }
        }
    }

    pub fn trigger_count(&self) -> usize {
        self.0.registry.borrow().len()
    }
}

impl Default for ScrollChoreography {
    fn default() -> Self {
        Self::new()
    }
}

/// Every trigger a section registers through this handle is removed when
/// the handle is dropped.
pub struct SectionTimelines {
    choreography: ScrollChoreography,
    section: &'static str,
    ids: RefCell<Vec<TriggerId>>,
}

impl SectionTimelines {
    fn register(&self, trigger: Trigger) {
        let id = self.choreography.0.registry.borrow_mut().register(self.section, trigger);
        self.ids.borrow_mut().push(id);
    }

    pub fn scrub(&self, measure: Measure, start: Marker, end: Marker, on_progress: impl FnMut(f64) + 'static) {
        self.register(Trigger::scrub(measure, start, end, on_progress));
    }

    pub fn toggle(&self, measure: Measure, start: Marker, end: Marker, on_cross: impl FnMut(Crossing) + 'static) {
        self.register(Trigger::toggle(measure, start, end, on_cross));
    }

    /// Adds `class` to `target` the first time the trigger is entered. Never removed.
    pub fn reveal_once(&self, measure: Measure, start: Marker, target: Element, class: &'static str) {
        self.toggle(measure, start, Marker::BOTTOM_TOP, move |crossing| {
            if crossing == Crossing::Enter {
                set_class(&target, class, true);
            }
        });
    }
}

impl Drop for SectionTimelines {
    fn drop(&mut self) {
        let ids = std::mem::take(self.ids.get_mut());
        self.choreography.release(self.section, ids);
    }
}

#[hook]
pub fn use_choreography() -> ScrollChoreography {
    use_context::<ScrollChoreography>().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(top: f64) -> Measure {
        Box::new(move || Some(ElementBounds { top, height: 400.0 }))
    }

    fn choreography() -> ScrollChoreography {
        ScrollChoreography::with_registry(ScrollRegistry::new(800.0, 0.0))
    }

    #[test]
    fn dropping_a_scope_releases_only_its_triggers() {
        let choreography = choreography();
        let gallery = choreography.scope("gallery");
        let services = choreography.scope("services");
        gallery.scrub(at(1000.0), Marker::TOP_BOTTOM, Marker::BOTTOM_TOP, |_| {});
        gallery.toggle(at(1200.0), Marker::TOP_BOTTOM, Marker::BOTTOM_TOP, |_| {});
        services.toggle(at(3000.0), Marker::TOP_BOTTOM, Marker::BOTTOM_TOP, |_| {});
        assert_eq!(choreography.trigger_count(), 3);

        drop(gallery);
        assert_eq!(choreography.trigger_count(), 1);
        drop(services);
        assert_eq!(choreography.trigger_count(), 0);
    }

    #[test]
    fn release_while_busy_is_deferred_not_lost() {
        let choreography = choreography();
        let gallery = choreography.scope("gallery");
        gallery.scrub(at(1000.0), Marker::TOP_BOTTOM, Marker::BOTTOM_TOP, |_| {});

        {
            let _busy = choreography.0.registry.borrow_mut();
            drop(gallery);
        }
        assert_eq!(choreography.trigger_count(), 1);

        assert_eq!(choreography.flush_deferred(), 1);
        assert_eq!(choreography.trigger_count(), 0);
    }

    #[test]
    fn deferred_release_spares_a_remounted_section() {
        let choreography = choreography();
        let first = choreography.scope("gallery");
        first.scrub(at(1000.0), Marker::TOP_BOTTOM, Marker::BOTTOM_TOP, |_| {});
        {
            let _busy = choreography.0.registry.borrow_mut();
            drop(first);
        }

        let second = choreography.scope("gallery");
        second.scrub(at(1000.0), Marker::TOP_BOTTOM, Marker::BOTTOM_TOP, |_| {});
        assert_eq!(choreography.flush_deferred(), 1);
        assert_eq!(choreography.trigger_count(), 1);
        drop(second);
        assert_eq!(choreography.trigger_count(), 0);
    }
}
