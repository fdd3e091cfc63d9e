//! Scroll-linked effects, keyed by the section that owns them.
//!
//! Each trigger maps a scroll range, resolved from markers against the
//! owner's measured box, either to a continuous progress value (scrub) or
//! to discrete boundary crossings (toggle). Ranges are measured on
//! registration and on `refresh`, never during `update`.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementBounds {
    /// Document-relative top edge.
    pub top: f64,
    pub height: f64,
}

/// A point on the element lined up with a point on the viewport.
/// Both edges are fractions: 0 is the top, 1 the bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub element_edge: f64,
    pub viewport_edge: f64,
}

impl Marker {
    pub const TOP_BOTTOM: Marker = Marker::new(0.0, 1.0);
    pub const TOP_TOP: Marker = Marker::new(0.0, 0.0);
    pub const BOTTOM_TOP: Marker = Marker::new(1.0, 0.0);
    pub const BOTTOM_BOTTOM: Marker = Marker::new(1.0, 1.0);
    pub const CENTER_CENTER: Marker = Marker::new(0.5, 0.5);

    pub const fn new(element_edge: f64, viewport_edge: f64) -> Self {
        Self { element_edge, viewport_edge }
    }

    /// Element top meets the given viewport fraction, e.g. "top 80%".
    pub const fn top_at(viewport_edge: f64) -> Self {
        Self::new(0.0, viewport_edge)
    }

    /// The scroll offset at which this marker lines up.
    pub fn resolve(&self, bounds: ElementBounds, viewport_height: f64) -> f64 {
        bounds.top + self.element_edge * bounds.height - self.viewport_edge * viewport_height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Crossing {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Before,
    Inside,
    After,
}

fn crossings(from: Option<Phase>, to: Phase) -> &'static [Crossing] {
    use Crossing::*;
    match (from, to) {
        (None, Phase::Before) => &[],
        (None, Phase::Inside) => &[Enter],
        (None, Phase::After) => &[Enter, Leave],
        (Some(Phase::Before), Phase::Inside) => &[Enter],
        (Some(Phase::Before), Phase::After) => &[Enter, Leave],
        (Some(Phase::Inside), Phase::After) => &[Leave],
        (Some(Phase::After), Phase::Inside) => &[EnterBack],
        (Some(Phase::After), Phase::Before) => &[EnterBack, LeaveBack],
        (Some(Phase::Inside), Phase::Before) => &[LeaveBack],
        _ => &[],
    }
}

pub enum Effect {
    /// Receives progress in [0, 1], only when it changes.
    Scrub(Box<dyn FnMut(f64)>),
    Toggle(Box<dyn FnMut(Crossing)>),
}

pub type Measure = Box<dyn Fn() -> Option<ElementBounds>>;

/// Effects run while the registry is borrowed and must not call back into it.
pub struct Trigger {
    start: Marker,
    end: Marker,
    measure: Measure,
    effect: Effect,
}

impl Trigger {
    pub fn scrub(measure: Measure, start: Marker, end: Marker, on_progress: impl FnMut(f64) + 'static) -> Self {
        Self {
            start,
            end,
            measure,
            effect: Effect::Scrub(Box::new(on_progress)),
        }
    }

    pub fn toggle(measure: Measure, start: Marker, end: Marker, on_cross: impl FnMut(Crossing) + 'static) -> Self {
        Self {
            start,
            end,
            measure,
            effect: Effect::Toggle(Box::new(on_cross)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriggerId(u64);

struct Registered {
    id: TriggerId,
    section: &'static str,
    trigger: Trigger,
    range: Option<(f64, f64)>,
    phase: Option<Phase>,
    progress: Option<f64>,
}

impl Registered {
    fn measure(&mut self, viewport_height: f64) {
        self.range = (self.trigger.measure)().map(|bounds| {
            let start = self.trigger.start.resolve(bounds, viewport_height);
            let end = self.trigger.end.resolve(bounds, viewport_height).max(start);
            (start, end)
        });
    }

    fn evaluate(&mut self, scroll_y: f64) {
        let Some((start, end)) = self.range else { return };
        match &mut self.trigger.effect {
            Effect::Scrub(on_progress) => {
                let progress = if end > start {
                    ((scroll_y - start) / (end - start)).clamp(0.0, 1.0)
                } else if scroll_y >= start {
                    1.0
                } else {
                    0.0
                };
                let changed = self.progress.map_or(true, |last| (last - progress).abs() > f64::EPSILON);
                if changed {
                    self.progress = Some(progress);
                    on_progress(progress);
                }
            }
            Effect::Toggle(on_cross) => {
                let phase = if scroll_y < start {
                    Phase::Before
                } else if scroll_y > end {
                    Phase::After
                } else {
                    Phase::Inside
                };
                for crossing in crossings(self.phase, phase) {
                    on_cross(*crossing);
                }
                self.phase = Some(phase);
            }
        }
    }
}

pub struct ScrollRegistry {
    next_id: u64,
    entries: Vec<Registered>,
    viewport_height: f64,
    scroll_y: f64,
}

impl ScrollRegistry {
    pub fn new(viewport_height: f64, scroll_y: f64) -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
            viewport_height,
            scroll_y,
        }
    }

    /// Measures the trigger and applies it to the current scroll position.
    pub fn register(&mut self, section: &'static str, trigger: Trigger) -> TriggerId {
        let id = TriggerId(self.next_id);
        self.next_id += 1;
        let mut entry = Registered {
            id,
            section,
            trigger,
            range: None,
            phase: None,
            progress: None,
        };
        entry.measure(self.viewport_height);
        entry.evaluate(self.scroll_y);
        self.entries.push(entry);
        id
    }

    /// Drops every trigger the section owns. Safe to call repeatedly.
    pub fn remove_section(&mut self, section: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.section != section);
        before - self.entries.len()
    }

    /// Drops the given triggers, ignoring ids that are already gone.
    pub fn remove(&mut self, ids: &[TriggerId]) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| !ids.contains(&entry.id));
        before - self.entries.len()
    }

    /// Re-measures every trigger and re-applies them at the last scroll position.
    pub fn refresh(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height;
        for entry in &mut self.entries {
            entry.measure(viewport_height);
            entry.evaluate(self.scroll_y);
        }
    }

    pub fn update(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
        for entry in &mut self.entries {
            entry.evaluate(scroll_y);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn section_len(&self, section: &str) -> usize {
        self.entries.iter().filter(|entry| entry.section == section).count()
    }

    pub fn range(&self, id: TriggerId) -> Option<(f64, f64)> {
        self.entries.iter().find(|entry| entry.id == id).and_then(|entry| entry.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn fixed(top: f64, height: f64) -> Measure {
        Box::new(move || Some(ElementBounds { top, height }))
    }

    fn shared(bounds: Rc<Cell<ElementBounds>>) -> Measure {
        Box::new(move || Some(bounds.get()))
    }

    #[test]
    fn marker_resolution() {
        let bounds = ElementBounds { top: 2000.0, height: 600.0 };
        assert_eq!(Marker::TOP_BOTTOM.resolve(bounds, 800.0), 1200.0);
        assert_eq!(Marker::BOTTOM_TOP.resolve(bounds, 800.0), 2600.0);
        assert_eq!(Marker::CENTER_CENTER.resolve(bounds, 800.0), 1900.0);
        assert_eq!(Marker::top_at(0.8).resolve(bounds, 1000.0), 1200.0);
    }

    #[test]
    fn scrub_progress_clamps_and_skips_repeats() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ScrollRegistry::new(800.0, 0.0);
        let log = seen.clone();
        registry.register(
            "gallery",
            Trigger::scrub(fixed(2000.0, 600.0), Marker::TOP_BOTTOM, Marker::BOTTOM_TOP, move |p| {
                log.borrow_mut().push(p)
            }),
        );
        registry.update(100.0);
        registry.update(1900.0);
        registry.update(1900.0);
        registry.update(5000.0);
        assert_eq!(*seen.borrow(), [0.0, 0.5, 1.0]);
    }

    #[test]
    fn toggle_reports_crossings_in_both_directions() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ScrollRegistry::new(1000.0, 0.0);
        let log = seen.clone();
        registry.register(
            "services",
            Trigger::toggle(fixed(1500.0, 500.0), Marker::top_at(0.8), Marker::new(1.0, 0.2), move |c| {
                log.borrow_mut().push(c)
            }),
        );
        registry.update(800.0);
        registry.update(1000.0);
        registry.update(1900.0);
        registry.update(1500.0);
        registry.update(0.0);
        assert_eq!(
            *seen.borrow(),
            [Crossing::Enter, Crossing::Leave, Crossing::EnterBack, Crossing::LeaveBack]
        );
    }

    #[test]
    fn jumping_over_a_range_emits_both_events() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ScrollRegistry::new(1000.0, 0.0);
        let log = seen.clone();
        registry.register(
            "faq",
            Trigger::toggle(fixed(3000.0, 200.0), Marker::TOP_BOTTOM, Marker::BOTTOM_TOP, move |c| {
                log.borrow_mut().push(c)
            }),
        );
        registry.update(10_000.0);
        registry.update(0.0);
        assert_eq!(
            *seen.borrow(),
            [Crossing::Enter, Crossing::Leave, Crossing::EnterBack, Crossing::LeaveBack]
        );
    }

    #[test]
    fn registering_below_the_current_position_applies_immediately() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ScrollRegistry::new(1000.0, 4000.0);
        let log = seen.clone();
        registry.register(
            "reviews",
            Trigger::toggle(fixed(1000.0, 500.0), Marker::top_at(0.8), Marker::BOTTOM_TOP, move |c| {
                log.borrow_mut().push(c)
            }),
        );
        assert_eq!(*seen.borrow(), [Crossing::Enter, Crossing::Leave]);
    }

    #[test]
    fn teardown_removes_only_the_owning_section() {
        let mut registry = ScrollRegistry::new(800.0, 0.0);
        registry.register("gallery", Trigger::scrub(fixed(0.0, 100.0), Marker::TOP_BOTTOM, Marker::BOTTOM_TOP, |_| {}));
        registry.register("gallery", Trigger::toggle(fixed(0.0, 100.0), Marker::TOP_BOTTOM, Marker::BOTTOM_TOP, |_| {}));
        registry.register("location", Trigger::scrub(fixed(0.0, 100.0), Marker::TOP_BOTTOM, Marker::BOTTOM_TOP, |_| {}));

        assert_eq!(registry.remove_section("gallery"), 2);
        assert_eq!(registry.remove_section("gallery"), 0);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.section_len("location"), 1);
    }

    #[test]
    fn removing_by_id_leaves_later_registrations_alone() {
        let mut registry = ScrollRegistry::new(800.0, 0.0);
        let old = registry.register("gallery", Trigger::scrub(fixed(1000.0, 400.0), Marker::TOP_BOTTOM, Marker::BOTTOM_TOP, |_| {}));
        let new = registry.register("gallery", Trigger::scrub(fixed(1000.0, 400.0), Marker::TOP_BOTTOM, Marker::BOTTOM_TOP, |_| {}));

        assert_eq!(registry.remove(&[old]), 1);
        assert_eq!(registry.remove(&[old]), 0);
        assert_eq!(registry.section_len("gallery"), 1);
        assert!(registry.range(new).is_some());
    }

    #[test]
    fn removed_triggers_stop_receiving_updates() {
        let calls = Rc::new(Cell::new(0));
        let mut registry = ScrollRegistry::new(800.0, 0.0);
        let counter = calls.clone();
        registry.register(
            "gallery",
            Trigger::scrub(fixed(1000.0, 1000.0), Marker::TOP_BOTTOM, Marker::BOTTOM_TOP, move |_| {
                counter.set(counter.get() + 1)
            }),
        );
        registry.remove_section("gallery");
        registry.update(1200.0);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn refresh_follows_layout_shifts_above() {
        let bounds = Rc::new(Cell::new(ElementBounds { top: 2000.0, height: 600.0 }));
        let last = Rc::new(Cell::new(-1.0));
        let mut registry = ScrollRegistry::new(800.0, 0.0);
        let sink = last.clone();
        let id = registry.register(
            "location",
            Trigger::scrub(shared(bounds.clone()), Marker::TOP_BOTTOM, Marker::BOTTOM_TOP, move |p| sink.set(p)),
        );
        assert_eq!(registry.range(id), Some((1200.0, 2600.0)));

        registry.update(1900.0);
        assert_eq!(last.get(), 0.5);

        // A section above mounted and pushed this one down by 700px.
        bounds.set(ElementBounds { top: 2700.0, height: 600.0 });
        registry.refresh(800.0);
        assert_eq!(registry.range(id), Some((1900.0, 3300.0)));
        assert_eq!(last.get(), 0.0);

        registry.update(2600.0);
        assert_eq!(last.get(), 0.5);
    }

    #[test]
    fn unmeasurable_triggers_wait_for_refresh() {
        let attached = Rc::new(Cell::new(false));
        let calls = Rc::new(Cell::new(0));
        let mut registry = ScrollRegistry::new(800.0, 500.0);
        let probe = attached.clone();
        let counter = calls.clone();
        let id = registry.register(
            "footer",
            Trigger::toggle(
                Box::new(move || probe.get().then_some(ElementBounds { top: 0.0, height: 400.0 })),
                Marker::TOP_BOTTOM,
                Marker::BOTTOM_TOP,
                move |_| counter.set(counter.get() + 1),
            ),
        );
        registry.update(600.0);
        assert_eq!(registry.range(id), None);
        assert_eq!(calls.get(), 0);

        attached.set(true);
        registry.refresh(800.0);
        assert_eq!(registry.range(id), Some((-800.0, 400.0)));
        assert_eq!(calls.get(), 2);
    }
}
