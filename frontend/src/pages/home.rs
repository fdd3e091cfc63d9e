use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, ResizeObserver, ResizeObserverEntry};
use yew::prelude::*;
use crate::components::booking_button::BookingButton;
use crate::components::header::Header;
use crate::components::lazy_section::LazySection;
use crate::components::section_separator::SectionSeparator;
use crate::layout::{Layer, LayoutMetrics};
use crate::motion::choreography::{measure_ref, set_style, ScrollChoreography};
use crate::motion::registry::{Crossing, Marker};
use crate::pages::faq::FaqSection;
use crate::pages::footer::Footer;
use crate::pages::gallery::Gallery;
use crate::pages::hero::Hero;
use crate::pages::location::Location;
use crate::pages::reviews::Reviews;
use crate::pages::services::Services;
use crate::pages::style_advisor::StyleAdvisor;
use crate::utils::subscription::EventSubscription;

fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|w| w.as_f64())
        .unwrap_or(crate::config::WIDE_BREAKPOINT)
}

/// Watches the footer's rendered height. Disconnects on drop.
struct FooterObserver {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl FooterObserver {
    fn observe(footer: &Element, on_height: impl Fn(f64) + 'static) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(move |entries: js_sys::Array| {
            if let Ok(entry) = entries.get(0).dyn_into::<ResizeObserverEntry>() {
                on_height(entry.target().get_bounding_client_rect().height());
            }
        }) as Box<dyn FnMut(js_sys::Array)>);
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
        observer.observe(footer);
        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for FooterObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// The single page. Owns the scroll registry, the wide/narrow layout and the
/// footer reveal, and orders the sections.
#[function_component(Home)]
pub fn home() -> Html {
    let choreography = use_state(ScrollChoreography::new);
    let width = use_state(viewport_width);
    let footer_height = use_state(|| 0.0_f64);
    let applied = use_mut_ref(|| None::<LayoutMetrics>);
    let hero_ref = use_node_ref();
    let content_ref = use_node_ref();
    let footer_ref = use_node_ref();

    let metrics = LayoutMetrics::new(*width, *footer_height);

    // Scroll drives every registered effect; resizes re-measure them.
    {
        let choreography = (*choreography).clone();
        let width = width.clone();
        use_effect_with_deps(
            move |_| {
                let on_scroll = {
                    let choreography = choreography.clone();
                    EventSubscription::window("scroll", Box::new(move || choreography.update()))
                };
                let on_resize = EventSubscription::window(
                    "resize",
                    Box::new(move || {
                        width.set(viewport_width());
                        choreography.refresh();
                    }),
                );
                let subscriptions = match (on_scroll, on_resize) {
                    (Ok(scroll), Ok(resize)) => Some((scroll, resize)),
                    _ => {
                        log::error!("Could not subscribe to window scroll and resize");
                        None
                    }
                };
                move || drop(subscriptions)
            },
            (),
        );
    }

    {
        let footer_ref = footer_ref.clone();
        let footer_height = footer_height.clone();
        use_effect_with_deps(
            move |_| {
                let observer = footer_ref.cast::<Element>().and_then(|footer| {
                    FooterObserver::observe(&footer, move |height| footer_height.set(height))
                        .map_err(|e| log::warn!("ResizeObserver unavailable: {:?}", e))
                        .ok()
                });
                move || drop(observer)
            },
            (),
        );
    }

    // Spacing is applied by this render; re-measure triggers only when it moved.
    {
        let choreography = (*choreography).clone();
        use_effect_with_deps(
            move |metrics| {
                let stale = (*applied.borrow()).map_or(true, |previous| previous.needs_refresh(metrics));
                if stale {
                    log::debug!("Layout changed to {:?}, refreshing scroll triggers", metrics);
                    choreography.refresh();
                }
                *applied.borrow_mut() = Some(*metrics);
                || ()
            },
            metrics,
        );
    }

    // Hide the fixed hero once the content has covered it.
    {
        let choreography = (*choreography).clone();
        let hero_ref = hero_ref.clone();
        let content_ref = content_ref.clone();
        use_effect_with_deps(
            move |_| {
                let timelines = choreography.scope("page");
                if let Some(hero) = hero_ref.cast::<Element>() {
                    timelines.toggle(measure_ref(&content_ref), Marker::TOP_TOP, Marker::BOTTOM_TOP, move |crossing| {
                        let visible = crossing == Crossing::LeaveBack;
                        set_style(&hero, "visibility", if visible { "visible" } else { "hidden" });
                    });
                }
                move || drop(timelines)
            },
            (),
        );
    }

    html! {
        <ContextProvider<ScrollChoreography> context={(*choreography).clone()}>
            <style>{GLOBAL_CSS}</style>
            <Header />
            <div ref={hero_ref} class="hero-shell" style={Layer::Hero.style()}>
                <Hero />
            </div>
            <main ref={content_ref} class="page-content" style={metrics.content_style()}>
                <SectionSeparator text="PRECISION \u{2022} TRADITION \u{2022} STYLE" />
                <LazySection id="gallery">
                    <Gallery />
                </LazySection>
                <LazySection id="location" placeholder_height="130vh">
                    <Location />
                </LazySection>
                <SectionSeparator text="THE MANKIND EXPERIENCE" reverse={true} />
                <LazySection id="services">
                    <Services />
                </LazySection>
                <LazySection id="advisor" placeholder_height="80vh">
                    <StyleAdvisor />
                </LazySection>
                <LazySection id="reviews" placeholder_height="80vh">
                    <Reviews />
                </LazySection>
                <LazySection id="faq">
                    <FaqSection />
                </LazySection>
            </main>
            <div ref={footer_ref} id="contact" class={metrics.footer_class()} style={metrics.footer_style()}>
                <LazySection placeholder_height="480px">
                    <Footer />
                </LazySection>
            </div>
            <BookingButton />
        </ContextProvider<ScrollChoreography>>
    }
}

const GLOBAL_CSS: &str = r#"
    :root { --gold: #d4af37; }
    * { box-sizing: border-box; }
    html, body { margin: 0; background: #000; color: #fff; font-family: 'Inter', sans-serif; }
    a { color: inherit; text-decoration: none; }
    .eyebrow {
        color: var(--gold);
        font-size: 0.75rem;
        font-weight: 700;
        letter-spacing: 0.3em;
        text-transform: uppercase;
    }
    .hero-shell { position: fixed; inset: 0; }
    .page-content {
        position: relative;
        overflow: hidden;
        margin-top: 100vh;
        background: #000;
        box-shadow: 0 30px 60px rgba(0, 0, 0, 0.8);
    }
    .site-footer-shell { position: relative; }
    .site-footer-shell.pinned { position: fixed; left: 0; right: 0; bottom: 0; }
    .lazy-placeholder { background: #000; }
    .lazy-placeholder.loading { background: linear-gradient(90deg, #050505, #0c0c0e, #050505); }
    .particle-backdrop { position: absolute; inset: 0; pointer-events: none; z-index: 0; }
    .particle-canvas { display: block; width: 100%; height: 100%; }
    .site-header {
        position: fixed;
        top: 0;
        left: 0;
        right: 0;
        z-index: 50;
        padding: 1.5rem 2rem;
        transition: background 0.4s, padding 0.4s;
    }
    .site-header.scrolled { background: rgba(0, 0, 0, 0.85); backdrop-filter: blur(10px); padding: 0.75rem 2rem; }
    .nav-inner { display: flex; align-items: center; gap: 2rem; max-width: 1400px; margin: 0 auto; }
    .nav-logo { font-weight: 700; letter-spacing: 0.3em; margin-right: auto; }
    .nav-links { display: flex; gap: 2rem; list-style: none; margin: 0; padding: 0; }
    .nav-links a { font-size: 0.75rem; letter-spacing: 0.2em; text-transform: uppercase; color: #d4d4d8; }
    .nav-links a:hover { color: var(--gold); }
    .nav-mobile-only { display: none; }
    .nav-cta { border: 1px solid var(--gold); padding: 0.5rem 1.25rem; font-size: 0.75rem; letter-spacing: 0.2em; text-transform: uppercase; }
    .nav-burger { display: none; background: none; border: none; cursor: pointer; flex-direction: column; gap: 5px; }
    .nav-burger span { display: block; width: 24px; height: 2px; background: #fff; }
    .section-separator { overflow: hidden; padding: 2rem 0; background: var(--gold); color: #000; }
    .separator-track { display: flex; white-space: nowrap; will-change: transform; }
    .separator-phrase { font-family: 'Playfair Display', serif; font-size: clamp(1.5rem, 4vw, 3rem); font-weight: 700; padding-right: 1rem; }
    .booking-button {
        position: fixed;
        right: 2.5rem;
        bottom: 2.5rem;
        z-index: 50;
        display: flex;
        align-items: center;
        gap: 0.75rem;
        padding: 1rem 1.5rem;
        border-radius: 999px;
        background: #fff;
        color: #000;
        font-weight: 700;
        font-size: 0.75rem;
        letter-spacing: 0.15em;
        text-transform: uppercase;
        box-shadow: 0 20px 40px rgba(0, 0, 0, 0.5);
        transition: transform 0.3s;
    }
    .booking-button:hover { transform: translateY(-4px); }
    @media (max-width: 768px) {
        .site-header, .site-header.scrolled { padding: 1rem; }
        .nav-cta { display: none; }
        .nav-burger { display: flex; }
        .nav-links {
            display: none;
            position: absolute;
            top: 100%;
            left: 0;
            right: 0;
            flex-direction: column;
            gap: 1.5rem;
            padding: 2rem;
            background: rgba(0, 0, 0, 0.95);
        }
        .nav-links.open { display: flex; }
        .nav-mobile-only { display: block; }
        .booking-button { right: 1.5rem; bottom: 1.5rem; }
    }
"#;
