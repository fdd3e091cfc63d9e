use web_sys::Element;
use yew::prelude::*;
use crate::components::particle_backdrop::ParticleBackdrop;
use crate::config::{MAP_EMBED_URL, SHOP_LATITUDE, SHOP_LONGITUDE};
use crate::motion::choreography::{measure_of, set_style, use_choreography};
use crate::motion::registry::Marker;
use crate::render::particles::SceneSpec;

const DIRECTIONS_URL: &str = "https://maps.google.com/?q=Mankind+Gentlemen+Barbershop+Abu+Dhabi";

/// Timeline length in beats; scroll progress maps linearly onto it.
const TIMELINE_BEATS: f64 = 2.3;

fn segment(t: f64, start: f64, duration: f64) -> f64 {
    ((t - start) / duration).clamp(0.0, 1.0)
}

fn ease_out(x: f64, power: i32) -> f64 {
    1.0 - (1.0 - x).powi(power)
}

fn ease_in(x: f64, power: i32) -> f64 {
    x.powi(power)
}

fn lerp(from: f64, to: f64, x: f64) -> f64 {
    from * (1.0 - x) + to * x
}

/// Visual state of the location section at one point of its scroll range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocationFrame {
    pub text_opacity: f64,
    pub text_scale: f64,
    pub text_y: f64,
    pub text_blur: f64,
    pub globe_scale: f64,
    pub globe_opacity: f64,
    pub panel_x: f64,
    pub panel_opacity: f64,
}

/// Headline rises in, then zooms out and blurs away while the globe grows in
/// behind it; the info panel slides in as the globe settles.
pub fn location_frame(progress: f64) -> LocationFrame {
    let t = progress.clamp(0.0, 1.0) * TIMELINE_BEATS;
    let text_in = ease_out(segment(t, 0.0, 1.0), 2);
    let text_out = ease_in(segment(t, 0.8, 0.5), 2);
    let globe = ease_out(segment(t, 0.8, 1.5), 3);
    let panel = ease_out(segment(t, 1.3, 1.0), 3);

    LocationFrame {
        text_opacity: text_in * (1.0 - text_out),
        text_scale: lerp(0.9, 1.0, text_in) * lerp(1.0, 1.5, text_out),
        text_y: lerp(100.0, -50.0, text_in),
        text_blur: 10.0 * text_out,
        globe_scale: lerp(0.8, 1.0, globe),
        globe_opacity: globe,
        panel_x: lerp(-100.0, 0.0, panel),
        panel_opacity: panel,
    }
}

#[function_component(Location)]
pub fn location() -> Html {
    let section = use_node_ref();
    let headline = use_node_ref();
    let globe = use_node_ref();
    let panel = use_node_ref();
    let choreography = use_choreography();

    {
        let refs = (section.clone(), headline.clone(), globe.clone(), panel.clone());
        use_effect_with_deps(
            move |_| {
                let timelines = choreography.scope("location");
                let (section, headline, globe, panel) = refs;
                if let (Some(root), Some(headline), Some(globe), Some(panel)) = (
                    section.cast::<Element>(),
                    headline.cast::<Element>(),
                    globe.cast::<Element>(),
                    panel.cast::<Element>(),
                ) {
                    timelines.scrub(measure_of(&root), Marker::TOP_BOTTOM, Marker::CENTER_CENTER, move |p| {
                        let f = location_frame(p);
                        set_style(&headline, "opacity", &format!("{:.3}", f.text_opacity));
                        set_style(
                            &headline,
                            "transform",
                            &format!("translate3d(0, {:.1}px, 0) scale({:.3})", f.text_y, f.text_scale),
                        );
                        set_style(&headline, "filter", &format!("blur({:.1}px)", f.text_blur));
                        set_style(&globe, "opacity", &format!("{:.3}", f.globe_opacity));
                        set_style(&globe, "transform", &format!("scale({:.3})", f.globe_scale));
                        set_style(&panel, "opacity", &format!("{:.3}", f.panel_opacity));
                        set_style(&panel, "transform", &format!("translate3d({:.1}px, 0, 0)", f.panel_x));
                    });
                }
                move || drop(timelines)
            },
            (),
        );
    }

    html! {
        <section ref={section} class="location">
            <style>{LOCATION_CSS}</style>
            <div ref={headline} class="location-headline">
                <span class="eyebrow">{"Global Presence"}</span>
                <h2>{"FIND US"}</h2>
                <span class="location-coords">
                    {format!("COORDINATES {:.4}\u{b0} N, {:.4}\u{b0} E", SHOP_LATITUDE, SHOP_LONGITUDE)}
                </span>
            </div>
            <div ref={globe} class="location-globe">
                <ParticleBackdrop scene={SceneSpec::location()} />
            </div>
            <div class="location-layout">
                <div ref={panel} class="location-panel">
                    <div class="location-tags">
                        <span class="tag">{"HQ"}</span>
                        <span class="tag muted">{"AE-AUH"}</span>
                    </div>
                    <h3>{"ABU DHABI"}</h3>
                    <p>{"Al Rayfah St, Al Karamah"}</p>
                    <div class="location-map">
                        <iframe
                            src={MAP_EMBED_URL}
                            title="Mankind Gentlemen Barber Shop on Google Maps"
                            loading="lazy"
                            referrerpolicy="no-referrer-when-downgrade"
                        ></iframe>
                    </div>
                    <a class="location-directions" href={DIRECTIONS_URL} target="_blank" rel="noopener noreferrer">
                        {"Initiate Navigation"}
                    </a>
                </div>
            </div>
        </section>
    }
}

const LOCATION_CSS: &str = r#"
    .location {
        position: relative;
        min-height: 130vh;
        background: #000;
        overflow: hidden;
    }
    .location-headline {
        position: absolute;
        inset: 0;
        z-index: 3;
        display: flex;
        flex-direction: column;
        align-items: center;
        justify-content: center;
        pointer-events: none;
        opacity: 0;
        mix-blend-mode: difference;
        will-change: transform, opacity, filter;
    }
    .location-headline h2 {
        font-family: 'Playfair Display', serif;
        font-size: 8vw;
        line-height: 1;
        margin: 1rem 0;
    }
    .location-coords { font-family: monospace; letter-spacing: 0.3em; font-size: 0.7rem; color: #a1a1aa; }
    .location-globe { position: absolute; inset: 0; z-index: 1; opacity: 0; will-change: transform, opacity; }
    .location-layout {
        position: relative;
        z-index: 2;
        min-height: 130vh;
        max-width: 1400px;
        margin: 0 auto;
        padding: 0 1.5rem;
        display: flex;
        align-items: center;
    }
    .location-panel {
        width: min(28rem, 100%);
        padding: 2rem;
        background: rgba(9, 9, 11, 0.8);
        border: 1px solid #27272a;
        backdrop-filter: blur(12px);
        opacity: 0;
    }
    .location-tags { display: flex; gap: 0.75rem; margin-bottom: 1rem; }
    .tag { font-size: 0.6rem; letter-spacing: 0.2em; border: 1px solid rgba(212,175,55,0.3); color: var(--gold); padding: 0.1rem 0.5rem; }
    .tag.muted { color: #71717a; border-color: #3f3f46; font-family: monospace; }
    .location-panel h3 { font-family: 'Playfair Display', serif; font-size: 3rem; margin: 0 0 0.5rem; }
    .location-panel p { color: #a1a1aa; }
    .location-map { height: 12rem; margin: 1.5rem 0; border: 1px solid #27272a; }
    .location-map iframe { width: 100%; height: 100%; border: 0; filter: grayscale(0.6); }
    .location-directions {
        display: inline-block;
        color: var(--gold);
        font-size: 0.7rem;
        letter-spacing: 0.2em;
        text-transform: uppercase;
        border-bottom: 1px solid rgba(212,175,55,0.3);
        padding-bottom: 0.25rem;
    }
    @media (max-width: 768px) {
        .location-layout { align-items: flex-end; padding-bottom: 4rem; }
        .location-panel h3 { font-size: 2rem; }
    }
"#;
