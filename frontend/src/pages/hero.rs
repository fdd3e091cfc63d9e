use gloo_timers::callback::Timeout;
use web_sys::Element;
use yew::prelude::*;
use crate::config::BOOKING_ANCHOR;
use crate::motion::choreography::{measure_first_screen, set_style, use_choreography};
use crate::motion::registry::Marker;

const HERO_IMAGE: &str = "https://i.imgur.com/QuMIGc9.jpeg";
const LOGO: &str = "https://i.imgur.com/qXNeJbV.png";

#[function_component(Hero)]
pub fn hero() -> Html {
    let backdrop = use_node_ref();
    let ready = use_state(|| false);
    let choreography = use_choreography();

    // Intro plays once, shortly after first paint.
    {
        let ready = ready.clone();
        use_effect_with_deps(
            move |_| {
                let timer = Timeout::new(50, move || ready.set(true));
                move || drop(timer)
            },
            (),
        );
    }

    {
        let backdrop = backdrop.clone();
        use_effect_with_deps(
            move |_| {
                let timelines = choreography.scope("hero");
                if let Some(image) = backdrop.cast::<Element>() {
                    timelines.scrub(measure_first_screen(), Marker::TOP_TOP, Marker::BOTTOM_TOP, move |p| {
                        set_style(&image, "transform", &format!("translate3d(0, {:.2}%, 0) scale(1.1)", p * 20.0));
                    });
                }
                move || drop(timelines)
            },
            (),
        );
    }

    html! {
        <section class={classes!("hero", (*ready).then_some("is-ready"))}>
            <style>{HERO_CSS}</style>
            <div class="hero-media">
                <img ref={backdrop} class="hero-image" src={HERO_IMAGE} alt="Barber at work in Mankind Gentlemen Barber Shop" />
                <div class="hero-shade"></div>
            </div>
            <div class="hero-frame" aria-hidden="true"></div>

            <div class="hero-brand hero-reveal">
                <img src={LOGO} alt="Mankind logo" referrerpolicy="no-referrer" />
                <div>
                    <span class="hero-brand-name">{"MANKIND"}</span>
                    <span class="hero-brand-sub">{"Gentlemen Barber Shop"}</span>
                </div>
            </div>

            <div class="hero-content">
                <p class="hero-kicker hero-reveal">{"The Ultimate Grooming Experience"}</p>
                <h1 class="hero-title hero-reveal">
                    {"The Finest Men's Grooming Experience"}
                    <span class="hero-title-place">{"on Al Reem Island, Abu Dhabi"}</span>
                </h1>
                <p class="hero-lede hero-reveal">
                    {"Expert skin fades, precision beard trims, and executive men\u{2019}s grooming tailored for the modern gentleman."}
                </p>
                <a href={BOOKING_ANCHOR} class="hero-cta hero-reveal">{"Book Appointment"}</a>
            </div>
            <div class="hero-scroll hero-reveal" aria-hidden="true">{"Scroll"}</div>
        </section>
    }
}

const HERO_CSS: &str = r#"
    .hero {
        position: relative;
        height: 100vh;
        overflow: hidden;
        display: flex;
        align-items: center;
        justify-content: center;
        background: #000;
    }
    .hero-media { position: absolute; inset: 0; }
    .hero-image {
        width: 100%;
        height: 100%;
        object-fit: cover;
        transform: scale(1.1);
        will-change: transform;
    }
    .hero-shade {
        position: absolute;
        inset: 0;
        background: linear-gradient(to bottom, rgba(0,0,0,0.55), rgba(0,0,0,0.35) 40%, rgba(0,0,0,0.9));
    }
    .hero-frame {
        position: absolute;
        inset: 1.5rem;
        border: 1px solid rgba(255,255,255,0.1);
        pointer-events: none;
    }
    .hero-brand {
        position: absolute;
        top: 1.25rem;
        left: 1.25rem;
        display: flex;
        gap: 1rem;
        align-items: center;
        z-index: 2;
    }
    .hero-brand img { height: 3rem; width: auto; }
    .hero-brand-name { display: block; font-weight: 700; font-size: 1.8rem; letter-spacing: 0.2em; }
    .hero-brand-sub { display: block; font-size: 0.75rem; letter-spacing: 0.3em; text-transform: uppercase; }
    .hero-content {
        position: relative;
        z-index: 1;
        text-align: center;
        max-width: 70rem;
        padding: 0 1rem;
    }
    .hero-kicker {
        color: var(--gold);
        font-size: 0.75rem;
        font-weight: 700;
        letter-spacing: 0.4em;
        text-transform: uppercase;
    }
    .hero-title {
        font-family: 'Playfair Display', serif;
        font-size: clamp(2rem, 5vw, 4rem);
        text-transform: uppercase;
        letter-spacing: 0.1em;
        line-height: 1.15;
    }
    .hero-title-place { display: block; color: var(--gold); font-size: 0.6em; margin-top: 0.5rem; }
    .hero-lede { color: #d4d4d8; font-style: italic; font-size: 1.25rem; max-width: 40rem; margin: 2rem auto; }
    .hero-cta {
        display: inline-block;
        padding: 1.1rem 3rem;
        background: #000;
        border: 1px solid var(--gold);
        color: #fff;
        text-transform: uppercase;
        letter-spacing: 0.2em;
        font-size: 0.75rem;
        font-weight: 700;
    }
    .hero-scroll {
        position: absolute;
        bottom: 2rem;
        left: 50%;
        transform: translateX(-50%);
        font-size: 0.6rem;
        letter-spacing: 0.3em;
        text-transform: uppercase;
        opacity: 0.5;
    }
    .hero-reveal {
        opacity: 0;
        transform: translateY(30px);
        transition: opacity 1.2s ease, transform 1.2s cubic-bezier(0.16, 1, 0.3, 1);
    }
    .hero.is-ready .hero-reveal { opacity: 1; transform: none; }
    .hero.is-ready .hero-reveal:nth-child(2) { transition-delay: 0.15s; }
    .hero.is-ready .hero-reveal:nth-child(3) { transition-delay: 0.3s; }
    .hero.is-ready .hero-reveal:nth-child(4) { transition-delay: 0.45s; }
    @media (max-width: 768px) {
        .hero-frame { inset: 0.75rem; }
        .hero-brand img { height: 2rem; }
        .hero-brand-name { font-size: 1.2rem; }
        .hero-lede { font-size: 0.95rem; }
        .hero-scroll { display: none; }
    }
"#;
