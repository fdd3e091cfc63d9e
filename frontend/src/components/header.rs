use web_sys::MouseEvent;
use yew::prelude::*;
use crate::config::{BOOKING_ANCHOR, PHONE_LINK};
use crate::utils::subscription::EventSubscription;

const NAV_LINKS: [(&str, &str); 5] = [
    ("Gallery", "#gallery"),
    ("Services", "#services"),
    ("Style AI", "#advisor"),
    ("Reviews", "#reviews"),
    ("FAQ", "#faq"),
];

const SCROLLED_AFTER: f64 = 50.0;

#[function_component(Header)]
pub fn header() -> Html {
    let scrolled = use_state(|| false);
    let menu_open = use_state(|| false);

    {
        let scrolled = scrolled.clone();
        use_effect_with_deps(
            move |_| {
                let update = move || {
                    let y = web_sys::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0);
                    scrolled.set(y > SCROLLED_AFTER);
                };
                update();
                let subscription = EventSubscription::window("scroll", Box::new(update))
                    .map_err(|e| log::warn!("Header scroll listener failed: {:?}", e))
                    .ok();
                move || drop(subscription)
            },
            (),
        );
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };
    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(false))
    };

    html! {
        <header class={classes!("site-header", (*scrolled).then_some("scrolled"))}>
            <nav class="nav-inner">
                <a href="#" class="nav-logo">{"MANKIND"}</a>
                <ul class={classes!("nav-links", (*menu_open).then_some("open"))}>
                    { for NAV_LINKS.iter().map(|(label, href)| html! {
                        <li><a href={*href} onclick={close_menu.clone()}>{*label}</a></li>
                    }) }
                    <li class="nav-mobile-only"><a href={PHONE_LINK}>{"Call Us"}</a></li>
                </ul>
                <a href={BOOKING_ANCHOR} class="nav-cta">{"Book"}</a>
                <button
                    class="nav-burger"
                    aria-label="Toggle menu"
                    aria-expanded={(*menu_open).to_string()}
                    onclick={toggle_menu}
                >
                    <span></span><span></span><span></span>
                </button>
            </nav>
        </header>
    }
}
