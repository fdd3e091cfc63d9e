use std::cell::Cell;
use std::rc::Rc;
use web_sys::Element;
use yew::prelude::*;
use crate::motion::choreography::set_style;
use crate::utils::subscription::{EventSubscription, FrameLoop};

/// Percent of the track width moved per second.
const MARQUEE_SPEED: f64 = 2.5;

/// Moves the track by `delta` percent and wraps it into (-100, 0].
pub fn advance_marquee(offset: f64, delta: f64) -> f64 {
    let next = (offset + delta) % 100.0;
    if next > 0.0 {
        next - 100.0
    } else {
        next
    }
}

#[derive(Properties, PartialEq)]
pub struct SectionSeparatorProps {
    pub text: AttrValue,
    #[prop_or(false)]
    pub reverse: bool,
}

/// An endless strip of text. Scrolling up flips its direction.
#[function_component(SectionSeparator)]
pub fn section_separator(props: &SectionSeparatorProps) -> Html {
    let track = use_node_ref();
    {
        let track = track.clone();
        let base_direction = if props.reverse { 1.0 } else { -1.0 };
        use_effect_with_deps(
            move |_| {
                let direction = Rc::new(Cell::new(base_direction));
                let last_scroll = Rc::new(Cell::new(
                    web_sys::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0),
                ));
                let on_scroll = {
                    let direction = direction.clone();
                    EventSubscription::window(
                        "scroll",
                        Box::new(move || {
                            let y = web_sys::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0);
                            let delta = y - last_scroll.replace(y);
                            if delta > 0.0 {
                                direction.set(base_direction);
                            } else if delta < 0.0 {
                                direction.set(-base_direction);
                            }
                        }),
                    )
                    .ok()
                };

                let frames = track.cast::<Element>().and_then(|element| {
                    let mut offset = 0.0;
                    let mut last: Option<f64> = None;
                    FrameLoop::start(Box::new(move |now| {
                        let dt = last.replace(now).map_or(0.0, |prev| (now - prev) / 1000.0).min(0.1);
                        offset = advance_marquee(offset, direction.get() * MARQUEE_SPEED * dt);
                        set_style(&element, "transform", &format!("translate3d({:.3}%, 0, 0)", offset / 2.0));
                    }))
                    .map_err(|e| log::warn!("Marquee disabled: {:?}", e))
                    .ok()
                });

                move || {
                    drop(frames);
                    drop(on_scroll);
                }
            },
            (),
        );
    }

    let phrase = format!("{} \u{2022} ", props.text);
    html! {
        <div class="section-separator" aria-hidden="true">
            <div ref={track} class="separator-track">
                { for (0..8).map(|_| html! { <span class="separator-phrase">{ phrase.clone() }</span> }) }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marquee_wraps_in_both_directions() {
        assert_eq!(advance_marquee(-10.0, -5.0), -15.0);
        assert_eq!(advance_marquee(-98.0, -5.0), -3.0);
        assert_eq!(advance_marquee(-2.0, 5.0), -97.0);
        assert_eq!(advance_marquee(0.0, 0.0), 0.0);
    }
}
