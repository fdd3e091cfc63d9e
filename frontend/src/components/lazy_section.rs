use gloo_timers::callback::Timeout;
use web_sys::Element;
use yew::prelude::*;
use crate::motion::choreography::use_choreography;
use crate::motion::gate::{MountState, ViewportGate};

#[derive(Properties, PartialEq)]
pub struct LazySectionProps {
    pub children: Children,
    #[prop_or_default]
    pub id: Option<AttrValue>,
    /// Height held by the placeholder until the content mounts.
    #[prop_or(AttrValue::from("100vh"))]
    pub placeholder_height: AttrValue,
}

/// Defers its children until the wrapper nears the viewport, then keeps
/// them mounted. Scroll triggers are re-measured once the content is in.
#[function_component(LazySection)]
pub fn lazy_section(props: &LazySectionProps) -> Html {
    let node = use_node_ref();
    let mount = use_state(|| MountState::NotLoaded);
    let choreography = use_choreography();

    {
        let node = node.clone();
        let mount = mount.clone();
        use_effect_with_deps(
            move |_| {
                let gate = node.cast::<Element>().and_then(|element| {
                    let on_enter = {
                        let mount = mount.clone();
                        Box::new(move || mount.set(MountState::Loading))
                    };
                    match ViewportGate::observe(&element, on_enter) {
                        Ok(gate) => Some(gate),
                        Err(e) => {
                            log::warn!("IntersectionObserver unavailable, mounting eagerly: {:?}", e);
                            mount.set(MountState::Loading);
                            None
                        }
                    }
                });
                move || drop(gate)
            },
            (),
        );
    }

    // Loading shows the placeholder for one task so the gate callback
    // never mounts heavy content synchronously.
    {
        let state = *mount;
        let mount = mount.clone();
        use_effect_with_deps(
            move |state| {
                let timer = match *state {
                    MountState::Loading => {
                        let next = state.advance();
                        Some(Timeout::new(0, move || mount.set(next)))
                    }
                    MountState::Mounted => Some(Timeout::new(0, move || choreography.refresh())),
                    MountState::NotLoaded => None,
                };
                move || drop(timer)
            },
            state,
        );
    }

    html! {
        <div ref={node} id={props.id.clone()} class="lazy-section">
            if mount.is_mounted() {
                { for props.children.iter() }
            } else {
                <div
                    class={classes!("lazy-placeholder", (*mount == MountState::Loading).then_some("loading"))}
                    style={format!("min-height: {};", props.placeholder_height)}
                    aria-busy="true"
                ></div>
            }
        </div>
    }
}
