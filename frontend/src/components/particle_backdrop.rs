use web_sys::HtmlElement;
use yew::prelude::*;
use crate::render::lifecycle::MountedSection;
use crate::render::particles::SceneSpec;
use crate::render::surface::WebPlatform;

#[derive(Properties, PartialEq)]
pub struct ParticleBackdropProps {
    pub scene: SceneSpec,
    #[prop_or_default]
    pub class: Classes,
}

/// A particle scene filling its parent. Everything it acquires is released on unmount.
#[function_component(ParticleBackdrop)]
pub fn particle_backdrop(props: &ParticleBackdropProps) -> Html {
    let container = use_node_ref();
    {
        let container = container.clone();
        let scene = props.scene.clone();
        use_effect_with_deps(
            move |_| {
                let section = container.cast::<HtmlElement>().and_then(|element| {
                    match MountedSection::mount(&WebPlatform::new(element), &scene) {
                        Ok(section) => Some(section),
                        Err(e) => {
                            log::warn!("Particle scene unavailable: {}", e);
                            None
                        }
                    }
                });
                move || drop(section)
            },
            (),
        );
    }

    html! {
        <div ref={container} class={classes!("particle-backdrop", props.class.clone())} aria-hidden="true"></div>
    }
}
