use std::cell::Cell;
use std::rc::Rc;
use web_sys::Element;
use yew::prelude::*;
use crate::components::particle_backdrop::ParticleBackdrop;
use crate::motion::choreography::{children_matching, measure_of, set_class, set_style, use_choreography};
use crate::motion::registry::{Crossing, Marker};
use crate::render::particles::SceneSpec;
use crate::utils::capability::DeviceProfile;
use crate::utils::subscription::EventSubscription;

const GALLERY_IMAGES: [&str; 18] = [
    "https://i.imgur.com/QZUr0Yz.jpeg",
    "https://i.imgur.com/aalcE21.jpeg",
    "https://i.imgur.com/hz04S8l.jpeg",
    "https://i.imgur.com/crzWxvl.jpeg",
    "https://i.imgur.com/sWA18oz.jpeg",
    "https://i.imgur.com/mbSXERU.jpeg",
    "https://i.imgur.com/YFGRt4B.jpeg",
    "https://i.imgur.com/I2eWHz0.jpeg",
    "https://i.imgur.com/GAV8a94.jpeg",
    "https://i.imgur.com/spY9gLr.jpeg",
    "https://i.imgur.com/HvRfpf0.jpeg",
    "https://i.imgur.com/OewjCRO.jpeg",
    "https://i.imgur.com/hr02tA4.jpeg",
    "https://i.imgur.com/9j6NsB4.jpeg",
    "https://i.imgur.com/9llh76p.jpeg",
    "https://i.imgur.com/Zk2yNS6.jpeg",
    "https://i.imgur.com/dpywdWW.jpeg",
    "https://i.imgur.com/p7dvfjA.jpeg",
];

/// Vertical drift, in pixels at full progress, for each column on wide screens.
pub fn column_shift(column: usize, progress: f64) -> f64 {
    if column % 2 == 1 {
        -150.0 * progress
    } else {
        50.0 * progress
    }
}

/// Column drift for the given viewport. Narrow screens keep the columns still.
pub fn column_offset(profile: &DeviceProfile, column: usize, progress: f64) -> f64 {
    if profile.is_wide() {
        column_shift(column, progress)
    } else {
        0.0
    }
}

fn columns() -> [Vec<&'static str>; 3] {
    let mut columns: [Vec<&'static str>; 3] = Default::default();
    for (i, image) in GALLERY_IMAGES.iter().enumerate() {
        columns[i % 3].push(*image);
    }
    columns
}

#[function_component(Gallery)]
pub fn gallery() -> Html {
    let section = use_node_ref();
    let choreography = use_choreography();

    {
        let section = section.clone();
        use_effect_with_deps(
            move |_| {
                let timelines = choreography.scope("gallery");
                let profile = Rc::new(Cell::new(DeviceProfile::detect()));
                let on_resize = {
                    let profile = profile.clone();
                    let choreography = choreography.clone();
                    EventSubscription::window(
                        "resize",
                        Box::new(move || {
                            profile.set(DeviceProfile::detect());
                            choreography.refresh();
                        }),
                    )
                    .map_err(|e| log::warn!("Gallery resize listener unavailable: {:?}", e))
                    .ok()
                };
                if let Some(root) = section.cast::<Element>() {
                    let grid = children_matching(&root, ".gallery-column");
                    timelines.scrub(measure_of(&root), Marker::TOP_BOTTOM, Marker::BOTTOM_TOP, move |p| {
                        let profile = profile.get();
                        for (i, column) in grid.iter().enumerate() {
                            let shift = column_offset(&profile, i, p);
                            set_style(column, "transform", &format!("translate3d(0, {:.1}px, 0)", shift));
                        }
                    });

                    for item in children_matching(&root, ".gallery-item") {
                        let target = item.clone();
                        timelines.toggle(measure_of(&item), Marker::top_at(0.8), Marker::new(1.0, 0.2), move |crossing| {
                            let awake = matches!(crossing, Crossing::Enter | Crossing::EnterBack);
                            set_class(&target, "is-awake", awake);
                        });
                    }

                    if let Ok(Some(heading)) = root.query_selector(".gallery-heading") {
                        timelines.reveal_once(measure_of(&heading), Marker::top_at(0.6), heading, "is-revealed");
                    }
                }
                move || {
                    drop(timelines);
                    drop(on_resize);
                }
            },
            (),
        );
    }

    html! {
        <section ref={section} class="gallery">
            <style>{GALLERY_CSS}</style>
            <ParticleBackdrop scene={SceneSpec::gallery()} />
            <div class="gallery-heading">
                <span class="eyebrow">{"Portfolio"}</span>
                <h2>{"The Craft"}</h2>
                <p>{"Fades, tapers and sculpted beards from the chair at Mankind."}</p>
            </div>
            <div class="gallery-grid">
                { for columns().iter().enumerate().map(|(c, images)| html! {
                    <div class="gallery-column" key={c}>
                        { for images.iter().enumerate().map(|(i, src)| html! {
                            <figure class="gallery-item" key={i}>
                                <img src={*src} loading="lazy" alt="Haircut by Mankind Gentlemen Barber Shop" />
                            </figure>
                        }) }
                    </div>
                }) }
            </div>
        </section>
    }
}

const GALLERY_CSS: &str = r#"
    .gallery {
        position: relative;
        padding: 8rem 1.5rem;
        background: #050505;
        overflow: hidden;
    }
    .gallery-heading {
        position: relative;
        z-index: 1;
        text-align: center;
        margin-bottom: 5rem;
        opacity: 0;
        transform: translateY(40px);
        transition: opacity 1s ease, transform 1s ease;
    }
    .gallery-heading.is-revealed { opacity: 1; transform: none; }
    .gallery-heading h2 { font-family: 'Playfair Display', serif; font-size: clamp(2.5rem, 6vw, 5rem); margin: 0.5rem 0; }
    .gallery-heading p { color: #a1a1aa; }
    .gallery-grid {
        position: relative;
        z-index: 1;
        display: grid;
        grid-template-columns: repeat(3, 1fr);
        gap: 1.5rem;
        max-width: 1400px;
        margin: 0 auto;
    }
    .gallery-column { display: flex; flex-direction: column; gap: 1.5rem; will-change: transform; }
    .gallery-item {
        margin: 0;
        overflow: hidden;
        border-radius: 2px;
        filter: grayscale(1) brightness(0.6);
        transform: scale(0.95);
        transition: filter 0.8s ease, transform 0.8s ease;
    }
    .gallery-item.is-awake { filter: none; transform: none; }
    .gallery-item img { display: block; width: 100%; height: auto; }
    @media (max-width: 768px) {
        .gallery { padding: 5rem 1rem; }
        .gallery-grid { grid-template-columns: 1fr; gap: 0.75rem; }
        .gallery-column { gap: 0.75rem; }
    }
"#;
