use web_sys::Element;
use yew::prelude::*;
use crate::components::particle_backdrop::ParticleBackdrop;
use crate::motion::choreography::{children_matching, measure_of, use_choreography};
use crate::motion::registry::Marker;
use crate::render::particles::SceneSpec;

#[derive(Debug, PartialEq)]
pub struct ServiceItem {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, PartialEq)]
pub struct ServiceCategory {
    pub id: &'static str,
    pub title: &'static str,
    pub items: &'static [ServiceItem],
}

pub const SERVICE_CATEGORIES: &[ServiceCategory] = &[
    ServiceCategory {
        id: "01",
        title: "Hair Services",
        items: &[
            ServiceItem {
                name: "Haircut + Beard + Wash + Blow Dry",
                description: "Our signature full-grooming package on Al Reem Island. Includes a precision haircut, professional beard shaping, a refreshing hair wash, and a professional blow-dry finish for a sharp, executive look.",
            },
            ServiceItem {
                name: "Trim + Wash + Blow Dry",
                description: "Perfect for maintaining your current style. We provide a meticulous hair trim followed by a deep-cleansing wash and a styled blow-dry.",
            },
            ServiceItem {
                name: "Signature Haircut",
                description: "A standalone precision cut tailored to your head shape. Our expert barbers specialize in skin fades, tapers, and classic scissor cuts in Abu Dhabi.",
            },
            ServiceItem {
                name: "Hairstyling",
                description: "Whether it’s for a special event or a daily professional look, we use premium pomades and styling techniques to perfect your hair's volume and texture.",
            },
            ServiceItem {
                name: "Perming / Perm",
                description: "Add texture and curls to your hair with our modern men's perm service. We ensure a natural-looking curl that is easy to manage and style.",
            },
            ServiceItem {
                name: "Kids Haircut",
                description: "A gentle and patient grooming experience for the younger gentlemen of Al Reem. We specialize in stylish, clean cuts for children of all ages.",
            },
        ],
    },
    ServiceCategory {
        id: "02",
        title: "Beard Services",
        items: &[
            ServiceItem {
                name: "Beard Trim",
                description: "Maintain your length and clean up the edges. Our barbers use clippers and shears to ensure your beard shape complements your facial features perfectly.",
            },
            ServiceItem {
                name: "Full Beard Shave",
                description: "A clean, smooth shave for those who prefer the sharp, clean-shaven look. We focus on skin comfort and a close finish.",
            },
            ServiceItem {
                name: "Beard Styling",
                description: "The ultimate sculpting service. We use precision tools to define your beard lines, including cheek and neck fades for a high-definition look.",
            },
            ServiceItem {
                name: "Shave With Steam",
                description: "Experience the luxury of a traditional straight-razor shave. Warm steam softens the hair and opens pores for the closest, most comfortable shave in Abu Dhabi.",
            },
        ],
    },
    ServiceCategory {
        id: "03",
        title: "Facial Services",
        items: &[
            ServiceItem {
                name: "Express Facial",
                description: "A quick skin-refresh for the busy professional. Includes deep cleansing and hydration to remove impurities and energize your complexion. (30 mins)",
            },
            ServiceItem {
                name: "Facial (1 Hour)",
                description: "Our most popular skin treatment on Al Reem Island. A deep-pore cleansing, exfoliation, and hydration session designed specifically for men's skin.",
            },
            ServiceItem {
                name: "Face Scrub",
                description: "A professional exfoliation treatment that removes dead skin cells and prevents ingrown hairs, leaving your skin feeling smooth and revitalized.",
            },
            ServiceItem {
                name: "Eye Mask (Patch)",
                description: "Reduce puffiness and dark circles with our cooling eye patches. Perfect for looking refreshed before a meeting or event.",
            },
            ServiceItem {
                name: "Face Mask",
                description: "A deep-cleansing mask tailored to your skin type (oily, dry, or sensitive) to draw out toxins and tighten pores.",
            },
            ServiceItem {
                name: "Face Threading",
                description: "Achieve ultra-clean lines for your eyebrows or cheeks. Threading provides a precise finish that lasts longer than shaving.",
            },
        ],
    },
    ServiceCategory {
        id: "04",
        title: "Hair & Beard Dye",
        items: &[
            ServiceItem {
                name: "Hair Color Change",
                description: "A complete transformation. Whether you're going for a bold new look or a subtle shift, we use high-quality, scalp-safe men's hair color.",
            },
            ServiceItem {
                name: "Hair Coloring (Black)",
                description: "Specialized grey coverage for men. We apply natural black tones that blend seamlessly with your existing hair for a youthful look.",
            },
            ServiceItem {
                name: "Beard Color (Black)",
                description: "Define your beard and cover patches or greys. Our beard-specific dyes are designed to be skin-safe and long-lasting.",
            },
        ],
    },
    ServiceCategory {
        id: "05",
        title: "Treatments",
        items: &[
            ServiceItem {
                name: "Keratin Treatment",
                description: "The best solution for frizzy or unmanageable hair. This treatment smoothens the hair cuticle, making it easier to style and resistant to Abu Dhabi humidity.",
            },
            ServiceItem {
                name: "Hair Protein",
                description: "Strengthen your hair from the root. Our protein treatment restores damaged hair fibers, adding volume and a healthy shine.",
            },
            ServiceItem {
                name: "Hot Oil Treatment",
                description: "A traditional remedy for dry scalps and brittle hair. Warm oils penetrate deep to nourish the scalp and promote healthy hair growth.",
            },
            ServiceItem {
                name: "Relaxer Treatment",
                description: "Soften tight curls and reduce volume. This service makes thick or coarse hair much easier to manage and comb.",
            },
        ],
    },
    ServiceCategory {
        id: "06",
        title: "Manicure & Pedicure",
        items: &[
            ServiceItem {
                name: "Mani-Pedi + Spa",
                description: "The ultimate executive relaxation. Includes nail shaping, cuticle care, an exfoliating foot scrub, and a soothing spa massage.",
            },
            ServiceItem {
                name: "Manicure",
                description: "Professional hand and nail grooming. We focus on clean cuticles and buffed nails for a polished, professional appearance.",
            },
            ServiceItem {
                name: "Pedicure",
                description: "Relax while we take care of your feet. Includes nail trimming, dead skin removal, and moisturizing for healthy, soft feet.",
            },
            ServiceItem {
                name: "Foot Scrub",
                description: "A specialized exfoliation treatment to remove calluses and dry skin, followed by a hydrating cream application.",
            },
        ],
    },
    ServiceCategory {
        id: "07",
        title: "Waxing Services",
        items: &[
            ServiceItem {
                name: "Nose / Ear Waxing",
                description: "Quick and effective removal of unwanted hair. We use high-quality wax designed for sensitive areas to minimize discomfort.",
            },
            ServiceItem {
                name: "Body Waxing",
                description: "Full Back, Chest, or Stomach. Achieve a smooth, athletic look. Our technicians ensure even hair removal with minimal skin irritation for larger body areas.",
            },
        ],
    },
    ServiceCategory {
        id: "08",
        title: "Massage & Home",
        items: &[
            ServiceItem {
                name: "Head, Neck & Shoulder",
                description: "Relieve tension from a long day. This targeted massage focuses on the most common areas of stress for immediate relaxation.",
            },
            ServiceItem {
                name: "VIP Home Services",
                description: "Mankind brings the luxury barbershop experience to you. Our expert barbers arrive fully equipped to provide premium grooming in the comfort of your home or office.",
            },
        ],
    },
];

#[function_component(Services)]
pub fn services() -> Html {
    let section = use_node_ref();
    let choreography = use_choreography();

    {
        let section = section.clone();
        use_effect_with_deps(
            move |_| {
                let timelines = choreography.scope("services");
                if let Some(root) = section.cast::<Element>() {
                    if let Ok(Some(heading)) = root.query_selector(".services-heading") {
                        timelines.reveal_once(measure_of(&heading), Marker::top_at(0.8), heading, "is-revealed");
                    }
                    for card in children_matching(&root, ".service-category") {
                        timelines.reveal_once(measure_of(&card), Marker::top_at(0.85), card, "is-revealed");
                    }
                }
                move || drop(timelines)
            },
            (),
        );
    }

    html! {
        <section ref={section} class="services">
            <style>{SERVICES_CSS}</style>
            <ParticleBackdrop scene={SceneSpec::services()} />
            <div class="services-inner">
                <div class="services-heading">
                    <span class="eyebrow">{"The Menu"}</span>
                    <h2>{"Services"}</h2>
                    <p>{"Every appointment includes a consultation, a hot towel and a finish you can recreate at home."}</p>
                </div>
                <div class="services-grid">
                    { for SERVICE_CATEGORIES.iter().map(|category| html! {
                        <article class="service-category" key={category.id}>
                            <header>
                                <span class="service-number">{category.id}</span>
                                <h3>{category.title}</h3>
                            </header>
                            <ul>
                                { for category.items.iter().map(|item| html! {
                                    <li class="service-item">
                                        <h4>{item.name}</h4>
                                        <p>{item.description}</p>
                                    </li>
                                }) }
                            </ul>
                        </article>
                    }) }
                </div>
            </div>
        </section>
    }
}

const SERVICES_CSS: &str = r#"
    .services {
        position: relative;
        padding: 8rem 1.5rem;
        background: #09090b;
        overflow: hidden;
    }
    .services-inner { position: relative; z-index: 1; max-width: 1400px; margin: 0 auto; }
    .services-heading {
        max-width: 40rem;
        margin-bottom: 4rem;
        opacity: 0;
        transform: translateY(40px);
        transition: opacity 1s ease, transform 1s ease;
    }
    .services-heading h2 { font-family: 'Playfair Display', serif; font-size: clamp(2.5rem, 6vw, 5rem); margin: 0.5rem 0; }
    .services-heading p { color: #a1a1aa; }
    .services-grid {
        display: grid;
        grid-template-columns: repeat(auto-fill, minmax(20rem, 1fr));
        gap: 1.5rem;
    }
    .service-category {
        padding: 2rem;
        border: 1px solid #27272a;
        background: rgba(0, 0, 0, 0.6);
        backdrop-filter: blur(6px);
        opacity: 0;
        transform: translateY(50px);
        transition: opacity 0.8s ease, transform 0.8s ease, border-color 0.3s;
    }
    .service-category:hover { border-color: rgba(212, 175, 55, 0.5); }
    .services-heading.is-revealed,
    .service-category.is-revealed { opacity: 1; transform: none; }
    .service-category header { display: flex; align-items: baseline; gap: 1rem; margin-bottom: 1.5rem; }
    .service-number { font-family: monospace; color: var(--gold); }
    .service-category h3 { font-family: 'Playfair Display', serif; font-size: 1.6rem; margin: 0; }
    .service-category ul { list-style: none; padding: 0; margin: 0; }
    .service-item { padding: 1rem 0; border-top: 1px solid #18181b; }
    .service-item h4 { margin: 0 0 0.4rem; font-size: 1rem; }
    .service-item p { margin: 0; color: #a1a1aa; font-size: 0.875rem; line-height: 1.6; }
    @media (max-width: 768px) {
        .services { padding: 5rem 1rem; }
        .services-grid { grid-template-columns: 1fr; }
    }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_has_eight_numbered_categories() {
        assert_eq!(SERVICE_CATEGORIES.len(), 8);
        for (i, category) in SERVICE_CATEGORIES.iter().enumerate() {
            assert_eq!(category.id, format!("{:02}", i + 1));
            assert!(!category.items.is_empty());
        }
    }
}
