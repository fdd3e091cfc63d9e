use serde_json::json;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlScriptElement, MouseEvent};
use yew::prelude::*;
use crate::config::BOOKING_ANCHOR;
use crate::motion::choreography::{children_matching, measure_of, use_choreography};
use crate::motion::registry::Marker;

pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const FAQS: [Faq; 5] = [
    Faq {
        question: "Where can I find a high-end barber shop near Al Reem Island?",
        answer: "Mankind Gentlemen Barber Shop is the premier destination for executive grooming near Al Reem Island. Located just minutes away in Al Karamah, we offer world-class haircuts, beard sculpting, and luxury treatments in a sophisticated setting tailored for the modern gentleman.",
    },
    Faq {
        question: "Do I need to book an appointment in advance?",
        answer: "While we do accommodate walk-ins when possible, we highly recommend booking an appointment to secure your preferred time slot and barber. You can easily book online through our website or by calling us directly.",
    },
    Faq {
        question: "What specific grooming services do you offer?",
        answer: "We provide a full range of services including precision skin fades, classic scissor cuts, hot towel shaves, beard styling, facials, hair coloring, keratin treatments, and manicures/pedicures.",
    },
    Faq {
        question: "What are your opening hours?",
        answer: "We are open Monday through Saturday from 10:00 AM to 10:00 PM, and on Sundays from 12:00 PM to 9:00 PM to accommodate your busy schedule.",
    },
    Faq {
        question: "Is there parking available nearby?",
        answer: "Yes, there is parking available near our location on Al Rayfah St, Al Karamah, making your visit convenient and stress-free.",
    },
];

/// schema.org FAQPage markup for search engines.
pub fn faq_structured_data() -> serde_json::Value {
    json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": FAQS.iter().map(|faq| json!({
            "@type": "Question",
            "name": faq.question,
            "acceptedAnswer": {
                "@type": "Answer",
                "text": faq.answer,
            }
        })).collect::<Vec<_>>()
    })
}

/// Adds the JSON-LD script to <head>; the returned element is removed on teardown.
fn inject_structured_data() -> Option<Element> {
    let document = web_sys::window()?.document()?;
    let script: HtmlScriptElement = document.create_element("script").ok()?.dyn_into().ok()?;
    script.set_type("application/ld+json");
    script.set_text(&faq_structured_data().to_string()).ok()?;
    document.head()?.append_child(&script).ok()?;
    Some(script.into())
}

#[derive(Properties, PartialEq)]
struct FaqItemProps {
    index: usize,
    question: AttrValue,
    answer: AttrValue,
    open: bool,
    on_toggle: Callback<usize>,
}

#[function_component(FaqItem)]
fn faq_item(props: &FaqItemProps) -> Html {
    let toggle = {
        let on_toggle = props.on_toggle.clone();
        let index = props.index;
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_toggle.emit(index);
        })
    };
    html! {
        <div class={classes!("faq-item", props.open.then_some("open"))}>
            <button class="faq-question" onclick={toggle} aria-expanded={props.open.to_string()}>
                <span class="faq-number">{format!("{:02}", props.index + 1)}</span>
                <span class="faq-question-text">{&props.question}</span>
                <span class="faq-icon">{if props.open { "\u{2212}" } else { "+" }}</span>
            </button>
            <div class="faq-answer">
                <p>{&props.answer}</p>
                <a href={BOOKING_ANCHOR} class="faq-book">{"Book Appointment"}</a>
            </div>
        </div>
    }
}

#[function_component(FaqSection)]
pub fn faq_section() -> Html {
    let section = use_node_ref();
    let open = use_state(|| None::<usize>);
    let choreography = use_choreography();

    use_effect_with_deps(
        move |_| {
            let script = inject_structured_data();
            move || {
                if let Some(script) = script {
                    script.remove();
                }
            }
        },
        (),
    );

    {
        let section = section.clone();
        use_effect_with_deps(
            move |_| {
                let timelines = choreography.scope("faq");
                if let Some(root) = section.cast::<Element>() {
                    if let Ok(Some(heading)) = root.query_selector(".faq-heading") {
                        timelines.reveal_once(measure_of(&heading), Marker::top_at(0.7), heading, "is-revealed");
                    }
                    for item in children_matching(&root, ".faq-item") {
                        timelines.reveal_once(measure_of(&item), Marker::top_at(0.9), item, "is-revealed");
                    }
                }
                move || drop(timelines)
            },
            (),
        );
    }

    let on_toggle = {
        let open = open.clone();
        Callback::from(move |index: usize| {
            open.set(if *open == Some(index) { None } else { Some(index) });
        })
    };

    html! {
        <section ref={section} class="faq">
            <style>{FAQ_CSS}</style>
            <div class="faq-marquee" aria-hidden="true">
                <span>{"QUESTIONS \u{2022} ANSWERS \u{2022} QUESTIONS \u{2022} ANSWERS \u{2022} "}</span>
                <span>{"QUESTIONS \u{2022} ANSWERS \u{2022} QUESTIONS \u{2022} ANSWERS \u{2022} "}</span>
            </div>
            <div class="faq-inner">
                <div class="faq-heading">
                    <span class="eyebrow">{"Need Clarity?"}</span>
                    <h2>{"INFO &"}<br/><em>{"ANSWERS"}</em></h2>
                </div>
                <div class="faq-list">
                    { for FAQS.iter().enumerate().map(|(index, faq)| html! {
                        <FaqItem
                            key={index}
                            index={index}
                            question={faq.question}
                            answer={faq.answer}
                            open={*open == Some(index)}
                            on_toggle={on_toggle.clone()}
                        />
                    }) }
                </div>
            </div>
        </section>
    }
}

const FAQ_CSS: &str = r#"
    .faq {
        position: relative;
        padding: 8rem 1.5rem;
        background: #09090b;
        border-top: 1px solid #18181b;
        overflow: hidden;
    }
    .faq-marquee {
        position: absolute;
        inset: 0;
        display: flex;
        align-items: center;
        white-space: nowrap;
        opacity: 0.03;
        pointer-events: none;
        font-family: 'Playfair Display', serif;
        font-size: 20vw;
        font-weight: 700;
    }
    .faq-marquee span { animation: faq-marquee 40s linear infinite; padding-right: 2rem; }
    @keyframes faq-marquee { from { transform: translateX(0); } to { transform: translateX(-100%); } }
    .faq-inner { position: relative; z-index: 1; max-width: 1400px; margin: 0 auto; }
    .faq-heading {
        margin-bottom: 5rem;
        opacity: 0;
        transform: translateY(40px);
        transition: opacity 1s ease, transform 1s ease;
    }
    .faq-heading h2 { font-family: 'Playfair Display', serif; font-size: clamp(3rem, 8vw, 6rem); line-height: 1; margin: 1rem 0 0; }
    .faq-heading em { color: #52525b; }
    .faq-list { border-top: 1px solid #27272a; }
    .faq-item {
        border-bottom: 1px solid #27272a;
        opacity: 0;
        transform: translateY(30px);
        transition: opacity 0.8s ease, transform 0.8s ease, background 0.5s;
    }
    .faq-heading.is-revealed, .faq-item.is-revealed { opacity: 1; transform: none; }
    .faq-item.open { background: rgba(24, 24, 27, 0.4); }
    .faq-question {
        width: 100%;
        display: flex;
        align-items: center;
        gap: 2rem;
        padding: 3rem 0;
        background: none;
        border: none;
        color: #d4d4d8;
        text-align: left;
        cursor: pointer;
    }
    .faq-number { font-family: monospace; color: #52525b; width: 4rem; }
    .faq-item.open .faq-number { color: var(--gold); }
    .faq-question-text { flex: 1; font-family: 'Playfair Display', serif; font-size: clamp(1.25rem, 3vw, 2.25rem); }
    .faq-icon {
        width: 3rem;
        height: 3rem;
        border-radius: 50%;
        border: 1px solid #27272a;
        display: flex;
        align-items: center;
        justify-content: center;
        font-size: 1.25rem;
    }
    .faq-answer {
        max-height: 0;
        overflow: hidden;
        padding-left: 6rem;
        transition: max-height 0.5s ease;
    }
    .faq-item.open .faq-answer { max-height: 30rem; padding-bottom: 3rem; }
    .faq-answer p { color: #a1a1aa; font-size: 1.125rem; line-height: 1.7; max-width: 48rem; }
    .faq-book { color: var(--gold); font-size: 0.7rem; letter-spacing: 0.2em; text-transform: uppercase; }
    @media (max-width: 768px) {
        .faq { padding: 5rem 1rem; }
        .faq-number { display: none; }
        .faq-question { padding: 2rem 0; gap: 1rem; }
        .faq-answer { padding-left: 0; }
        .faq-book { display: none; }
    }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_data_lists_every_question() {
        let data = faq_structured_data();
        assert_eq!(data["@type"], "FAQPage");
        let entities = data["mainEntity"].as_array().unwrap();
        assert_eq!(entities.len(), FAQS.len());
        assert_eq!(entities[3]["name"], "What are your opening hours?");
        assert_eq!(entities[3]["acceptedAnswer"]["@type"], "Answer");
    }
}
