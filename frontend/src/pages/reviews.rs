use web_sys::Element;
use yew::prelude::*;
use crate::config::GOOGLE_REVIEW_LINK;
use crate::motion::choreography::{children_matching, measure_of, use_choreography};
use crate::motion::registry::Marker;

struct Review {
    name: &'static str,
    initials: &'static str,
    rating: usize,
    time: &'static str,
    text: &'static str,
}

const REVIEWS: [Review; 3] = [
    Review {
        name: "Sultan Al Nahyan",
        initials: "SN",
        rating: 5,
        time: "2 weeks ago",
        text: "Exceptional service and atmosphere. The barbers are true artists who understand exactly what you need. Best grooming experience in Abu Dhabi.",
    },
    Review {
        name: "James Henderson",
        initials: "JH",
        rating: 5,
        time: "a month ago",
        text: "Mankind is simply the best. Professional, clean, and the vibe is unmatched. Great coffee and even better fades. Highly recommended.",
    },
    Review {
        name: "Mohammed Al Kaabi",
        initials: "MK",
        rating: 5,
        time: "3 weeks ago",
        text: "Finally found a barber who pays attention to details. The hot towel shave was relaxing and the haircut was precise. 5 stars well deserved.",
    },
];

fn star_text(count: usize) -> String {
    "\u{2605}".repeat(count.min(5))
}

fn stars(count: usize) -> Html {
    let filled = star_text(count);
    html! { <span class="stars" aria-label={format!("{} out of 5 stars", count)}>{filled}</span> }
}

#[function_component(Reviews)]
pub fn reviews() -> Html {
    let section = use_node_ref();
    let choreography = use_choreography();

    {
        let section = section.clone();
        use_effect_with_deps(
            move |_| {
                let timelines = choreography.scope("reviews");
                if let Some(root) = section.cast::<Element>() {
                    for heading in children_matching(&root, ".review-reveal") {
                        timelines.reveal_once(measure_of(&heading), Marker::top_at(0.8), heading, "is-revealed");
                    }
                    if let Ok(Some(grid)) = root.query_selector(".reviews-grid") {
                        timelines.reveal_once(measure_of(&grid), Marker::top_at(0.85), grid, "is-revealed");
                    }
                }
                move || drop(timelines)
            },
            (),
        );
    }

    html! {
        <section ref={section} class="reviews">
            <style>{REVIEWS_CSS}</style>
            <div class="reviews-watermark" aria-hidden="true">{"REVIEWS"}</div>
            <div class="reviews-inner">
                <div class="reviews-summary review-reveal">
                    {stars(5)}
                    <strong>{"4.8"}</strong>
                    <span>{"(Based on Google Reviews)"}</span>
                </div>
                <h2 class="review-reveal">{"CLIENT STORIES"}</h2>
                <p class="reviews-lede review-reveal">
                    {"Don't just take our word for it. See what our distinguished gentlemen have to say about their experience at Mankind."}
                </p>
                <div class="reviews-grid">
                    { for REVIEWS.iter().map(|review| html! {
                        <article class="review-card" key={review.name}>
                            <header>
                                <span class="review-avatar">{review.initials}</span>
                                <div>
                                    <h4>{review.name}</h4>
                                    <span class="review-time">{review.time}</span>
                                </div>
                            </header>
                            {stars(review.rating)}
                            <p>{format!("\u{201c}{}\u{201d}", review.text)}</p>
                        </article>
                    }) }
                </div>
                <a class="reviews-cta" href={GOOGLE_REVIEW_LINK} target="_blank" rel="noopener noreferrer">
                    {"Leave a Review on Google"}
                </a>
            </div>
        </section>
    }
}

const REVIEWS_CSS: &str = r#"
    .reviews {
        position: relative;
        padding: 8rem 1.5rem;
        background: #000;
        overflow: hidden;
        text-align: center;
    }
    .reviews-watermark {
        position: absolute;
        top: 50%;
        left: 50%;
        transform: translate(-50%, -50%);
        font-family: 'Playfair Display', serif;
        font-size: 20rem;
        font-weight: 700;
        opacity: 0.02;
        white-space: nowrap;
        pointer-events: none;
    }
    .reviews-inner { position: relative; max-width: 1200px; margin: 0 auto; }
    .review-reveal {
        opacity: 0;
        transform: translateY(30px);
        transition: opacity 0.8s ease, transform 0.8s ease;
    }
    .review-reveal.is-revealed { opacity: 1; transform: none; }
    .reviews-summary { display: flex; gap: 0.75rem; justify-content: center; align-items: center; }
    .reviews-summary span { color: #71717a; font-size: 0.875rem; }
    .reviews h2 { font-family: 'Playfair Display', serif; font-size: clamp(2rem, 5vw, 3rem); }
    .reviews-lede { color: #a1a1aa; max-width: 40rem; margin: 0 auto 4rem; }
    .stars { color: var(--gold); letter-spacing: 0.15em; }
    .reviews-grid {
        display: grid;
        grid-template-columns: repeat(3, 1fr);
        gap: 1.5rem;
        margin-bottom: 3rem;
        text-align: left;
    }
    .review-card {
        padding: 2rem;
        background: #09090b;
        border: 1px solid #27272a;
        opacity: 0;
        transform: translateY(50px);
        transition: opacity 0.8s ease, transform 0.8s ease;
    }
    .reviews-grid.is-revealed .review-card { opacity: 1; transform: none; }
    .reviews-grid.is-revealed .review-card:nth-child(2) { transition-delay: 0.15s; }
    .reviews-grid.is-revealed .review-card:nth-child(3) { transition-delay: 0.3s; }
    .review-card header { display: flex; gap: 1rem; align-items: center; margin-bottom: 1rem; }
    .review-avatar {
        width: 3rem;
        height: 3rem;
        border-radius: 50%;
        display: flex;
        align-items: center;
        justify-content: center;
        background: #27272a;
        color: var(--gold);
        font-weight: 700;
    }
    .review-card h4 { margin: 0; font-size: 0.9rem; }
    .review-time { color: #71717a; font-size: 0.75rem; }
    .review-card p { color: #d4d4d8; font-size: 0.875rem; line-height: 1.7; }
    .reviews-cta {
        display: inline-block;
        padding: 1rem 2rem;
        background: #fff;
        color: #000;
        font-weight: 700;
        font-size: 0.75rem;
        letter-spacing: 0.2em;
        text-transform: uppercase;
    }
    .reviews-cta:hover { background: var(--gold); }
    @media (max-width: 768px) {
        .reviews { padding: 5rem 1rem; }
        .reviews-grid { grid-template-columns: 1fr; }
        .reviews-watermark { font-size: 12rem; }
    }
"#;
