use yew::prelude::*;
use crate::components::particle_backdrop::ParticleBackdrop;
use crate::config::{EMAIL, MAP_EMBED_URL, PHONE_DISPLAY, PHONE_LINK, SHOP_NAME};
use crate::render::particles::SceneSpec;

const OPENING_HOURS: [(&str, &str); 3] = [
    ("Monday - Friday", "10:00 AM - 10:00 PM"),
    ("Saturday", "10:00 AM - 10:00 PM"),
    ("Sunday", "12:00 PM - 9:00 PM"),
];

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer class="site-footer">
            <style>{FOOTER_CSS}</style>
            <ParticleBackdrop scene={SceneSpec::footer()} class="footer-particles" />
            <div class="footer-inner">
                <div class="footer-grid">
                    <div>
                        <span class="footer-brand">{"MANKIND"}</span>
                        <p>
                            {"A sanctuary for the modern man. We combine traditional barbering techniques with contemporary style to ensure you leave looking and feeling your best."}
                        </p>
                    </div>
                    <div>
                        <h4>{"Opening Hours"}</h4>
                        <ul class="footer-hours">
                            { for OPENING_HOURS.iter().map(|(days, hours)| html! {
                                <li><span>{*days}</span><span class="gold">{*hours}</span></li>
                            }) }
                        </ul>
                    </div>
                    <div>
                        <h4>{"Contact Us"}</h4>
                        <ul class="footer-contact">
                            <li>{"Mankind Barbershop, Al Rayfah St,"}<br/>{"Al Karamah, Abu Dhabi, UAE"}</li>
                            <li><a href={PHONE_LINK}>{PHONE_DISPLAY}</a></li>
                            <li><a href={format!("mailto:{}", EMAIL)}>{EMAIL}</a></li>
                        </ul>
                        <div class="footer-map">
                            <iframe src={MAP_EMBED_URL} title="Map" loading="lazy" referrerpolicy="no-referrer-when-downgrade"></iframe>
                        </div>
                    </div>
                </div>
                <div class="footer-legal">
                    <p>{format!("\u{a9} 2024 {}. All rights reserved.", SHOP_NAME)}</p>
                </div>
            </div>
        </footer>
    }
}

const FOOTER_CSS: &str = r#"
    .site-footer {
        position: relative;
        padding: 6rem 1.5rem 2rem;
        background: #000;
        border-top: 1px solid #18181b;
        overflow: hidden;
    }
    .footer-particles {
        opacity: 0.6;
        -webkit-mask-image: linear-gradient(to bottom, transparent, #000 20%, #000 80%, transparent);
        mask-image: linear-gradient(to bottom, transparent, #000 20%, #000 80%, transparent);
    }
    .footer-inner { position: relative; z-index: 1; max-width: 1280px; margin: 0 auto; }
    .footer-grid { display: grid; grid-template-columns: repeat(3, 1fr); gap: 3rem; margin-bottom: 4rem; }
    .footer-brand { font-family: 'Playfair Display', serif; font-size: 1.5rem; font-weight: 700; letter-spacing: 0.1em; }
    .site-footer p, .site-footer li { color: #a1a1aa; font-size: 0.875rem; line-height: 1.7; }
    .site-footer h4 { font-family: 'Playfair Display', serif; font-size: 1.1rem; margin: 0 0 1.5rem; }
    .footer-hours, .footer-contact { list-style: none; padding: 0; margin: 0 0 1.5rem; }
    .footer-hours li { display: flex; justify-content: space-between; border-bottom: 1px solid #18181b; padding-bottom: 0.5rem; margin-bottom: 0.75rem; }
    .gold { color: var(--gold); }
    .footer-map { height: 10rem; border: 1px solid #27272a; }
    .footer-map iframe { width: 100%; height: 100%; border: 0; opacity: 0.7; }
    .footer-legal { border-top: 1px solid #18181b; padding-top: 2rem; }
    .footer-legal p { font-size: 0.75rem; color: #52525b; }
    @media (max-width: 768px) {
        .footer-grid { grid-template-columns: 1fr; }
    }
"#;
