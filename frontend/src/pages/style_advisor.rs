use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{FileReader, HtmlInputElement, HtmlTextAreaElement, MouseEvent};
use yew::prelude::*;
use crate::advisor::client::request_styles;
use crate::advisor::state::{
    AdvisorAction, AdvisorState, InlineImage, RequestStatus, ALLOWED_MEDIA_TYPES, MAX_DESCRIPTION_CHARS,
    MAX_IMAGE_BYTES,
};

/// Reads a chosen photo into the advisor state, or explains why it was refused.
fn read_photo(file: web_sys::File, advisor: UseReducerHandle<AdvisorState>) {
    if !ALLOWED_MEDIA_TYPES.contains(&file.type_().as_str()) {
        advisor.dispatch(AdvisorAction::RejectInput("Please choose a PNG, JPEG or WebP photo.".to_string()));
        return;
    }
    if file.size() > MAX_IMAGE_BYTES {
        advisor.dispatch(AdvisorAction::RejectInput("Photos must be 4 MB or smaller.".to_string()));
        return;
    }

    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            log::error!("FileReader unavailable: {:?}", e);
            return;
        }
    };
    let onload = {
        let reader = reader.clone();
        Closure::once_into_js(move || {
            let image = reader
                .result()
                .ok()
                .and_then(|result| result.as_string())
                .and_then(|url| InlineImage::from_data_url(&url));
            match image {
                Some(image) => advisor.dispatch(AdvisorAction::AttachImage(image)),
                None => advisor.dispatch(AdvisorAction::RejectInput("That photo could not be read.".to_string())),
            }
        })
    };
    reader.set_onload(Some(onload.unchecked_ref()));
    if let Err(e) = reader.read_as_data_url(&file) {
        log::error!("Failed to read photo: {:?}", e);
    }
}

#[function_component(StyleAdvisor)]
pub fn style_advisor() -> Html {
    let advisor = use_reducer(AdvisorState::default);

    // Each new request id is sent exactly once.
    {
        let in_flight = advisor.in_flight();
        let advisor = advisor.clone();
        use_effect_with_deps(
            move |in_flight| {
                if let Some(pending) = advisor.pending().filter(|p| Some(p.id) == *in_flight).cloned() {
                    spawn_local(async move {
                        let result = request_styles(&pending.payload).await;
                        advisor.dispatch(AdvisorAction::Complete { id: pending.id, result });
                    });
                }
                || ()
            },
            in_flight,
        );
    }

    let on_file = {
        let advisor = advisor.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                read_photo(file, advisor.clone());
            }
            input.set_value("");
        })
    };
    let on_describe = {
        let advisor = advisor.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            advisor.dispatch(AdvisorAction::Describe(area.value()));
        })
    };
    let on_remove_photo = {
        let advisor = advisor.clone();
        Callback::from(move |_: MouseEvent| advisor.dispatch(AdvisorAction::RemoveImage))
    };
    let on_submit = {
        let advisor = advisor.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            advisor.dispatch(AdvisorAction::Submit);
        })
    };
    let on_reset = {
        let advisor = advisor.clone();
        Callback::from(move |_: MouseEvent| advisor.dispatch(AdvisorAction::Reset))
    };

    let loading = advisor.status == RequestStatus::Loading;

    html! {
        <section class="advisor">
            <style>{ADVISOR_CSS}</style>
            <div class="advisor-inner">
                <div class="advisor-intro">
                    <span class="eyebrow">{"AI Style Consultant"}</span>
                    <h2>{"Find Your Signature Look"}</h2>
                    <p>{"Upload a photo, describe your hair, or both. Our consultant suggests three cuts that suit you."}</p>
                </div>

                <form class="advisor-form" onsubmit={on_submit}>
                    <div class="advisor-photo">
                        if let Some(image) = &advisor.image {
                            <img src={image.data_url()} alt="Your photo" />
                            <button type="button" class="advisor-link" onclick={on_remove_photo} disabled={loading}>
                                {"Remove photo"}
                            </button>
                        } else {
                            <label class="advisor-drop">
                                <input
                                    type="file"
                                    accept={ALLOWED_MEDIA_TYPES.join(",")}
                                    onchange={on_file}
                                    disabled={loading}
                                />
                                <span>{"Upload a photo"}</span>
                                <small>{"PNG, JPEG or WebP, up to 4 MB"}</small>
                            </label>
                        }
                    </div>

                    <label class="advisor-description">
                        <span>{"Describe your hair and lifestyle"}</span>
                        <textarea
                            rows="5"
                            maxlength={MAX_DESCRIPTION_CHARS.to_string()}
                            placeholder="e.g. thick wavy hair, oval face, low maintenance"
                            value={advisor.description.clone()}
                            oninput={on_describe}
                            disabled={loading}
                        />
                        <small>{format!("{}/{}", advisor.description.chars().count(), MAX_DESCRIPTION_CHARS)}</small>
                    </label>

                    if let Some(notice) = &advisor.notice {
                        <p class="advisor-notice">{notice}</p>
                    }

                    <div class="advisor-actions">
                        <button type="submit" class="advisor-submit" disabled={!advisor.can_submit()}>
                            { if loading { "Analyzing..." } else { "Get Recommendations" } }
                        </button>
                        <button type="button" class="advisor-link" onclick={on_reset.clone()}>{"Start over"}</button>
                    </div>
                </form>

                <div class="advisor-results" aria-live="polite">
                    if loading {
                        <div class="advisor-loading">{"Consulting the master barber..."}</div>
                    }
                    if let Some(error) = &advisor.error {
                        <p class="advisor-error">{error}</p>
                    }
                    if advisor.status == RequestStatus::Success {
                        <ol class="advisor-cards">
                            { for advisor.recommendations.iter().enumerate().map(|(i, rec)| html! {
                                <li class="advisor-card" key={i}>
                                    <span class="advisor-card-index">{format!("{:02}", i + 1)}</span>
                                    <h3>{&rec.style_name}</h3>
                                    <p>{&rec.description}</p>
                                    <p class="advisor-suitability">{&rec.suitability}</p>
                                </li>
                            }) }
                        </ol>
                        <button type="button" class="advisor-link" onclick={on_reset}>{"Try another look"}</button>
                    }
                </div>
            </div>
        </section>
    }
}

const ADVISOR_CSS: &str = r#"
    .advisor { padding: 8rem 1.5rem; background: #050505; border-top: 1px solid #18181b; }
    .advisor-inner {
        max-width: 1200px;
        margin: 0 auto;
        display: grid;
        grid-template-columns: 1fr 1fr;
        gap: 3rem;
    }
    .advisor-intro { grid-column: 1 / -1; max-width: 40rem; }
    .advisor-intro h2 { font-family: 'Playfair Display', serif; font-size: clamp(2rem, 5vw, 3.5rem); margin: 0.5rem 0; }
    .advisor-intro p { color: #a1a1aa; }
    .advisor-form { display: flex; flex-direction: column; gap: 1.5rem; }
    .advisor-drop {
        display: flex;
        flex-direction: column;
        align-items: center;
        gap: 0.5rem;
        padding: 2.5rem;
        border: 1px dashed #3f3f46;
        cursor: pointer;
    }
    .advisor-drop input { display: none; }
    .advisor-drop small, .advisor-description small { color: #71717a; }
    .advisor-photo img { max-width: 100%; max-height: 18rem; object-fit: cover; display: block; margin-bottom: 0.5rem; }
    .advisor-description { display: flex; flex-direction: column; gap: 0.5rem; }
    .advisor-description textarea {
        background: #09090b;
        border: 1px solid #27272a;
        color: #fff;
        padding: 1rem;
        font: inherit;
        resize: vertical;
    }
    .advisor-notice { color: #fbbf24; margin: 0; }
    .advisor-actions { display: flex; gap: 1.5rem; align-items: center; }
    .advisor-submit {
        padding: 1rem 2rem;
        background: var(--gold);
        color: #000;
        border: none;
        font-weight: 700;
        letter-spacing: 0.15em;
        text-transform: uppercase;
        font-size: 0.75rem;
        cursor: pointer;
    }
    .advisor-submit:disabled { opacity: 0.4; cursor: not-allowed; }
    .advisor-link { background: none; border: none; color: #a1a1aa; text-decoration: underline; cursor: pointer; }
    .advisor-loading { color: var(--gold); animation: advisor-pulse 1.5s ease-in-out infinite; }
    @keyframes advisor-pulse { 50% { opacity: 0.4; } }
    .advisor-error { color: #f87171; }
    .advisor-cards { list-style: none; padding: 0; margin: 0 0 1.5rem; display: flex; flex-direction: column; gap: 1rem; }
    .advisor-card { padding: 1.5rem; border: 1px solid #27272a; background: #09090b; }
    .advisor-card-index { font-family: monospace; color: var(--gold); }
    .advisor-card h3 { font-family: 'Playfair Display', serif; margin: 0.5rem 0; }
    .advisor-card p { color: #d4d4d8; margin: 0.5rem 0 0; line-height: 1.6; }
    .advisor-suitability { color: #a1a1aa !important; font-style: italic; }
    @media (max-width: 768px) {
        .advisor { padding: 5rem 1rem; }
        .advisor-inner { grid-template-columns: 1fr; }
    }
"#;
