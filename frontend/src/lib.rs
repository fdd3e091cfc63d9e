pub mod config;
pub mod layout;
pub mod utils {
    pub mod api;
    pub mod capability;
    pub mod subscription;
}
pub mod motion {
    pub mod choreography;
    pub mod gate;
    pub mod registry;
}
pub mod render {
    pub mod lifecycle;
    pub mod particles;
    pub mod surface;
}
pub mod advisor {
    pub mod client;
    pub mod state;
}
pub mod components {
    pub mod booking_button;
    pub mod header;
    pub mod lazy_section;
    pub mod particle_backdrop;
    pub mod section_separator;
}
pub mod pages {
    pub mod faq;
    pub mod footer;
    pub mod gallery;
    pub mod hero;
    pub mod home;
    pub mod location;
    pub mod reviews;
    pub mod services;
    pub mod style_advisor;
}

use yew::prelude::*;
use pages::home::Home;

#[function_component(App)]
pub fn app() -> Html {
    html! { <Home /> }
}

pub fn run() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    log::info!("Starting {}", config::SHOP_NAME);
    yew::Renderer::<App>::new().render();
}
