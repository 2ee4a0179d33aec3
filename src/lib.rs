/// VisionFlow Web - client for the AI extraction service
/// Built with Rust + WASM + Yew

pub mod api;
pub mod config;
pub mod coordinator;
pub mod display;
pub mod error;
pub mod lifecycle;
pub mod record;
pub mod ui;

use wasm_bindgen::prelude::*;

use crate::config::ApiConfig;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export hostname extraction for JavaScript access
#[wasm_bindgen]
pub fn hostname_of(url: &str) -> String {
    display::display_host(url)
}

// Start the Yew app with configuration resolved from the page
#[wasm_bindgen]
pub fn start_app() {
    let props = ui::app::AppProps {
        config: ApiConfig::from_environment(),
    };
    yew::Renderer::<ui::app::App>::with_props(props).render();
}
