//! Workout Planner Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod logging;
mod messages;
mod router;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::load();
    logging::init(&config);
    log::info!("[APP] starting");
    mount_to_body(move || view! { <App config=config /> });
}
