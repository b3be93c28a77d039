mod app;
mod config;
mod core;
mod features;
mod logging;
mod models;
mod pages;

use leptos::prelude::*;

use crate::app::App;
use crate::config::AppConfig;
use crate::core::services::BrowserStorage;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::load(&BrowserStorage);
    logging::init(config.log_level());
    log::info!("Starting task board with storage key {}", config.storage_key);

    leptos::mount::mount_to_body(move || view! { <App config=config.clone() /> });
}
