//! Logger wiring
//!
//! Installs the rolling logger with the browser console as its sink.

use log::Level;
use rolling_logger::LoggerConfig;
use wasm_bindgen::JsValue;

use crate::config::AppConfig;

const APP_NAME: &str = "WorkoutPlanner";

pub fn init(config: &AppConfig) {
    let logger = LoggerConfig::new(APP_NAME)
        .with_capacity(config.log_capacity)
        .with_level(config.level_filter())
        .with_sink(console_sink);

    if let Err(e) = rolling_logger::init_logger(logger) {
        web_sys::console::warn_1(&format!("[APP] logger already installed: {}", e).into());
    }
}

fn console_sink(level: Level, line: &str) {
    let line = JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&line),
        Level::Warn => web_sys::console::warn_1(&line),
        Level::Info => web_sys::console::info_1(&line),
        Level::Debug | Level::Trace => web_sys::console::log_1(&line),
    }
}
