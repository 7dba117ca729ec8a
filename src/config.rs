//! Runtime Configuration
//!
//! Read once at startup from the optional `window.__WORKOUT_CONFIG__` object.
//! Every field has a default, so a page without the object still boots.

use serde::Deserialize;
use wasm_bindgen::JsValue;

/// Global the host page may define before the app loads
pub const CONFIG_GLOBAL: &str = "__WORKOUT_CONFIG__";

/// Where the app keeps its data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Hosted service through the JS bridge
    Cloud,
    /// In-process store with the same screens, lost on reload
    Demo,
    /// Plain task list, no login
    Local,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Unset means: cloud when the bridge is present, demo otherwise
    pub mode: Option<BackendMode>,
    pub log_capacity: usize,
    pub log_level: String,
    /// How long a failed write stays on screen
    pub error_display_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: None,
            log_capacity: rolling_logger::DEFAULT_CAPACITY,
            log_level: "info".to_string(),
            error_display_ms: 4000,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|window| js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).ok())
            .filter(|value| !value.is_undefined() && !value.is_null());

        match raw {
            Some(value) => serde_wasm_bindgen::from_value(value).unwrap_or_else(|e| {
                web_sys::console::warn_1(
                    &format!("[Config] ignoring invalid {}: {}", CONFIG_GLOBAL, e).into(),
                );
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Pick the backend; cloud without a bridge degrades to demo.
    pub fn resolve_mode(&self, bridge_available: bool) -> BackendMode {
        match self.mode {
            Some(BackendMode::Cloud) if !bridge_available => {
                log::warn!("[Config] cloud mode requested but no backend bridge found, using demo");
                BackendMode::Demo
            }
            Some(mode) => mode,
            None if bridge_available => BackendMode::Cloud,
            None => BackendMode::Demo,
        }
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
