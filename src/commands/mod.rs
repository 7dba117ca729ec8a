//! Backend Bridge
//!
//! Frontend bindings to the hosted service, reached through the
//! `window.__WORKOUT_BACKEND__` object the host page installs:
//! - `invoke(cmd, args)` returns a promise; rejections carry `{code, message}`
//! - `onAuthStateChanged(cb)` / `watchItems(ownerId, cb)` push updates and
//!   return an unsubscribe function

mod auth;
mod items;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use workout_core::{AuthError, RemoteError};

/// Global the host page installs
pub const BACKEND_GLOBAL: &str = "__WORKOUT_BACKEND__";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__WORKOUT_BACKEND__"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "__WORKOUT_BACKEND__"], js_name = onAuthStateChanged)]
    fn bridge_on_auth_state_changed(callback: &Closure<dyn Fn(JsValue)>) -> js_sys::Function;

    #[wasm_bindgen(js_namespace = ["window", "__WORKOUT_BACKEND__"], js_name = watchItems)]
    fn bridge_watch_items(owner_id: &str, callback: &Closure<dyn Fn(JsValue)>) -> js_sys::Function;
}

pub fn bridge_available() -> bool {
    web_sys::window()
        .and_then(|window| js_sys::Reflect::get(&window, &JsValue::from_str(BACKEND_GLOBAL)).ok())
        .is_some_and(|value| value.is_object())
}

/// Hosted auth + document store behind the JS bridge
#[derive(Debug, Default, Clone, Copy)]
pub struct BridgeStore;

impl BridgeStore {
    pub fn new() -> Self {
        Self
    }
}

/// Rejection value of a bridge call
#[derive(Debug, Clone, PartialEq, Eq)]
struct BridgeError {
    code: String,
    message: String,
}

impl BridgeError {
    fn local(message: impl Into<String>) -> Self {
        Self {
            code: String::new(),
            message: message.into(),
        }
    }

    fn from_js(value: &JsValue) -> Self {
        let field = |name: &str| {
            js_sys::Reflect::get(value, &JsValue::from_str(name))
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default()
        };
        let (code, message) = (field("code"), field("message"));
        if code.is_empty() && message.is_empty() {
            return Self::local(value.as_string().unwrap_or_else(|| format!("{:?}", value)));
        }
        Self { code, message }
    }
}

impl From<BridgeError> for AuthError {
    fn from(err: BridgeError) -> Self {
        AuthError::from_code(&err.code, &err.message)
    }
}

impl From<BridgeError> for RemoteError {
    fn from(err: BridgeError) -> Self {
        RemoteError::from_code(&err.code, &err.message)
    }
}

async fn call<A, R>(cmd: &str, args: &A) -> Result<R, BridgeError>
where
    A: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let js_args = serde_wasm_bindgen::to_value(args).map_err(|e| BridgeError::local(e.to_string()))?;
    let result = invoke(cmd, js_args)
        .await
        .map_err(|e| BridgeError::from_js(&e))?;
    serde_wasm_bindgen::from_value(result).map_err(|e| BridgeError::local(format!("{}: {}", cmd, e)))
}

/// Calls an unsubscribe function handed back by the bridge.
fn release(unsubscribe: &js_sys::Function) {
    if let Err(e) = unsubscribe.call0(&JsValue::NULL) {
        log::warn!("[Bridge] unsubscribe failed: {:?}", e);
    }
}
