//! Auth Commands
//!
//! `AuthService` over the bridge.

use async_trait::async_trait;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use workout_core::store::AuthListener;
use workout_core::{AuthError, AuthService, Identity, Subscription};

use super::{bridge_on_auth_state_changed, call, release, BridgeStore};

#[derive(Serialize)]
struct CredentialArgs<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct NoArgs {}

#[async_trait(?Send)]
impl AuthService for BridgeStore {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        Ok(call("sign_in", &CredentialArgs { email, password }).await?)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        Ok(call("sign_up", &CredentialArgs { email, password }).await?)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(call("sign_out", &NoArgs {}).await?)
    }

    fn on_auth_state_changed(&self, listener: AuthListener) -> Subscription {
        let callback = Closure::<dyn Fn(JsValue)>::new(move |value: JsValue| {
            let identity = if value.is_null() || value.is_undefined() {
                None
            } else {
                // An unreadable user is treated as signed out
                serde_wasm_bindgen::from_value::<Identity>(value)
                    .inspect_err(|e| log::warn!("[Bridge] unreadable auth state: {}", e))
                    .ok()
            };
            listener(identity);
        });
        let unsubscribe = bridge_on_auth_state_changed(&callback);

        Subscription::new(move || {
            release(&unsubscribe);
            drop(callback);
        })
    }
}
