//! Register Form Component
//!
//! Account creation with password confirmation.

use leptos::prelude::*;
use leptos::task::spawn_local;
use workout_core::auth::{self, RegistrationForm};
use workout_core::Route;

use crate::context::use_app_context;
use crate::messages::auth_message;

#[component]
pub fn RegisterForm() -> impl IntoView {
    let ctx = use_app_context();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = RegistrationForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm: confirm.get_untracked(),
        };
        set_error.set(None);

        // Checked here as well so a mismatch never shows the loading state
        if let Err(err) = form.validate() {
            set_error.set(Some(auth_message(&err)));
            return;
        }

        set_loading.set(true);
        spawn_local(async move {
            let service = ctx.auth();
            match auth::register(service.as_ref(), &form).await {
                Ok(_) => ctx.navigate(Route::Main),
                Err(err) => set_error.set(Some(auth_message(&err))),
            }
            set_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-card">
                <h2 class="login-title">"Criar Conta ✨"</h2>
                <p class="login-subtitle">"Preencha os dados abaixo"</p>

                <form on:submit=submit class="login-form">
                    <input
                        type="email"
                        name="email"
                        placeholder="E-mail"
                        aria-label="E-mail"
                        required
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    <input
                        type="password"
                        name="password"
                        placeholder="Senha"
                        aria-label="Senha"
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    <input
                        type="password"
                        name="confirm"
                        placeholder="Confirmar senha"
                        aria-label="Confirmar senha"
                        required
                        prop:value=move || confirm.get()
                        on:input=move |ev| set_confirm.set(event_target_value(&ev))
                    />
                    <button type="submit" disabled=move || loading.get()>
                        {move || if loading.get() { "Registrando..." } else { "Registrar" }}
                    </button>
                </form>

                {move || error.get().map(|msg| view! { <p class="error-text">{msg}</p> })}

                <p class="register-text">
                    "Já tem conta? "
                    <a
                        href=Route::Login.path()
                        on:click=move |ev| {
                            ev.prevent_default();
                            ctx.navigate(Route::Login);
                        }
                    >
                        "Entrar"
                    </a>
                </p>
            </div>
        </div>
    }
}
