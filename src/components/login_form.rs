//! Login Form Component
//!
//! Email/password sign-in; on success the gate moves the app to the list.

use leptos::prelude::*;
use leptos::task::spawn_local;
use workout_core::auth::{self, LoginForm as Credentials};
use workout_core::Route;

use crate::context::use_app_context;
use crate::messages::auth_message;

#[component]
pub fn LoginForm() -> impl IntoView {
    let ctx = use_app_context();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = Credentials {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            let service = ctx.auth();
            match auth::login(service.as_ref(), &form).await {
                Ok(_) => ctx.navigate(Route::Main),
                Err(err) => set_error.set(Some(auth_message(&err))),
            }
            set_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-card">
                <h2 class="login-title">"Bem-vindo 👋"</h2>
                <p class="login-subtitle">"Entre com sua conta"</p>

                <form on:submit=submit class="login-form">
                    <input
                        type="email"
                        placeholder="E-mail"
                        required
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="Senha"
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    <button type="submit" disabled=move || loading.get()>
                        {move || if loading.get() { "Entrando..." } else { "Entrar" }}
                    </button>
                </form>

                {move || error.get().map(|msg| view! { <p class="error-text">{msg}</p> })}

                <p class="register-text">
                    "Não tem conta? "
                    <a
                        href=Route::Register.path()
                        on:click=move |ev| {
                            ev.prevent_default();
                            ctx.navigate(Route::Register);
                        }
                    >
                        "Registrar"
                    </a>
                </p>
            </div>
        </div>
    }
}
