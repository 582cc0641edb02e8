//! Account registration page.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;

use crate::pages::login::looks_like_email;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
struct SignupInput {
    name: String,
    email: String,
    password: String,
}

fn validate_signup_input(name: &str, email: &str, password: &str, confirm: &str) -> Result<SignupInput, &'static str> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err("Completa todos los campos.");
    }
    if !looks_like_email(email) {
        return Err("El correo no es válido.");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("La contraseña debe tener al menos 8 caracteres.");
    }
    if password != confirm {
        return Err("Las contraseñas no coinciden.");
    }
    Ok(SignupInput { name: name.to_owned(), email: email.to_owned(), password: password.to_owned() })
}

#[component]
pub fn SignupPage() -> impl IntoView {
    #[cfg(feature = "hydrate")]
    let toasts = expect_context::<RwSignal<crate::state::toast::ToastState>>();
    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let input = match validate_signup_input(&name.get(), &email.get(), &password.get(), &confirm.get()) {
            Ok(input) => input,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Creando cuenta...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::signup(&input.name, &input.email, &input.password).await {
                    Ok(_) => {
                        crate::state::toast::notify(
                            toasts,
                            crate::state::toast::ToastKind::Success,
                            "Cuenta creada. Ya puedes iniciar sesión.",
                        );
                        navigate(crate::util::auth::LOGIN_PATH, leptos_router::NavigateOptions::default());
                    }
                    Err(e) => {
                        info.set(e.message);
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = input;
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Crear cuenta"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Nombre"
                        autocomplete="name"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="email"
                        placeholder="usuario@empresa.com"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Contraseña"
                        autocomplete="new-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Repite la contraseña"
                        autocomplete="new-password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Registrarme"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-divider"></div>
                <p class="login-card__subtitle">
                    "¿Ya tienes cuenta? "
                    <a href="/login">"Inicia sesión"</a>
                </p>
            </div>
        </div>
    }
}
