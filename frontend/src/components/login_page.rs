use shared::permissions::landing_section;
use shared::validation::validate_login;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_session::use_app_context;
use crate::route::Route;
use crate::services::logging::Logger;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let ctx = use_app_context();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let is_submitting = use_state(|| false);

    let on_email_input = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let ctx = ctx.clone();
        let email = email.clone();
        let password = password.clone();
        let is_submitting = is_submitting.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_submitting {
                return;
            }

            if let Err(errors) = validate_login(&email, &password) {
                if let Some(message) = errors.first_message() {
                    ctx.toast.error.emit(message.to_string());
                }
                return;
            }

            is_submitting.set(true);
            let ctx = ctx.clone();
            let email = (*email).clone();
            let password = (*password).clone();
            let is_submitting = is_submitting.clone();

            spawn_local(async move {
                match ctx.api.login(&email, &password).await {
                    Ok(outcome) => {
                        Logger::info_with_component(
                            "login",
                            &format!("Signed in as {}", outcome.user.email),
                        );
                        let landing = landing_section(outcome.user.role());
                        let greeting = outcome
                            .message
                            .unwrap_or_else(|| "Login successful".to_string());
                        ctx.toast.success.emit(greeting);
                        ctx.session_actions.login.emit(outcome.user);
                        ctx.navigate.emit(Route::Section(landing));
                    }
                    Err(e) => {
                        Logger::warn_with_component("login", &format!("Login failed: {}", e));
                        ctx.toast.error.emit(e.user_message());
                    }
                }
                is_submitting.set(false);
            });
        })
    };

    let on_forgot = {
        let navigate = ctx.navigate.clone();
        Callback::from(move |_: MouseEvent| navigate.emit(Route::ForgotPassword))
    };

    html! {
        <div class="auth-page">
            <form class="auth-card" onsubmit={on_submit}>
                <h2 class="auth-title">{"Admin Login"}</h2>

                <div class="form-group">
                    <label for="login-email">{"Email"}</label>
                    <input
                        id="login-email"
                        type="email"
                        placeholder="Enter your email"
                        value={(*email).clone()}
                        oninput={on_email_input}
                        disabled={*is_submitting}
                        autofocus=true
                    />
                </div>

                <div class="form-group">
                    <label for="login-password">{"Password"}</label>
                    <input
                        id="login-password"
                        type="password"
                        placeholder="Enter your password"
                        value={(*password).clone()}
                        oninput={on_password_input}
                        disabled={*is_submitting}
                    />
                </div>

                <button type="submit" class="btn btn-primary" disabled={*is_submitting}>
                    {if *is_submitting { "Signing in..." } else { "Sign In" }}
                </button>

                <button type="button" class="link-button" onclick={on_forgot}>
                    {"Forgot password?"}
                </button>
            </form>
        </div>
    }
}
