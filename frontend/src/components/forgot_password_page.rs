use shared::validation::validate_forgot_password;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_session::use_app_context;
use crate::route::Route;
use crate::services::logging::Logger;

#[function_component(ForgotPasswordPage)]
pub fn forgot_password_page() -> Html {
    let ctx = use_app_context();
    let email = use_state(String::new);
    let email_error = use_state(|| Option::<String>::None);
    let is_submitting = use_state(|| false);

    let on_email_input = {
        let email = email.clone();
        let email_error = email_error.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
            email_error.set(None);
        })
    };

    let on_submit = {
        let ctx = ctx.clone();
        let email = email.clone();
        let email_error = email_error.clone();
        let is_submitting = is_submitting.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_submitting {
                return;
            }
            if let Err(errors) = validate_forgot_password(&email) {
                email_error.set(errors.get("email").map(str::to_string));
                return;
            }

            is_submitting.set(true);
            let ctx = ctx.clone();
            let email_value = (*email).clone();
            let email = email.clone();
            let is_submitting = is_submitting.clone();

            spawn_local(async move {
                match ctx.api.forgot_password(&email_value).await {
                    Ok(message) => {
                        ctx.toast.success.emit(message);
                        email.set(String::new());
                    }
                    Err(e) => {
                        Logger::warn_with_component(
                            "forgot_password",
                            &format!("Request failed: {}", e),
                        );
                        ctx.toast.error.emit(e.user_message());
                    }
                }
                is_submitting.set(false);
            });
        })
    };

    let on_back = {
        let navigate = ctx.navigate.clone();
        Callback::from(move |_: MouseEvent| navigate.emit(Route::Login))
    };

    html! {
        <div class="auth-page">
            <form class="auth-card" onsubmit={on_submit}>
                <h2 class="auth-title">{"Forgot Password"}</h2>
                <p class="auth-subtitle">{"Enter your email and we will send you a reset link."}</p>

                <div class="form-group">
                    <label for="forgot-email">{"Email"}</label>
                    <input
                        id="forgot-email"
                        type="email"
                        placeholder="Enter your email"
                        value={(*email).clone()}
                        oninput={on_email_input}
                        disabled={*is_submitting}
                    />
                    if let Some(error) = (*email_error).clone() {
                        <p class="field-error">{error}</p>
                    }
                </div>

                <button type="submit" class="btn btn-primary" disabled={*is_submitting}>
                    {if *is_submitting { "Sending..." } else { "Send Reset Link" }}
                </button>

                <button type="button" class="link-button" onclick={on_back}>
                    {"Back to login"}
                </button>
            </form>
        </div>
    }
}
