use shared::validation::{validate_reset_password, FormErrors, PasswordStrength};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_session::use_app_context;
use crate::route::Route;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct ResetPasswordPageProps {
    /// Token from the emailed link; empty when the link had none
    pub token: AttrValue,
}

#[function_component(ResetPasswordPage)]
pub fn reset_password_page(props: &ResetPasswordPageProps) -> Html {
    let ctx = use_app_context();
    let password = use_state(String::new);
    let confirm = use_state(String::new);
    let errors = use_state(FormErrors::new);
    let is_submitting = use_state(|| false);

    let strength = PasswordStrength::of(&password);

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_confirm_input = {
        let confirm = confirm.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            confirm.set(input.value());
        })
    };

    let on_submit = {
        let ctx = ctx.clone();
        let token = props.token.to_string();
        let password = password.clone();
        let confirm = confirm.clone();
        let errors = errors.clone();
        let is_submitting = is_submitting.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_submitting {
                return;
            }
            if let Err(found) = validate_reset_password(Some(&token), &password, &confirm) {
                if let Some(message) = found.get("token") {
                    ctx.toast.error.emit(message.to_string());
                }
                errors.set(found);
                return;
            }
            errors.set(FormErrors::new());

            is_submitting.set(true);
            let ctx = ctx.clone();
            let token = token.clone();
            let new_password = (*password).clone();
            let is_submitting = is_submitting.clone();

            spawn_local(async move {
                match ctx.api.reset_password(&token, &new_password).await {
                    Ok(message) => {
                        ctx.toast.success.emit(message);
                        ctx.navigate.emit(Route::Login);
                    }
                    Err(e) => {
                        Logger::warn_with_component(
                            "reset_password",
                            &format!("Reset failed: {}", e),
                        );
                        ctx.toast.error.emit(e.user_message());
                    }
                }
                is_submitting.set(false);
            });
        })
    };

    html! {
        <div class="auth-page">
            <form class="auth-card" onsubmit={on_submit}>
                <h2 class="auth-title">{"Reset Password"}</h2>

                <div class="form-group">
                    <label for="reset-password">{"New Password"}</label>
                    <input
                        id="reset-password"
                        type="password"
                        placeholder="Enter a new password"
                        value={(*password).clone()}
                        oninput={on_password_input}
                        disabled={*is_submitting}
                    />
                    if !password.is_empty() {
                        <div class="strength-meter">
                            <div
                                class={classes!("strength-bar", strength.css_class())}
                                style={format!("width: {}%", u32::from(strength.score()) * 20)}
                            />
                            <span class="strength-label">{strength.label()}</span>
                        </div>
                    }
                    if let Some(error) = errors.get("password") {
                        <p class="field-error">{error}</p>
                    }
                </div>

                <div class="form-group">
                    <label for="reset-confirm">{"Confirm Password"}</label>
                    <input
                        id="reset-confirm"
                        type="password"
                        placeholder="Re-enter the new password"
                        value={(*confirm).clone()}
                        oninput={on_confirm_input}
                        disabled={*is_submitting}
                    />
                    if let Some(error) = errors.get("confirmPassword") {
                        <p class="field-error">{error}</p>
                    }
                </div>

                <button type="submit" class="btn btn-primary" disabled={*is_submitting}>
                    {if *is_submitting { "Updating..." } else { "Update Password" }}
                </button>
            </form>
        </div>
    }
}
