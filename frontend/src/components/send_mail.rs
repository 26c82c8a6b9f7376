use shared::gateway::EmailRequest;
use shared::validation::{validate_email_draft, EmailDraft};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::hooks::use_session::use_app_context;
use crate::services::logging::Logger;

const SEND_FAILED: &str = "Failed to send email. Please try again.";

#[function_component(SendMail)]
pub fn send_mail() -> Html {
    let ctx = use_app_context();
    let sender = ctx.config.sender_email.clone();
    let draft = use_state(|| EmailDraft::with_sender(sender.clone()));
    let is_sending = use_state(|| false);

    let update = |apply: fn(&mut EmailDraft, String)| {
        let draft = draft.clone();
        Callback::from(move |value: String| {
            let mut next = (*draft).clone();
            apply(&mut next, value);
            draft.set(next);
        })
    };
    let set_to = update(|d, v| d.to = v);
    let set_from = update(|d, v| d.from = v);
    let set_subject = update(|d, v| d.subject = v);
    let set_body = update(|d, v| d.body_html = v);

    let input_to = |setter: Callback<String>| {
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            setter.emit(input.value());
        })
    };

    let on_body_input = Callback::from(move |e: InputEvent| {
        let area: HtmlTextAreaElement = e.target_unchecked_into();
        set_body.emit(area.value());
    });

    let on_submit = {
        let ctx = ctx.clone();
        let draft = draft.clone();
        let is_sending = is_sending.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_sending {
                return;
            }
            if let Err(errors) = validate_email_draft(&draft) {
                if let Some(message) = errors.first_message() {
                    ctx.toast.error.emit(message.to_string());
                }
                return;
            }

            let request = EmailRequest::from_draft(&draft, &ctx.config);
            is_sending.set(true);
            let ctx = ctx.clone();
            let draft = draft.clone();
            let is_sending = is_sending.clone();

            spawn_local(async move {
                match ctx.api.send_email(&request).await {
                    Ok(()) => {
                        Logger::info_with_component(
                            "send_mail",
                            &format!("Email sent to {}", request.recipient),
                        );
                        ctx.toast.success.emit("Email sent successfully!".to_string());
                        draft.set(EmailDraft::with_sender(ctx.config.sender_email.clone()));
                    }
                    Err(e) => {
                        Logger::error_with_component("send_mail", &format!("Send failed: {}", e));
                        ctx.toast.error.emit(SEND_FAILED.to_string());
                    }
                }
                is_sending.set(false);
            });
        })
    };

    html! {
        <section class="send-mail">
            <h2>{"Send Email"}</h2>
            <form class="mail-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="mail-to">{"To *"}</label>
                    <input
                        id="mail-to"
                        type="email"
                        placeholder="recipient@example.com"
                        value={draft.to.clone()}
                        oninput={input_to(set_to)}
                        disabled={*is_sending}
                    />
                </div>

                <div class="form-group">
                    <label for="mail-from">{"From *"}</label>
                    <input
                        id="mail-from"
                        type="email"
                        value={draft.from.clone()}
                        oninput={input_to(set_from)}
                        disabled={*is_sending}
                    />
                </div>

                <div class="form-group">
                    <label for="mail-subject">{"Subject *"}</label>
                    <input
                        id="mail-subject"
                        type="text"
                        placeholder="Enter email subject"
                        value={draft.subject.clone()}
                        oninput={input_to(set_subject)}
                        disabled={*is_sending}
                    />
                </div>

                <div class="form-group">
                    <label for="mail-body">{"Message *"}</label>
                    <textarea
                        id="mail-body"
                        rows="12"
                        placeholder="Enter your message here... HTML is allowed."
                        value={draft.body_html.clone()}
                        oninput={on_body_input}
                        disabled={*is_sending}
                    />
                </div>

                <button type="submit" class="btn btn-primary" disabled={*is_sending}>
                    {if *is_sending { "Sending..." } else { "Send Email" }}
                </button>
            </form>
        </section>
    }
}
