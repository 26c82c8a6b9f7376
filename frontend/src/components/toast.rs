use gloo::timers::callback::Timeout;
use shared::notification::DEFAULT_TOAST_TIMEOUT_MS;
use shared::Notification;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub notification: Notification,
    #[prop_or(DEFAULT_TOAST_TIMEOUT_MS)]
    pub timeout_ms: u32,
    pub on_close: Callback<()>,
}

/// Closes itself after `timeout_ms`; the timer restarts for every new
/// notification id and is cancelled when the toast goes away.
#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    use_effect_with(props.notification.id, {
        let on_close = props.on_close.clone();
        let timeout_ms = props.timeout_ms;
        move |_| {
            let timer = Timeout::new(timeout_ms, move || on_close.emit(()));
            move || drop(timer)
        }
    });

    let on_click_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class={props.notification.css_class()} role="alert">
            <span class="toast-message">{&props.notification.message}</span>
            <button type="button" class="toast-close" aria-label="Close" onclick={on_click_close}>
                {"×"}
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastHostProps {
    pub current: Option<Notification>,
    #[prop_or(DEFAULT_TOAST_TIMEOUT_MS)]
    pub timeout_ms: u32,
    pub on_close: Callback<()>,
}

#[function_component(ToastHost)]
pub fn toast_host(props: &ToastHostProps) -> Html {
    html! {
        <div class="toast-host">
            if let Some(notification) = props.current.clone() {
                <Toast
                    key={notification.id}
                    notification={notification.clone()}
                    timeout_ms={props.timeout_ms}
                    on_close={props.on_close.clone()}
                />
            }
        </div>
    }
}
