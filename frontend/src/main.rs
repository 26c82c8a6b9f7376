mod components;
mod hooks;
mod route;
mod services;

use std::rc::Rc;

use gloo::events::EventListener;
use shared::{PortalConfig, Section};
use yew::prelude::*;

use components::dashboard::Dashboard;
use components::forgot_password_page::ForgotPasswordPage;
use components::home::Home;
use components::login_page::LoginPage;
use components::navigation::Navigation;
use components::reset_password_page::ResetPasswordPage;
use components::send_mail::SendMail;
use components::services_manager::ServicesManager;
use components::toast::ToastHost;
use components::users::ManageUsers;
use hooks::use_session::{use_session, AppContext};
use hooks::use_toast::use_toast;
use route::{guard, Route};
use services::api::ApiClient;
use services::logging::{self, Logger};

#[derive(Properties, PartialEq)]
struct AppProps {
    config: Rc<PortalConfig>,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let session = use_session();
    let toast = use_toast();
    let route = use_state(Route::current);
    let api = use_memo(props.config.clone(), |config| ApiClient::new(config.clone()));

    let navigate = {
        let route = route.clone();
        use_callback((), move |next: Route, _| {
            next.push();
            route.set(next);
        })
    };

    // Back and forward buttons change the address bar without a push
    {
        let route = route.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|window| {
                EventListener::new(&window, "popstate", move |_| route.set(Route::current()))
            });
            move || drop(listener)
        });
    }

    // Keep the address bar in line with what the guard lets us render
    let resolved = guard(&route, &session.session);
    {
        let navigate = navigate.clone();
        use_effect_with((resolved.clone(), (*route).clone()), move |(resolved, requested)| {
            if resolved != requested {
                Logger::debug_with_component(
                    "app",
                    &format!("Redirecting {} to {}", requested.path(), resolved.path()),
                );
                navigate.emit(resolved.clone());
            }
            || ()
        });
    }

    let context = AppContext {
        session: session.session.clone(),
        api: (*api).clone(),
        config: props.config.clone(),
        session_actions: session.actions.clone(),
        toast: toast.actions.clone(),
        navigate,
    };

    let content = match &resolved {
        Route::Login => html! { <LoginPage /> },
        Route::ForgotPassword => html! { <ForgotPasswordPage /> },
        Route::ResetPassword { token } => html! { <ResetPasswordPage token={token.clone()} /> },
        Route::Section(section) => html! {
            <>
                <Navigation active={*section} />
                <main class="container">
                    {section_view(*section)}
                </main>
            </>
        },
    };

    html! {
        <ContextProvider<AppContext> context={context}>
            <div class="app">
                {content}
                <ToastHost
                    current={toast.current.clone()}
                    timeout_ms={props.config.toast_timeout_ms}
                    on_close={toast.actions.dismiss.clone()}
                />
            </div>
        </ContextProvider<AppContext>>
    }
}

fn section_view(section: Section) -> Html {
    match section {
        Section::Home => html! { <Home /> },
        Section::ManageServices => html! { <ServicesManager /> },
        Section::Dashboard => html! { <Dashboard /> },
        Section::ManageUsers => html! { <ManageUsers /> },
        Section::SendMail => html! { <SendMail /> },
    }
}

fn main() {
    let config = services::config::load();
    logging::init(&config);
    Logger::info_with_component("app", "Starting admin portal");
    yew::Renderer::<App>::with_props(AppProps {
        config: Rc::new(config),
    })
    .render();
}
