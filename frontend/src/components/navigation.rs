use yew::prelude::*;

use crate::hooks::use_session::use_app_context;
use crate::route::Route;
use shared::Section;

#[derive(Properties, PartialEq)]
pub struct NavigationProps {
    pub active: Section,
}

/// Header bar: the sections this role may open, who is signed in, logout.
#[function_component(Navigation)]
pub fn navigation(props: &NavigationProps) -> Html {
    let ctx = use_app_context();
    let sections = ctx.session.visible_sections();
    let display_name = ctx
        .session
        .user()
        .map(|user| user.display_name().to_string())
        .unwrap_or_default();
    let role_label = ctx.session.role().map(|role| role.label()).unwrap_or_default();

    let on_logout = {
        let logout = ctx.session_actions.logout.clone();
        let navigate = ctx.navigate.clone();
        Callback::from(move |_: MouseEvent| {
            logout.emit(());
            navigate.emit(Route::Login);
        })
    };

    html! {
        <header class="header">
            <div class="container">
                <h1 class="portal-title">{"Temple Admin Portal"}</h1>
                <nav class="nav-links">
                    {for sections.into_iter().map(|section| {
                        let navigate = ctx.navigate.clone();
                        let onclick = Callback::from(move |_: MouseEvent| navigate.emit(Route::Section(section)));
                        let class = if section == props.active { "nav-link active" } else { "nav-link" };
                        html! {
                            <button type="button" {class} {onclick}>{section.label()}</button>
                        }
                    })}
                </nav>
                <div class="header-right">
                    <span class="user-name">{display_name}</span>
                    <span class="user-role">{role_label}</span>
                    <button type="button" class="btn btn-secondary logout-button" onclick={on_logout}>
                        {"Logout"}
                    </button>
                </div>
            </div>
        </header>
    }
}
