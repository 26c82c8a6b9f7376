use yew::prelude::*;

use crate::hooks::use_session::use_app_context;
use crate::route::Route;
use shared::Section;

#[function_component(Home)]
pub fn home() -> Html {
    let ctx = use_app_context();
    let name = ctx
        .session
        .user()
        .map(|user| user.display_name().to_string())
        .unwrap_or_default();

    // Shortcut cards for every other section this role can open
    let shortcuts: Vec<Section> = ctx
        .session
        .visible_sections()
        .into_iter()
        .filter(|section| *section != Section::Home)
        .collect();

    html! {
        <section class="home">
            <h2>{format!("Welcome, {}", name)}</h2>
            if shortcuts.is_empty() {
                <p class="home-note">{"There are no admin tools available for your account."}</p>
            } else {
                <div class="home-shortcuts">
                    {for shortcuts.into_iter().map(|section| {
                        let navigate = ctx.navigate.clone();
                        let onclick = Callback::from(move |_: MouseEvent| navigate.emit(Route::Section(section)));
                        html! {
                            <button type="button" class="home-card" {onclick}>{section.label()}</button>
                        }
                    })}
                </div>
            }
        </section>
    }
}
