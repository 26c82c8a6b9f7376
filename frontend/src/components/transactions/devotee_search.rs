use std::rc::Rc;

use shared::{suggest_devotees, Devotee};
use web_sys::HtmlInputElement;
use yew::prelude::*;

const MAX_SUGGESTIONS: usize = 8;

#[derive(Properties, PartialEq)]
pub struct DevoteeSearchProps {
    pub devotees: Rc<Vec<Devotee>>,
    pub on_select: Callback<Devotee>,
    /// Fired with the typed text when it matches no known devotee
    #[prop_or_default]
    pub on_new_name: Option<Callback<String>>,
}

#[function_component(DevoteeSearch)]
pub fn devotee_search(props: &DevoteeSearchProps) -> Html {
    let query = use_state(String::new);
    let open = use_state(|| false);

    let suggestions: Vec<Devotee> = suggest_devotees(&props.devotees, &query, MAX_SUGGESTIONS)
        .into_iter()
        .cloned()
        .collect();

    let on_input = {
        let query = query.clone();
        let open = open.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            query.set(input.value());
            open.set(true);
        })
    };

    let on_keydown = {
        let query = query.clone();
        let open = open.clone();
        let no_match = suggestions.is_empty();
        let on_new_name = props.on_new_name.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() != "Enter" {
                return;
            }
            e.prevent_default();
            let typed = query.trim().to_string();
            if no_match && !typed.is_empty() {
                if let Some(on_new_name) = &on_new_name {
                    on_new_name.emit(typed);
                }
            }
            open.set(false);
        })
    };

    html! {
        <div class="devotee-search">
            <input
                type="text"
                class="search-input"
                placeholder="Search by devotee name or email"
                value={(*query).clone()}
                oninput={on_input}
                onkeydown={on_keydown}
            />
            if *open && !suggestions.is_empty() {
                <ul class="suggestions">
                    {for suggestions.into_iter().map(|devotee| {
                        let on_select = props.on_select.clone();
                        let query = query.clone();
                        let open = open.clone();
                        let label = if devotee.email.is_empty() {
                            devotee.name.clone()
                        } else {
                            format!("{} ({})", devotee.name, devotee.email)
                        };
                        let onclick = {
                            let devotee = devotee.clone();
                            Callback::from(move |_: MouseEvent| {
                                query.set(devotee.name.clone());
                                open.set(false);
                                on_select.emit(devotee.clone());
                            })
                        };
                        html! {
                            <li class="suggestion" {onclick}>{label}</li>
                        }
                    })}
                </ul>
            }
        </div>
    }
}
