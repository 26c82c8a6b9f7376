use shared::gateway::UserInfoUpdate;
use shared::validation::{validate_user_edit, FormErrors};
use shared::{Role, User};
use web_sys::{HtmlInputElement, HtmlSelectElement, MouseEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct EditUserModalProps {
    pub user: User,
    pub saving: bool,
    pub on_save: Callback<(UserInfoUpdate, Callback<()>)>,
    pub on_close: Callback<()>,
}

#[function_component(EditUserModal)]
pub fn edit_user_modal(props: &EditUserModalProps) -> Html {
    let name = use_state(|| props.user.name.clone());
    let email = use_state(|| props.user.email.clone());
    let role_id = use_state(|| props.user.role_id);
    let is_active = use_state(|| props.user.is_active);
    let errors = use_state(FormErrors::new);

    let on_name_input = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
        })
    };

    let on_email_input = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let on_role_change = {
        let role_id = role_id.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(id) = select.value().parse::<i64>() {
                role_id.set(id);
            }
        })
    };

    let on_status_change = {
        let is_active = is_active.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            is_active.set(input.checked());
        })
    };

    let on_submit = {
        let user_id = props.user.user_id.clone();
        let name = name.clone();
        let email = email.clone();
        let role_id = role_id.clone();
        let is_active = is_active.clone();
        let errors = errors.clone();
        let on_save = props.on_save.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Err(found) = validate_user_edit(&name, &email) {
                errors.set(found);
                return;
            }
            errors.set(FormErrors::new());

            let update = UserInfoUpdate {
                user_id: user_id.clone(),
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                role_id: *role_id,
                is_active: *is_active,
            };
            on_save.emit((update, on_close.clone()));
        })
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal" onclick={on_modal_click}>
                <h3 class="modal-title">{"Edit User"}</h3>
                <form class="modal-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="edit-user-name">{"Name *"}</label>
                        <input
                            id="edit-user-name"
                            type="text"
                            placeholder="Enter name"
                            value={(*name).clone()}
                            oninput={on_name_input}
                            disabled={props.saving}
                        />
                        if let Some(error) = errors.get("Name") {
                            <p class="field-error">{error}</p>
                        }
                    </div>

                    <div class="form-group">
                        <label for="edit-user-email">{"Email *"}</label>
                        <input
                            id="edit-user-email"
                            type="email"
                            placeholder="Enter email"
                            value={(*email).clone()}
                            oninput={on_email_input}
                            disabled={props.saving}
                        />
                        if let Some(error) = errors.get("Email") {
                            <p class="field-error">{error}</p>
                        }
                    </div>

                    <div class="form-group">
                        <label for="edit-user-role">{"Role *"}</label>
                        <select id="edit-user-role" onchange={on_role_change} disabled={props.saving}>
                            {for Role::ALL.iter().map(|role| html! {
                                <option value={role.id().to_string()} selected={role.id() == *role_id}>
                                    {role.label()}
                                </option>
                            })}
                        </select>
                    </div>

                    <div class="form-group">
                        <label class="switch">
                            <input
                                type="checkbox"
                                checked={*is_active}
                                onchange={on_status_change}
                                disabled={props.saving}
                            />
                            <span class="slider"></span>
                        </label>
                        <span class={if *is_active { "status active" } else { "status inactive" }}>
                            {if *is_active { "Active" } else { "Inactive" }}
                        </span>
                    </div>

                    <div class="modal-buttons">
                        <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={props.saving}>
                            {"Cancel"}
                        </button>
                        <button type="submit" class="btn btn-primary" disabled={props.saving}>
                            {if props.saving { "Saving..." } else { "Save Changes" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
