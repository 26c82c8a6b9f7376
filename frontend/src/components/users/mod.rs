mod edit_user_modal;

use shared::{format_display_date, User};
use yew::prelude::*;

use crate::components::data_table::{Column, DataTable};
use crate::hooks::use_session::use_app_context;
use crate::hooks::use_users::use_users;
use edit_user_modal::EditUserModal;

#[function_component(ManageUsers)]
pub fn manage_users() -> Html {
    let ctx = use_app_context();
    let users = use_users(&ctx.api, &ctx.toast);
    let editing = use_state(|| Option::<User>::None);

    let columns = vec![
        Column::new("Name", "Name"),
        Column::new("Email", "Email"),
        Column::new("RoleId", "Role"),
        Column::new("CreatedAt", "Created"),
        Column::fixed("IsActive", "Status"),
    ];

    let render_row = {
        let editing = editing.clone();
        let toggle_status = users.actions.toggle_status.clone();
        let updating_id = users.state.updating_id.clone();

        Callback::from(move |user: User| {
            let on_edit = {
                let editing = editing.clone();
                let user = user.clone();
                Callback::from(move |_: MouseEvent| editing.set(Some(user.clone())))
            };
            let on_toggle = {
                let toggle_status = toggle_status.clone();
                let user = user.clone();
                Callback::from(move |_: Event| toggle_status.emit(user.clone()))
            };
            let is_updating = updating_id.as_deref() == Some(user.user_id.as_str());
            let status_class = if user.is_active { "status active" } else { "status inactive" };

            html! {
                <tr key={user.user_id.clone()}>
                    <td>
                        <button type="button" class="link-button" onclick={on_edit}>{&user.name}</button>
                    </td>
                    <td>{&user.email}</td>
                    <td><span class="role-badge">{user.role_name()}</span></td>
                    <td>{format_display_date(&user.created_at)}</td>
                    <td>
                        <label class="switch">
                            <input
                                type="checkbox"
                                checked={user.is_active}
                                disabled={updating_id.is_some()}
                                onchange={on_toggle}
                            />
                            <span class="slider"></span>
                        </label>
                        <span class={status_class}>
                            {if is_updating { "Updating..." } else { user.status_label() }}
                        </span>
                    </td>
                </tr>
            }
        })
    };

    let on_close_modal = {
        let editing = editing.clone();
        Callback::from(move |_: ()| editing.set(None))
    };

    html! {
        <section class="manage-users">
            <h2>{"Manage Users"}</h2>
            <DataTable<User>
                records={users.state.users.clone()}
                columns={columns}
                render_row={render_row}
                page_size={ctx.config.page_size}
                loading={users.state.loading}
                empty_message="No users found"
            />
            if let Some(user) = (*editing).clone() {
                <EditUserModal
                    user={user}
                    saving={users.state.saving}
                    on_save={users.actions.save.clone()}
                    on_close={on_close_modal}
                />
            }
        </section>
    }
}
