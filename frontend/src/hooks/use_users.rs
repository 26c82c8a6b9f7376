use std::rc::Rc;

use shared::gateway::UserInfoUpdate;
use shared::User;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_toast::ToastActions;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct UsersState {
    pub users: Rc<Vec<User>>,
    pub loading: bool,
    /// Account whose status toggle is in flight
    pub updating_id: Option<String>,
    pub saving: bool,
}

#[derive(Clone, PartialEq)]
pub struct UseUsersActions {
    pub refresh: Callback<()>,
    pub toggle_status: Callback<User>,
    /// Save an edited account; the callback runs once the gateway accepts it
    pub save: Callback<(UserInfoUpdate, Callback<()>)>,
}

pub struct UseUsersResult {
    pub state: UsersState,
    pub actions: UseUsersActions,
}

/// Latest list plus the id of the row whose toggle is in flight.
type ToggleDeps = (Rc<Vec<User>>, Option<String>);

#[hook]
pub fn use_users(api_client: &ApiClient, toast: &ToastActions) -> UseUsersResult {
    let users = use_state(|| Rc::new(Vec::<User>::new()));
    let loading = use_state(|| true);
    let updating_id = use_state(|| Option::<String>::None);
    let saving = use_state(|| false);

    let refresh = {
        let api_client = api_client.clone();
        let toast = toast.clone();
        let users = users.clone();
        let loading = loading.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let toast = toast.clone();
            let users = users.clone();
            let loading = loading.clone();

            spawn_local(async move {
                loading.set(true);
                match api_client.list_users().await {
                    Ok(list) => users.set(Rc::new(list)),
                    Err(e) => {
                        Logger::error_with_component(
                            "use_users",
                            &format!("Failed to fetch users: {}", e),
                        );
                        toast.error.emit(e.user_message());
                    }
                }
                loading.set(false);
            });
        })
    };

    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    // Flip the row at once, put the old list back if the gateway refuses.
    let toggle_status = {
        let api_client = api_client.clone();
        let toast = toast.clone();
        let users = users.clone();
        let updating_id = updating_id.clone();

        let deps = ((*users).clone(), (*updating_id).clone());
        use_callback(deps, move |user: User, (current, in_flight): &ToggleDeps| {
            if in_flight.is_some() {
                return;
            }
            let previous = current.clone();
            let next_active = !user.is_active;
            let flipped: Vec<User> = previous
                .iter()
                .map(|u| {
                    let mut u = u.clone();
                    if u.user_id == user.user_id {
                        u.is_active = next_active;
                    }
                    u
                })
                .collect();
            users.set(Rc::new(flipped));
            updating_id.set(Some(user.user_id.clone()));

            let api_client = api_client.clone();
            let toast = toast.clone();
            let users = users.clone();
            let updating_id = updating_id.clone();
            spawn_local(async move {
                match api_client.update_user_status(&user.user_id, next_active).await {
                    Ok(message) => toast.success.emit(message),
                    Err(e) => {
                        Logger::warn_with_component(
                            "use_users",
                            &format!("Status update for {} failed: {}", user.user_id, e),
                        );
                        users.set(previous);
                        toast.error.emit(e.user_message());
                    }
                }
                updating_id.set(None);
            });
        })
    };

    let save = {
        let api_client = api_client.clone();
        let toast = toast.clone();
        let saving = saving.clone();
        let refresh = refresh.clone();

        use_callback((), move |(update, on_saved): (UserInfoUpdate, Callback<()>), _| {
            let api_client = api_client.clone();
            let toast = toast.clone();
            let saving = saving.clone();
            let refresh = refresh.clone();

            spawn_local(async move {
                saving.set(true);
                match api_client.update_user_info(&update).await {
                    Ok(()) => {
                        toast.success.emit("User updated successfully".to_string());
                        on_saved.emit(());
                        refresh.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "use_users",
                            &format!("Failed to update user: {}", e),
                        );
                        toast.error.emit(e.user_message_or("Failed to update user"));
                    }
                }
                saving.set(false);
            });
        })
    };

    UseUsersResult {
        state: UsersState {
            users: (*users).clone(),
            loading: *loading,
            updating_id: (*updating_id).clone(),
            saving: *saving,
        },
        actions: UseUsersActions {
            refresh,
            toggle_status,
            save,
        },
    }
}
