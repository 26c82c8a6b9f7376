use std::rc::Rc;

use shared::Service;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_toast::ToastActions;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct ServicesState {
    pub services: Rc<Vec<Service>>,
    pub loading: bool,
    pub saving: bool,
    pub deleting: bool,
}

#[derive(Clone, PartialEq)]
pub struct UseServicesActions {
    pub refresh: Callback<()>,
    pub save: Callback<(Service, Callback<()>)>,
    pub delete: Callback<(Service, Callback<()>)>,
}

pub struct UseServicesResult {
    pub state: ServicesState,
    pub actions: UseServicesActions,
}

#[hook]
pub fn use_services(api_client: &ApiClient, toast: &ToastActions) -> UseServicesResult {
    let services = use_state(|| Rc::new(Vec::<Service>::new()));
    let loading = use_state(|| true);
    let saving = use_state(|| false);
    let deleting = use_state(|| false);

    let refresh = {
        let api_client = api_client.clone();
        let toast = toast.clone();
        let services = services.clone();
        let loading = loading.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let toast = toast.clone();
            let services = services.clone();
            let loading = loading.clone();

            spawn_local(async move {
                loading.set(true);
                match api_client.list_services().await {
                    Ok(list) => services.set(Rc::new(list)),
                    Err(e) => {
                        Logger::error_with_component(
                            "use_services",
                            &format!("Failed to fetch services: {}", e),
                        );
                        toast.error.emit(e.user_message_or("Failed to load services"));
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

    let save = {
        let api_client = api_client.clone();
        let toast = toast.clone();
        let saving = saving.clone();
        let refresh = refresh.clone();

        use_callback((), move |(service, on_saved): (Service, Callback<()>), _| {
            let api_client = api_client.clone();
            let toast = toast.clone();
            let saving = saving.clone();
            let refresh = refresh.clone();

            spawn_local(async move {
                saving.set(true);
                match api_client.save_service(&service).await {
                    Ok(()) => {
                        toast.success.emit("Service saved successfully".to_string());
                        on_saved.emit(());
                        refresh.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "use_services",
                            &format!("Failed to save service: {}", e),
                        );
                        toast.error.emit(e.user_message_or("Failed to save service"));
                    }
                }
                saving.set(false);
            });
        })
    };

    // The row disappears immediately and comes back if the delete fails.
    let delete = {
        let api_client = api_client.clone();
        let toast = toast.clone();
        let services = services.clone();
        let deleting = deleting.clone();

        use_callback(
            (*services).clone(),
            move |(service, on_done): (Service, Callback<()>), current: &Rc<Vec<Service>>| {
                let previous = current.clone();
                let remaining: Vec<Service> = previous
                    .iter()
                    .filter(|s| s.name != service.name)
                    .cloned()
                    .collect();
                services.set(Rc::new(remaining));
                deleting.set(true);

                let api_client = api_client.clone();
                let toast = toast.clone();
                let services = services.clone();
                let deleting = deleting.clone();
                spawn_local(async move {
                    match api_client.delete_service(&service).await {
                        Ok(()) => toast.success.emit("Service deleted successfully".to_string()),
                        Err(e) => {
                            Logger::warn_with_component(
                                "use_services",
                                &format!("Delete of '{}' failed: {}", service.name, e),
                            );
                            services.set(previous);
                            toast.error.emit(e.user_message_or("Failed to delete service"));
                        }
                    }
                    deleting.set(false);
                    on_done.emit(());
                });
            },
        )
    };

    UseServicesResult {
        state: ServicesState {
            services: (*services).clone(),
            loading: *loading,
            saving: *saving,
            deleting: *deleting,
        },
        actions: UseServicesActions {
            refresh,
            save,
            delete,
        },
    }
}
