use std::rc::Rc;

use shared::Record;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct MediaState {
    pub entries: Rc<Vec<Record>>,
    pub loading: bool,
}

pub struct UseMediaResult {
    pub state: MediaState,
    pub refresh: Callback<()>,
}

/// Website media entries, fetched on mount. A failed fetch leaves the list
/// empty; the update form keeps working without it.
#[hook]
pub fn use_media(api_client: &ApiClient) -> UseMediaResult {
    let entries = use_state(|| Rc::new(Vec::<Record>::new()));
    let loading = use_state(|| true);

    let refresh = {
        let api_client = api_client.clone();
        let entries = entries.clone();
        let loading = loading.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let entries = entries.clone();
            let loading = loading.clone();

            spawn_local(async move {
                loading.set(true);
                match api_client.list_media().await {
                    Ok(list) => entries.set(Rc::new(list)),
                    Err(e) => Logger::warn_with_component(
                        "use_media",
                        &format!("Failed to fetch media entries: {}", e),
                    ),
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

    UseMediaResult {
        state: MediaState {
            entries: (*entries).clone(),
            loading: *loading,
        },
        refresh,
    }
}
