use std::rc::Rc;

use shared::{PortalConfig, Session, SessionUser};
use yew::prelude::*;

use crate::hooks::use_toast::ToastActions;
use crate::route::Route;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::session_storage::BrowserSessionStore;

#[derive(Clone, PartialEq)]
pub struct UseSessionActions {
    pub login: Callback<SessionUser>,
    pub logout: Callback<()>,
}

pub struct UseSessionResult {
    pub session: Session,
    pub actions: UseSessionActions,
}

/// Owns the session for the whole app: restored from session storage on
/// first render, replaced on login, cleared on logout.
#[hook]
pub fn use_session() -> UseSessionResult {
    let session = use_state(|| Session::restore(&BrowserSessionStore));

    let login = {
        let session = session.clone();
        use_callback((), move |user: SessionUser, _| {
            let mut next = Session::anonymous();
            match next.login(user, &BrowserSessionStore) {
                Ok(()) => session.set(next),
                Err(e) => {
                    Logger::error_with_component(
                        "session",
                        &format!("Failed to store session: {}", e),
                    );
                }
            }
        })
    };

    let logout = {
        let session = session.clone();
        use_callback((), move |_: (), _| {
            let mut current = (*session).clone();
            current.logout(&BrowserSessionStore);
            session.set(current);
        })
    };

    UseSessionResult {
        session: (*session).clone(),
        actions: UseSessionActions { login, logout },
    }
}

/// Everything a screen needs from the app shell.
#[derive(Clone, PartialEq)]
pub struct AppContext {
    pub session: Session,
    pub api: ApiClient,
    pub config: Rc<PortalConfig>,
    pub session_actions: UseSessionActions,
    /// The app-wide toast slot
    pub toast: ToastActions,
    pub navigate: Callback<Route>,
}

#[hook]
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext is provided by App")
}
