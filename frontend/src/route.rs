use shared::permissions::landing_section;
use shared::{Section, Session};
use wasm_bindgen::JsValue;

use crate::services::logging::Logger;

/// Screens reachable in the portal. Sections are the signed-in area; the
/// rest are the public auth pages.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Login,
    ForgotPassword,
    ResetPassword { token: String },
    Section(Section),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::ForgotPassword => "/forgot-password".to_string(),
            Route::ResetPassword { token } if token.is_empty() => "/reset-password".to_string(),
            Route::ResetPassword { token } => format!("/reset-password?token={}", token),
            Route::Section(section) => section.path().to_string(),
        }
    }

    /// Unknown paths land on the login page.
    pub fn parse(path: &str, token: Option<String>) -> Route {
        let path = path.trim_end_matches('/');
        match path {
            "" | "/login" => Route::Login,
            "/forgot-password" => Route::ForgotPassword,
            "/reset-password" => Route::ResetPassword {
                token: token.unwrap_or_default(),
            },
            other => Section::from_path(other)
                .map(Route::Section)
                .unwrap_or(Route::Login),
        }
    }

    /// Route for the address bar the app was opened with.
    pub fn current() -> Route {
        let Some(location) = web_sys::window().map(|w| w.location()) else {
            return Route::Login;
        };
        let path = location.pathname().unwrap_or_default();
        let token = location
            .search()
            .ok()
            .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok())
            .and_then(|params| params.get("token"));
        Route::parse(&path, token)
    }

    /// Reflect the route in the address bar without reloading.
    pub fn push(&self) {
        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
            return;
        };
        let path = self.path();
        if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(&path)) {
            Logger::warn_with_component("route", &format!("Could not push {}: {:?}", path, e));
        }
    }
}

/// Where the session may actually go. Signed-out users only see the public
/// pages; signed-in users skip the login page and sections their role lacks.
pub fn guard(route: &Route, session: &Session) -> Route {
    match (route, session.role()) {
        (Route::Section(_), None) => Route::Login,
        (Route::Section(section), Some(role)) if !session.can_view(*section) => {
            Route::Section(landing_section(role))
        }
        (Route::Login, Some(role)) => Route::Section(landing_section(role)),
        _ => route.clone(),
    }
}
