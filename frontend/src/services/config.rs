use shared::config::{
    PortalConfig, CONSOLE_LOG_KEY, EMAIL_API_KEY, MEDIA_API_KEY, PAGE_SIZE_KEY, SENDER_EMAIL_KEY,
    SERVICES_API_KEY, TOAST_TIMEOUT_KEY, TRANSACTIONS_API_KEY, USER_API_KEY,
};

/// Configuration baked in at build time, e.g.
/// `PORTAL_CONSOLE_LOG=on trunk build`.
pub fn load() -> PortalConfig {
    PortalConfig::from_lookup(|key| build_env(key).map(str::to_string))
}

fn build_env(key: &str) -> Option<&'static str> {
    match key {
        USER_API_KEY => option_env!("PORTAL_USER_API"),
        SERVICES_API_KEY => option_env!("PORTAL_SERVICES_API"),
        EMAIL_API_KEY => option_env!("PORTAL_EMAIL_API"),
        TRANSACTIONS_API_KEY => option_env!("PORTAL_TRANSACTIONS_API"),
        MEDIA_API_KEY => option_env!("PORTAL_MEDIA_API"),
        SENDER_EMAIL_KEY => option_env!("PORTAL_SENDER_EMAIL"),
        PAGE_SIZE_KEY => option_env!("PORTAL_PAGE_SIZE"),
        TOAST_TIMEOUT_KEY => option_env!("PORTAL_TOAST_TIMEOUT_MS"),
        CONSOLE_LOG_KEY => option_env!("PORTAL_CONSOLE_LOG"),
        _ => None,
    }
}
