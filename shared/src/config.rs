//! Portal configuration.
//!
//! The frontend is a static bundle, so configuration is read at build time
//! (`option_env!`) through [`PortalConfig::from_lookup`]. Every key is
//! optional and falls back to the production gateways.

use serde::{Deserialize, Serialize};

use crate::gateway::join_url;
use crate::notification::DEFAULT_TOAST_TIMEOUT_MS;
use crate::table::DEFAULT_PAGE_SIZE;

pub const USER_API_KEY: &str = "PORTAL_USER_API";
pub const SERVICES_API_KEY: &str = "PORTAL_SERVICES_API";
pub const EMAIL_API_KEY: &str = "PORTAL_EMAIL_API";
pub const TRANSACTIONS_API_KEY: &str = "PORTAL_TRANSACTIONS_API";
pub const MEDIA_API_KEY: &str = "PORTAL_MEDIA_API";
pub const SENDER_EMAIL_KEY: &str = "PORTAL_SENDER_EMAIL";
pub const PAGE_SIZE_KEY: &str = "PORTAL_PAGE_SIZE";
pub const TOAST_TIMEOUT_KEY: &str = "PORTAL_TOAST_TIMEOUT_MS";
pub const CONSOLE_LOG_KEY: &str = "PORTAL_CONSOLE_LOG";

const DEFAULT_USER_API: &str = "https://nfgfx2bpj6.execute-api.us-east-1.amazonaws.com/ProdUser";
const DEFAULT_SERVICES_API: &str = "https://esalzmioqk.execute-api.us-east-1.amazonaws.com/Prod";
const DEFAULT_EMAIL_API: &str = "https://u2b0w593t4.execute-api.us-east-1.amazonaws.com/Prod";
const DEFAULT_SENDER: &str = "noreply@sstmi.org";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Login, user management and password flows
    pub user_api_base: String,
    /// Service catalog
    pub services_api_base: String,
    pub email_api_base: String,
    pub transactions_api_base: String,
    pub media_api_base: String,
    /// Address every outgoing email is sent from
    pub sender_email: String,
    pub page_size: usize,
    pub toast_timeout_ms: u32,
    /// Verbose console output; errors print regardless
    pub console_log: bool,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            user_api_base: DEFAULT_USER_API.to_string(),
            services_api_base: DEFAULT_SERVICES_API.to_string(),
            email_api_base: DEFAULT_EMAIL_API.to_string(),
            transactions_api_base: DEFAULT_SERVICES_API.to_string(),
            media_api_base: DEFAULT_SERVICES_API.to_string(),
            sender_email: DEFAULT_SENDER.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            toast_timeout_ms: DEFAULT_TOAST_TIMEOUT_MS,
            console_log: false,
        }
    }
}

impl PortalConfig {
    /// Build from a key lookup. Blank or unparseable values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            user_api_base: get(USER_API_KEY).unwrap_or(defaults.user_api_base),
            services_api_base: get(SERVICES_API_KEY).unwrap_or(defaults.services_api_base),
            email_api_base: get(EMAIL_API_KEY).unwrap_or(defaults.email_api_base),
            transactions_api_base: get(TRANSACTIONS_API_KEY)
                .unwrap_or(defaults.transactions_api_base),
            media_api_base: get(MEDIA_API_KEY).unwrap_or(defaults.media_api_base),
            sender_email: get(SENDER_EMAIL_KEY).unwrap_or(defaults.sender_email),
            page_size: get(PAGE_SIZE_KEY)
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|size| *size > 0)
                .unwrap_or(defaults.page_size),
            toast_timeout_ms: get(TOAST_TIMEOUT_KEY)
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(defaults.toast_timeout_ms),
            console_log: get(CONSOLE_LOG_KEY)
                .map(|v| parse_switch(&v))
                .unwrap_or(defaults.console_log),
        }
    }

    pub fn user_url(&self, path: &str) -> String {
        join_url(&self.user_api_base, path)
    }

    pub fn services_url(&self, path: &str) -> String {
        join_url(&self.services_api_base, path)
    }

    pub fn email_url(&self, path: &str) -> String {
        join_url(&self.email_api_base, path)
    }

    pub fn transactions_url(&self, path: &str) -> String {
        join_url(&self.transactions_api_base, path)
    }

    pub fn media_url(&self, path: &str) -> String {
        join_url(&self.media_api_base, path)
    }
}

/// "on", "true", "1" and "yes" enable a switch.
fn parse_switch(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "on" | "true" | "1" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_without_environment() {
        let config = PortalConfig::from_lookup(|_| None);
        assert_eq!(config, PortalConfig::default());
        assert_eq!(
            config.user_url("user/login"),
            "https://nfgfx2bpj6.execute-api.us-east-1.amazonaws.com/ProdUser/user/login"
        );
        assert_eq!(config.page_size, 10);
        assert_eq!(config.toast_timeout_ms, 4000);
        assert!(!config.console_log);
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (USER_API_KEY, "http://localhost:4000/"),
            (PAGE_SIZE_KEY, "0"),
            (TOAST_TIMEOUT_KEY, "soon"),
            (CONSOLE_LOG_KEY, "On"),
            (SENDER_EMAIL_KEY, "   "),
        ]);
        let config = PortalConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.user_url("listusers"), "http://localhost:4000/listusers");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.toast_timeout_ms, 4000);
        assert!(config.console_log);
        assert_eq!(config.sender_email, "noreply@sstmi.org");
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: PortalConfig = serde_json::from_str(r#"{"page_size": 25}"#).unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.sender_email, "noreply@sstmi.org");
    }
}
