//! Session context: who is signed in and with which role.
//!
//! The context is set once at login, read by navigation and screens, and
//! cleared at logout. Persistence goes through a [`SessionStore`] so the same
//! lifecycle runs against browser session storage or an in-memory map.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::permissions::{self, DashboardTab, Section};
use crate::Role;

/// Storage key of the signed-in user blob.
pub const SESSION_USER_KEY: &str = "adminuser";
/// Storage key of the session marker written next to the user blob.
pub const SESSION_TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage unavailable: {0}")]
    Storage(String),
    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Identity cached for the session, stored as `{name, email, roleid}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: String,
    pub email: String,
    pub roleid: i64,
}

impl SessionUser {
    pub fn role(&self) -> Role {
        Role::from_id(self.roleid)
    }

    /// Name to greet with; falls back to the mailbox part of the email.
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if !name.is_empty() {
            return name;
        }
        self.email.split('@').next().unwrap_or(&self.email)
    }
}

/// Key/value persistence for the session blob.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str);
}

/// In-memory store used by tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    user: Option<SessionUser>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Read the persisted user. A blob that no longer parses is dropped so
    /// the next screen lands on the login page.
    pub fn restore<S: SessionStore + ?Sized>(store: &S) -> Self {
        let Some(raw) = store.get(SESSION_USER_KEY) else {
            return Self::anonymous();
        };
        match serde_json::from_str::<SessionUser>(&raw) {
            Ok(user) => Self { user: Some(user) },
            Err(e) => {
                log::warn!(target: "session", "discarding unreadable session blob: {}", e);
                store.remove(SESSION_USER_KEY);
                store.remove(SESSION_TOKEN_KEY);
                Self::anonymous()
            }
        }
    }

    pub fn login<S: SessionStore + ?Sized>(
        &mut self,
        user: SessionUser,
        store: &S,
    ) -> Result<(), SessionError> {
        let blob = serde_json::to_string(&user)?;
        store.set(SESSION_USER_KEY, &blob)?;
        store.set(SESSION_TOKEN_KEY, "token")?;
        log::info!(target: "session", "signed in as {} (role {})", user.email, user.roleid);
        self.user = Some(user);
        Ok(())
    }

    pub fn logout<S: SessionStore + ?Sized>(&mut self, store: &S) {
        store.remove(SESSION_USER_KEY);
        store.remove(SESSION_TOKEN_KEY);
        if let Some(user) = self.user.take() {
            log::info!(target: "session", "signed out {}", user.email);
        }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(SessionUser::role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Anonymous sessions see nothing.
    pub fn can_view(&self, section: Section) -> bool {
        self.role()
            .map(|role| permissions::can_view(role, section))
            .unwrap_or(false)
    }

    pub fn visible_sections(&self) -> Vec<Section> {
        self.role()
            .map(permissions::visible_sections)
            .unwrap_or_default()
    }

    pub fn visible_tabs(&self) -> Vec<DashboardTab> {
        self.role()
            .map(permissions::visible_tabs)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> SessionUser {
        SessionUser {
            name: "Ann".into(),
            email: "ann@example.org".into(),
            roleid: 2,
        }
    }

    #[test]
    fn test_login_persists_blob() {
        let store = MemorySessionStore::new();
        let mut session = Session::anonymous();
        session.login(ann(), &store).unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.role(), Some(Role::ReceptionistAdmin));
        assert_eq!(
            store.get(SESSION_USER_KEY).as_deref(),
            Some(r#"{"name":"Ann","email":"ann@example.org","roleid":2}"#)
        );
        assert_eq!(store.get(SESSION_TOKEN_KEY).as_deref(), Some("token"));
    }

    #[test]
    fn test_restore_reads_previous_login() {
        let store = MemorySessionStore::new();
        Session::anonymous().login(ann(), &store).unwrap();

        let restored = Session::restore(&store);
        assert_eq!(restored.user(), Some(&ann()));
    }

    #[test]
    fn test_logout_clears_store_and_context() {
        let store = MemorySessionStore::new();
        let mut session = Session::anonymous();
        session.login(ann(), &store).unwrap();
        session.logout(&store);

        assert!(!session.is_authenticated());
        assert!(store.get(SESSION_USER_KEY).is_none());
        assert!(store.get(SESSION_TOKEN_KEY).is_none());
        assert!(!Session::restore(&store).is_authenticated());
    }

    #[test]
    fn test_corrupt_blob_is_discarded() {
        let store = MemorySessionStore::new();
        store.set(SESSION_USER_KEY, "{not json").unwrap();
        store.set(SESSION_TOKEN_KEY, "token").unwrap();

        let session = Session::restore(&store);
        assert!(!session.is_authenticated());
        assert!(store.get(SESSION_USER_KEY).is_none());
        assert!(store.get(SESSION_TOKEN_KEY).is_none());
    }

    #[test]
    fn test_anonymous_sees_nothing() {
        let session = Session::anonymous();
        assert!(session.visible_sections().is_empty());
        assert!(session.visible_tabs().is_empty());
        assert!(!session.can_view(Section::Home));
    }

    #[test]
    fn test_display_name_falls_back_to_mailbox() {
        let mut user = ann();
        assert_eq!(user.display_name(), "Ann");
        user.name = "  ".into();
        assert_eq!(user.display_name(), "ann");
    }
}
