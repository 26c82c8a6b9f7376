use shared::session::{SessionError, SessionStore};
use web_sys::Storage;

/// `window.sessionStorage`, scoped to the tab like the gateway session.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BrowserSessionStore;

impl BrowserSessionStore {
    fn storage(&self) -> Option<Storage> {
        web_sys::window().and_then(|window| window.session_storage().ok().flatten())
    }
}

impl SessionStore for BrowserSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let storage = self
            .storage()
            .ok_or_else(|| SessionError::Storage("sessionStorage is not available".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|e| SessionError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::session::SESSION_USER_KEY;
    use shared::{Session, SessionUser};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_session_survives_reload() {
        let store = BrowserSessionStore;
        let mut session = Session::anonymous();
        session
            .login(
                SessionUser {
                    name: "Lakshmi".to_string(),
                    email: "lakshmi@example.org".to_string(),
                    roleid: 2,
                },
                &store,
            )
            .unwrap();

        let restored = Session::restore(&store);
        assert_eq!(restored.user().map(|u| u.roleid), Some(2));

        let mut restored = restored;
        restored.logout(&store);
        assert!(store.get(SESSION_USER_KEY).is_none());
        assert!(!Session::restore(&store).is_authenticated());
    }

    #[wasm_bindgen_test]
    fn test_corrupt_blob_reads_as_signed_out() {
        let store = BrowserSessionStore;
        store.set(SESSION_USER_KEY, "{not json").unwrap();
        assert!(!Session::restore(&store).is_authenticated());
        assert!(store.get(SESSION_USER_KEY).is_none());
    }
}
