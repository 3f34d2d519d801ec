//! Shared application state: admin edit mode and editable content.

use leptos::prelude::*;
use telya_core::{AdminSession, ContentStore, SiteContent};

use crate::browser::BrowserStorage;

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Admin edit-mode flag, backed by session storage.
#[derive(Clone, Copy)]
pub struct AuthContext {
    is_admin: RwSignal<bool>,
}

impl AuthContext {
    fn session() -> AdminSession<BrowserStorage> {
        AdminSession::new(BrowserStorage::session())
    }

    /// Whether edit mode is on (tracked).
    pub fn is_admin(&self) -> bool {
        self.is_admin.get()
    }

    /// Enable edit mode if the password matches.
    pub fn login(&self, password: &str) -> bool {
        let ok = Self::session().login(password);
        self.is_admin.set(ok);
        ok
    }

    pub fn logout(&self) {
        Self::session().logout();
        self.is_admin.set(false);
    }
}

/// Provide [`AuthContext`], restoring the flag from the current session.
pub fn provide_auth() -> AuthContext {
    let auth = AuthContext {
        is_admin: RwSignal::new(AuthContext::session().is_admin()),
    };
    provide_context(auth);
    auth
}

pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Editable site text, backed by local storage.
#[derive(Clone, Copy)]
pub struct ContentContext {
    content: RwSignal<SiteContent>,
}

impl ContentContext {
    fn store() -> ContentStore<BrowserStorage> {
        ContentStore::new(BrowserStorage::local())
    }

    /// Text at a dotted path (tracked).
    pub fn get(&self, path: &str) -> String {
        self.content.with(|content| content.get(path))
    }

    pub fn get_untracked(&self, path: &str) -> String {
        self.content.with_untracked(|content| content.get(path))
    }

    /// Replace the in-memory text at a dotted path; nothing is persisted
    /// until [`ContentContext::save`].
    pub fn update(&self, path: &str, text: String) {
        self.content.update(|content| {
            if let Err(err) = content.set(path, text) {
                log::warn!("content update rejected: {err}");
            }
        });
    }

    pub fn save(&self) {
        let result = self.content.with_untracked(|content| Self::store().save(content));
        match result {
            Ok(()) => alert("Contenu sauvegardé localement !"),
            Err(err) => {
                log::error!("failed to save site content: {err}");
                alert("Erreur lors de la sauvegarde.");
            }
        }
    }

    /// Drop local edits and return to the default text.
    pub fn reset(&self) {
        match Self::store().reset() {
            Ok(defaults) => {
                self.content.set(defaults);
                alert("Contenu réinitialisé.");
            }
            Err(err) => log::error!("failed to reset site content: {err}"),
        }
    }
}

/// Provide [`ContentContext`] loaded from local storage.
pub fn provide_content() -> ContentContext {
    let content = ContentContext {
        content: RwSignal::new(ContentContext::store().load()),
    };
    provide_context(content);
    content
}

pub fn use_content() -> ContentContext {
    expect_context::<ContentContext>()
}
