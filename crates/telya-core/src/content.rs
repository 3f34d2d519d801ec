//! Inline-editable site content persisted in local storage.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{CoreError, Result},
    session::KeyValueStore,
};

/// Local-storage key holding the edited content.
pub const CONTENT_KEY: &str = "siteContent";

/// Editable text blocks of the site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteContent {
    pub hero: HeroContent,
}

/// Hero section text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroContent {
    pub title: String,
    pub subtitle: String,
    pub cta: String,
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            title: "Propulsez Votre Marque Touristique".to_string(),
            subtitle: "Telya Agency - Votre partenaire en marketing digital pour le tourisme et \
                       les loisirs."
                .to_string(),
            cta: "Découvrir Nos Services".to_string(),
        }
    }
}

fn pointer(path: &str) -> String {
    format!("/{}", path.replace('.', "/"))
}

impl SiteContent {
    /// Text at a dotted path such as `hero.title`; empty when unknown.
    pub fn get(&self, path: &str) -> String {
        serde_json::to_value(self)
            .ok()
            .and_then(|value| {
                value
                    .pointer(&pointer(path))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_default()
    }

    /// Replace the text at a dotted path.
    pub fn set(&mut self, path: &str, text: impl Into<String>) -> Result<()> {
        let mut value = serde_json::to_value(&*self)?;
        match value.pointer_mut(&pointer(path)) {
            Some(slot) if slot.is_string() => *slot = Value::String(text.into()),
            _ => return Err(CoreError::unknown_field(path)),
        }
        *self = serde_json::from_value(value)?;
        Ok(())
    }
}

/// Loads and persists [`SiteContent`] overrides.
#[derive(Debug, Clone)]
pub struct ContentStore<S> {
    store: S,
}

impl<S: KeyValueStore> ContentStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stored overrides merged over the defaults.
    ///
    /// Missing fields keep their default; unreadable data yields the defaults.
    pub fn load(&self) -> SiteContent {
        let Some(raw) = self.store.get(CONTENT_KEY) else {
            return SiteContent::default();
        };
        match serde_json::from_str(&raw) {
            Ok(content) => content,
            Err(err) => {
                tracing::error!(error = %err, "failed to load stored site content");
                SiteContent::default()
            }
        }
    }

    pub fn save(&self, content: &SiteContent) -> Result<()> {
        let raw = serde_json::to_string(content)?;
        self.store.set(CONTENT_KEY, &raw)
    }

    /// Drop the override; the defaults apply again.
    pub fn reset(&self) -> Result<SiteContent> {
        self.store.remove(CONTENT_KEY)?;
        Ok(SiteContent::default())
    }
}
