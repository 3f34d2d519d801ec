//! Browser implementations of the core platform traits.
//!
//! Every call re-reads `web_sys::window()`, so the handles are zero-sized
//! and can be stored in `Send + Sync` Leptos contexts.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde_json::Value;
use telya_core::{
    CoreError, History, KeyValueStore, Location, Result, Transport, TransportResponse,
    submit::error_message,
};
use wasm_bindgen::JsValue;

fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// `window.history` and `window.location`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHistory;

impl History for BrowserHistory {
    fn location(&self) -> Location {
        let Some(window) = web_sys::window() else {
            return Location::default();
        };
        let location = window.location();
        Location::new(
            location.host().unwrap_or_default(),
            location.pathname().unwrap_or_default(),
            location.search().unwrap_or_default(),
        )
    }

    fn push_state(&mut self, url: &str) {
        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
            log::warn!("history API unavailable, cannot push {url}");
            return;
        };
        if let Err(err) = history.push_state_with_url(&JsValue::NULL, "", Some(url)) {
            log::warn!("pushState({url}) failed: {}", js_error(err));
        }
    }

    fn assign(&mut self, url: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(err) = window.location().assign(url) {
            log::warn!("location.assign({url}) failed: {}", js_error(err));
        }
    }

    fn scroll_to_top(&mut self) {
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
    }
}

/// Which Web Storage area a [`BrowserStorage`] targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageArea {
    /// Cleared when the tab closes.
    Session,
    /// Survives restarts.
    Local,
}

/// `sessionStorage` / `localStorage` behind [`KeyValueStore`].
#[derive(Debug, Clone, Copy)]
pub struct BrowserStorage {
    area: StorageArea,
}

impl BrowserStorage {
    pub fn session() -> Self {
        Self {
            area: StorageArea::Session,
        }
    }

    pub fn local() -> Self {
        Self {
            area: StorageArea::Local,
        }
    }

    pub fn area(&self) -> StorageArea {
        self.area
    }

    fn storage(&self) -> Result<web_sys::Storage> {
        let window = web_sys::window().ok_or_else(|| CoreError::storage("no window"))?;
        let storage = match self.area {
            StorageArea::Session => window.session_storage(),
            StorageArea::Local => window.local_storage(),
        };
        storage
            .map_err(|e| CoreError::storage(js_error(e)))?
            .ok_or_else(|| CoreError::storage("storage disabled"))
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.storage() {
            Ok(storage) => storage.get_item(key).ok().flatten(),
            Err(err) => {
                log::debug!("storage read of {key} skipped: {err}");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| CoreError::storage(js_error(e)))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| CoreError::storage(js_error(e)))
    }
}

/// `fetch` through gloo-net.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl FetchTransport {
    async fn read(response: Response) -> TransportResponse {
        let status = response.status();
        let mut reply = TransportResponse::new(status);
        if !response.ok() {
            if let Ok(body) = response.json::<Value>().await {
                if let Some(message) = error_message(&body) {
                    reply = reply.with_error(message);
                }
            }
        }
        reply
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    type File = web_sys::File;

    async fn post_json(&self, url: &str, body: &Value) -> Result<TransportResponse> {
        let request = Request::post(url)
            .header("Accept", "application/json")
            .json(body)
            .map_err(|e| CoreError::transport(e.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|e| CoreError::transport(e.to_string()))?;
        Ok(Self::read(response).await)
    }

    async fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
        file: Option<&Self::File>,
    ) -> Result<TransportResponse> {
        let form = web_sys::FormData::new().map_err(|e| CoreError::transport(js_error(e)))?;
        for (name, value) in fields {
            form.append_with_str(name, value)
                .map_err(|e| CoreError::transport(js_error(e)))?;
        }
        if let Some(file) = file {
            form.append_with_blob_and_filename("attachment", file, &file.name())
                .map_err(|e| CoreError::transport(js_error(e)))?;
        }

        // The browser sets the multipart boundary itself.
        let request = Request::post(url)
            .header("Accept", "application/json")
            .body(form)
            .map_err(|e| CoreError::transport(e.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|e| CoreError::transport(e.to_string()))?;
        Ok(Self::read(response).await)
    }
}
