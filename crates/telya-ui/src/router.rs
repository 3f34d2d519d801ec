//! Client-side router: window listeners feeding a [`Navigator`].
//!
//! A single `click` listener on the window intercepts same-origin anchors
//! and a `popstate` listener follows back/forward. The current pathname is
//! mirrored into a signal that the app's route switch reads.

use leptos::prelude::*;
use telya_core::{Anchor, History, LinkClick, NavigationDecision, Navigator, Route};
use wasm_bindgen::{JsCast, prelude::*};

use crate::browser::BrowserHistory;

/// Router handle shared through Leptos context.
#[derive(Clone, Copy)]
pub struct RouterContext {
    navigator: StoredValue<Navigator<BrowserHistory>>,
    path: RwSignal<String>,
}

impl RouterContext {
    fn new(navigator: Navigator<BrowserHistory>) -> Self {
        let path = RwSignal::new(navigator.current_path().to_string());
        Self {
            navigator: StoredValue::new(navigator),
            path,
        }
    }

    /// Current pathname (tracked).
    pub fn path(&self) -> String {
        self.path.get()
    }

    /// Route for the current pathname (tracked).
    pub fn route(&self) -> Route {
        self.path.with(|path| Route::resolve(path))
    }

    /// Push a same-origin path, as if a link had been clicked.
    pub fn navigate(&self, url: &str) {
        self.apply(|navigator| navigator.navigate(url));
    }

    /// Full page load of `url`.
    pub fn reload(&self, url: &str) {
        self.navigator
            .update_value(|navigator| navigator.history_mut().assign(url));
    }

    fn click(&self, click: &LinkClick) -> NavigationDecision {
        self.apply(|navigator| navigator.click(click))
            .unwrap_or(NavigationDecision::Ignore)
    }

    fn pop_state(&self) {
        self.apply(|navigator| navigator.pop_state());
    }

    fn apply<U>(&self, f: impl FnOnce(&mut Navigator<BrowserHistory>) -> U) -> Option<U> {
        let (result, path) = self.navigator.try_update_value(|navigator| {
            let result = f(navigator);
            (result, navigator.current_path().to_string())
        })?;
        if self.path.get_untracked() != path {
            self.path.set(path);
        }
        Some(result)
    }
}

/// Router from context.
///
/// # Panics
///
/// Panics when called outside a tree set up by [`install_router`].
pub fn use_router() -> RouterContext {
    expect_context::<RouterContext>()
}

/// Create the router, provide it as context and attach the window listeners.
pub fn install_router() -> RouterContext {
    let router = RouterContext::new(Navigator::new(BrowserHistory));
    provide_context(router);

    let Some(window) = web_sys::window() else {
        log::warn!("no window, link interception disabled");
        return router;
    };

    let on_click = Closure::<dyn Fn(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let decision = router.click(&link_click(&ev));
        if decision.prevents_default() {
            ev.prevent_default();
        }
    });
    if let Err(err) =
        window.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
    {
        log::error!("failed to attach click listener: {err:?}");
    }
    // Listeners live as long as the page.
    on_click.forget();

    let on_pop_state = Closure::<dyn Fn(web_sys::Event)>::new(move |_: web_sys::Event| {
        router.pop_state();
    });
    if let Err(err) =
        window.add_event_listener_with_callback("popstate", on_pop_state.as_ref().unchecked_ref())
    {
        log::error!("failed to attach popstate listener: {err:?}");
    }
    on_pop_state.forget();

    router
}

/// Translate a DOM click into the interceptor's view of it.
fn link_click(ev: &web_sys::MouseEvent) -> LinkClick {
    let anchor = ev
        .target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .and_then(|element| element.closest("a").ok().flatten())
        .and_then(|element| element.dyn_into::<web_sys::HtmlAnchorElement>().ok())
        .map(|a| Anchor {
            href: a.get_attribute("href"),
            host: a.host(),
            search: a.search(),
        });

    LinkClick {
        anchor,
        ctrl_key: ev.ctrl_key(),
        meta_key: ev.meta_key(),
        shift_key: ev.shift_key(),
    }
}
