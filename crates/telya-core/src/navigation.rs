//! Client-side navigation: anchor click interception and history handling.
//!
//! The browser wiring lives in `telya-ui`; everything here is plain data so
//! the decisions can be exercised without a DOM.

use crate::route::{Route, is_main_path};

/// Snapshot of `window.location` relevant to routing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    /// Host including port (e.g. "telyaagency.com" or "localhost:3000").
    pub host: String,
    /// Current pathname.
    pub pathname: String,
    /// Current query string including the leading `?`, or empty.
    pub search: String,
}

impl Location {
    /// Create a new location snapshot.
    pub fn new(
        host: impl Into<String>,
        pathname: impl Into<String>,
        search: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            pathname: pathname.into(),
            search: search.into(),
        }
    }
}

/// The anchor element a click landed in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Anchor {
    /// Raw `href` attribute as written in the markup.
    pub href: Option<String>,
    /// Resolved host of the anchor.
    pub host: String,
    /// Resolved query string of the anchor, including the leading `?`.
    pub search: String,
}

impl Anchor {
    /// Create an anchor with the given raw href on the given host.
    pub fn new(href: impl Into<String>, host: impl Into<String>) -> Self {
        let href = href.into();
        let search = href
            .split('#')
            .next()
            .and_then(|s| s.find('?').map(|i| s[i..].to_string()))
            .unwrap_or_default();
        Self {
            href: Some(href),
            host: host.into(),
            search,
        }
    }
}

/// A click event as seen by the interceptor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkClick {
    /// Closest anchor to the click target, if any.
    pub anchor: Option<Anchor>,
    /// Ctrl key held.
    pub ctrl_key: bool,
    /// Meta (Cmd) key held.
    pub meta_key: bool,
    /// Shift key held.
    pub shift_key: bool,
}

impl LinkClick {
    /// Plain left click on an anchor.
    pub fn on(anchor: Anchor) -> Self {
        Self {
            anchor: Some(anchor),
            ..Self::default()
        }
    }

    fn is_modified(&self) -> bool {
        self.ctrl_key || self.meta_key || self.shift_key
    }
}

/// What to do with an intercepted click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Let the browser handle it (external link, modified click, in-page hash).
    Ignore,
    /// Prevent default and load the URL with a full navigation.
    FullReload(String),
    /// Prevent default, push the URL onto session history and switch routes.
    Push(String),
    /// Prevent default; the link points to where we already are.
    Stay,
}

impl NavigationDecision {
    /// Whether the browser's default action must be cancelled.
    pub fn prevents_default(&self) -> bool {
        !matches!(self, NavigationDecision::Ignore)
    }
}

/// Decide how to handle a click given the current location.
pub fn intercept(click: &LinkClick, location: &Location) -> NavigationDecision {
    let Some(anchor) = click.anchor.as_ref() else {
        return NavigationDecision::Ignore;
    };
    if click.is_modified() {
        return NavigationDecision::Ignore;
    }
    let Some(href) = anchor.href.as_deref().filter(|h| !h.is_empty()) else {
        return NavigationDecision::Ignore;
    };
    if anchor.host != location.host {
        return NavigationDecision::Ignore;
    }

    if href.starts_with('#') {
        if is_main_path(&location.pathname) {
            return NavigationDecision::Ignore;
        }
        // Leaving a sub-page for a main-page section costs a full load.
        return NavigationDecision::FullReload(format!("/{href}"));
    }

    if location.pathname != href || location.search != anchor.search {
        NavigationDecision::Push(href.to_string())
    } else {
        NavigationDecision::Stay
    }
}

/// Access to the browser's location and session history.
pub trait History {
    /// Current location.
    fn location(&self) -> Location;

    /// Push a same-origin URL onto session history without loading it.
    fn push_state(&mut self, url: &str);

    /// Load a URL with a full page navigation.
    fn assign(&mut self, url: &str);

    /// Reset the viewport to the top of the page.
    fn scroll_to_top(&mut self);
}

/// Keeps the displayed route in sync with the location.
#[derive(Debug, Clone)]
pub struct Navigator<H> {
    history: H,
    current: String,
}

impl<H: History> Navigator<H> {
    /// Create a navigator initialised from the current location.
    pub fn new(history: H) -> Self {
        let current = history.location().pathname;
        Self { history, current }
    }

    /// Current pathname held in memory.
    pub fn current_path(&self) -> &str {
        &self.current
    }

    /// Route for the current pathname.
    pub fn route(&self) -> Route {
        Route::resolve(&self.current)
    }

    /// Underlying history.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Mutable access to the underlying history.
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// Handle a click and apply the resulting decision.
    pub fn click(&mut self, click: &LinkClick) -> NavigationDecision {
        let decision = intercept(click, &self.history.location());
        match &decision {
            NavigationDecision::Push(url) => self.push(url),
            NavigationDecision::FullReload(url) => {
                tracing::debug!(url = %url, "full navigation");
                self.history.assign(url);
            }
            NavigationDecision::Ignore | NavigationDecision::Stay => {}
        }
        decision
    }

    /// Browser back/forward: re-read the location and reset scroll.
    pub fn pop_state(&mut self) {
        self.sync();
    }

    /// Programmatic navigation to a same-origin path.
    pub fn navigate(&mut self, url: &str) {
        let location = self.history.location();
        if location.pathname == url {
            return;
        }
        self.push(url);
    }

    fn push(&mut self, url: &str) {
        tracing::debug!(url = %url, "push state");
        self.history.push_state(url);
        self.sync();
    }

    fn sync(&mut self) {
        self.current = self.history.location().pathname;
        self.history.scroll_to_top();
    }
}

/// In-memory history for tests and non-browser hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    host: String,
    entries: Vec<String>,
    index: usize,
    /// URLs passed to `push_state`, in order.
    pub pushed: Vec<String>,
    /// URLs passed to `assign`, in order.
    pub assigned: Vec<String>,
    /// Number of scroll-to-top resets.
    pub scroll_resets: usize,
}

impl MemoryHistory {
    /// Create a history positioned at `url` on `host`.
    pub fn new(host: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            entries: vec![url.into()],
            index: 0,
            ..Self::default()
        }
    }

    /// Simulate the back button. Returns false at the start of history.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Simulate the forward button. Returns false at the end of history.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }

    fn current_url(&self) -> &str {
        self.entries.get(self.index).map(String::as_str).unwrap_or("/")
    }
}

impl History for MemoryHistory {
    fn location(&self) -> Location {
        let url = self.current_url();
        let without_hash = url.split('#').next().unwrap_or_default();
        let (pathname, search) = match without_hash.find('?') {
            Some(i) => (&without_hash[..i], &without_hash[i..]),
            None => (without_hash, ""),
        };
        Location::new(self.host.clone(), pathname, search)
    }

    fn push_state(&mut self, url: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(url.to_string());
        self.index = self.entries.len() - 1;
        self.pushed.push(url.to_string());
    }

    fn assign(&mut self, url: &str) {
        self.assigned.push(url.to_string());
    }

    fn scroll_to_top(&mut self) {
        self.scroll_resets += 1;
    }
}
