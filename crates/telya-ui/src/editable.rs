//! Inline edit mode: editable text blocks and the admin toolbar.

use leptos::{ev, prelude::*};

use crate::{
    context::{use_auth, use_content},
    router::use_router,
};

/// Text bound to a dotted content path, editable in place in edit mode.
///
/// Edits are committed to the content context on blur, and only when the
/// text actually changed. The text is written through `innerText` rather
/// than a text child, since the browser may replace the child node while
/// editing. Enter ends the edit instead of inserting a line break.
#[component]
pub fn EditableText(
    /// Dotted content path, e.g. `hero.title`.
    path: &'static str,
    /// Extra CSS classes.
    #[prop(optional)]
    class: &'static str,
) -> impl IntoView {
    let auth = use_auth();
    let content = use_content();

    let on_blur = move |ev: ev::FocusEvent| {
        let text = event_target::<web_sys::HtmlElement>(&ev).inner_text();
        if text != content.get_untracked(path) {
            content.update(path, text);
        }
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if is_commit_key(&ev.key()) {
            ev.prevent_default();
            let _ = event_target::<web_sys::HtmlElement>(&ev).blur();
        }
    };

    view! {
      <span
        class=format!("editable {class}")
        class:editing=move || auth.is_admin()
        contenteditable=move || auth.is_admin().to_string()
        prop:innerText=move || content.get(path)
        on:keydown=on_keydown
        on:blur=on_blur
      ></span>
    }
}

/// Keys that end an inline edit.
fn is_commit_key(key: &str) -> bool {
    matches!(key, "Enter" | "Escape")
}

/// Toolbar shown while edit mode is on.
#[component]
pub fn AdminBar() -> impl IntoView {
    let auth = use_auth();
    let content = use_content();
    let router = use_router();

    let logout = move |_: ev::MouseEvent| {
        auth.logout();
        router.reload("/");
    };

    view! {
      <Show when=move || auth.is_admin()>
        <div class="admin-bar" role="toolbar">
          <span class="admin-bar-label">"Mode édition"</span>
          <button class="btn btn-small" on:click=move |_| content.save()>
            "Sauvegarder"
          </button>
          <button class="btn btn-small btn-outline" on:click=move |_| content.reset()>
            "Réinitialiser"
          </button>
          <button class="btn btn-small btn-ghost" on:click=logout>
            "Déconnexion"
          </button>
        </div>
      </Show>
    }
}
