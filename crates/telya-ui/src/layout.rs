//! Page chrome: header, footer, logo, spinner and scroll-to-top button.

use leptos::{ev, prelude::*};

use crate::dom;

/// A header navigation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    /// Section anchor on the main page.
    pub href: &'static str,
    /// Display label.
    pub label: &'static str,
}

/// Header navigation, in display order.
pub const NAV_LINKS: [NavLink; 4] = [
    NavLink {
        href: "#services",
        label: "Services",
    },
    NavLink {
        href: "#portfolio",
        label: "Portfolio",
    },
    NavLink {
        href: "#testimonials",
        label: "Témoignages",
    },
    NavLink {
        href: "#contact",
        label: "Contact",
    },
];

/// Header turns opaque once the page scrolls past this offset.
const HEADER_SCROLL_OFFSET: f64 = 10.0;

/// The scroll-to-top button appears past this offset.
const SCROLL_TOP_OFFSET: f64 = 300.0;

/// Agency logo.
#[component]
pub fn Logo(
    /// Extra CSS classes.
    #[prop(optional)]
    class: &'static str,
) -> impl IntoView {
    view! { <img src="/logo.svg" alt="Telya Agency" class=format!("logo {class}") /> }
}

/// Animated spinner shown while a request is in flight.
#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! { <div class="spinner" role="status" aria-label="Chargement en cours"></div> }
}

/// Fixed site header with hash navigation and a mobile menu.
#[component]
pub fn Header() -> impl IntoView {
    let scrolled = RwSignal::new(dom::scroll_y() > HEADER_SCROLL_OFFSET);
    let menu_open = RwSignal::new(false);

    let handle = window_event_listener(ev::scroll, move |_| {
        scrolled.set(dom::scroll_y() > HEADER_SCROLL_OFFSET);
    });
    on_cleanup(move || handle.remove());

    let close_menu = move |_: ev::MouseEvent| menu_open.set(false);

    view! {
      <header class="site-header" class:scrolled=move || scrolled.get()>
        <div class="container header-inner">
          <a href="/" class="header-brand">
            <Logo class="header-logo" />
          </a>
          <nav class="header-nav">
            {NAV_LINKS
              .iter()
              .map(|link| view! { <a href=link.href class="nav-link">{link.label}</a> })
              .collect_view()}
            <a href="#contact" class="btn btn-primary header-cta">
              "Commençons"
            </a>
          </nav>
          <button
            class="menu-toggle"
            aria-label="Menu"
            aria-expanded=move || menu_open.get().to_string()
            on:click=move |_| menu_open.update(|open| *open = !*open)
          >
            <span class="menu-bar"></span>
            <span class="menu-bar"></span>
            <span class="menu-bar"></span>
          </button>
        </div>
        <Show when=move || menu_open.get()>
          <nav class="mobile-menu">
            {NAV_LINKS
              .iter()
              .map(|link| {
                view! {
                  <a href=link.href class="mobile-link" on:click=close_menu>
                    {link.label}
                  </a>
                }
              })
              .collect_view()}
            <a href="#contact" class="btn btn-primary" on:click=close_menu>
              "Commençons"
            </a>
          </nav>
        </Show>
      </header>
    }
}

/// Site footer with social links.
#[component]
pub fn Footer() -> impl IntoView {
    let year = dom::current_year();

    view! {
      <footer class="site-footer">
        <div class="container footer-inner">
          <div class="footer-brand">
            <Logo class="footer-logo" />
            <p class="footer-tagline">"Le marketing digital qui donne vie à vos destinations."</p>
          </div>
          <div class="footer-social">
            <a
              href="https://www.facebook.com/profile.php?id=61577443097904"
              target="_blank"
              rel="noopener noreferrer"
              aria-label="Facebook"
            >
              "Facebook"
            </a>
            <a
              href="https://www.instagram.com/telyaagency/"
              target="_blank"
              rel="noopener noreferrer"
              aria-label="Instagram"
            >
              "Instagram"
            </a>
          </div>
          <p class="footer-copyright">
            {format!("© {year} Telya Agency. Tous droits réservés.")}
          </p>
        </div>
      </footer>
    }
}

/// Floating button that smooth-scrolls back to the top.
#[component]
pub fn ScrollToTopButton() -> impl IntoView {
    let visible = RwSignal::new(false);

    let handle = window_event_listener(ev::scroll, move |_| {
        visible.set(dom::scroll_y() > SCROLL_TOP_OFFSET);
    });
    on_cleanup(move || handle.remove());

    view! {
      <Show when=move || visible.get()>
        <button
          class="scroll-top"
          aria-label="Retour en haut"
          on:click=move |_| dom::scroll_to_top_smooth()
        >
          "↑"
        </button>
      </Show>
    }
}
