//! Telya UI Components
//!
//! Leptos components and browser bindings for the Telya Agency site.
//!
//! # Components
//!
//! ## Layout
//! - [`Header`] - Scroll-aware header with hash navigation and mobile menu
//! - [`Footer`] - Tagline, social links, copyright
//! - [`ScrollToTopButton`], [`LoadingSpinner`], [`Logo`]
//!
//! ## Sections
//! - [`Hero`] - Video hero with editable text
//! - [`Services`], [`Portfolio`], [`Testimonials`]
//! - [`Contact`] - Lead form posted to `/api/send-email`
//! - [`PortfolioModal`] - Portfolio request handed to the mail client
//!
//! ## Edit mode
//! - [`EditableText`] - Text editable in place while logged in
//! - [`AdminBar`] - Save / reset / logout toolbar
//!
//! ## Pages
//! - [`AdminLoginPage`], [`ThankYouPage`], [`QuestionnairePage`], [`IntroPage`]
//! - [`IntroAnimation`] - Once-per-session splash
//!
//! # Browser bindings
//!
//! [`BrowserHistory`], [`BrowserStorage`] and [`FetchTransport`] implement
//! the `telya-core` platform traits; [`install_router`] wires the window
//! listeners into a [`RouterContext`].
//!
//! # Example
//!
//! ```ignore
//! use leptos::prelude::*;
//! use telya_ui::{Hero, install_router, provide_auth, provide_content};
//!
//! #[component]
//! fn App() -> impl IntoView {
//!     install_router();
//!     provide_auth();
//!     provide_content();
//!
//!     view! { <Hero /> }
//! }
//! ```

pub mod browser;
pub mod contact;
pub mod context;
pub mod dom;
pub mod editable;
pub mod fields;
pub mod intro;
pub mod layout;
pub mod pages;
pub mod portfolio;
pub mod questionnaire;
pub mod router;
pub mod sections;

pub use browser::{BrowserHistory, BrowserStorage, FetchTransport, StorageArea};
pub use contact::Contact;
pub use context::{
    AuthContext, ContentContext, provide_auth, provide_content, use_auth, use_content,
};
pub use editable::{AdminBar, EditableText};
pub use intro::{IntroAnimation, IntroPhase};
pub use layout::{Footer, Header, LoadingSpinner, Logo, ScrollToTopButton};
pub use pages::{AdminLoginPage, IntroPage, ThankYouPage};
pub use portfolio::PortfolioModal;
pub use questionnaire::QuestionnairePage;
pub use router::{RouterContext, install_router, use_router};
pub use sections::{Hero, Portfolio, Services, Testimonials};
