//! Telya Core Library
//!
//! Platform-independent logic for the Telya Agency site: route resolution,
//! link interception, lead forms and their validation, the submission flow,
//! the admin edit-mode gate and editable content.
//!
//! Browser globals (history, storage, fetch) are reached only through the
//! [`History`], [`KeyValueStore`] and [`Transport`] traits.

pub mod content;
pub mod error;
pub mod form;
pub mod navigation;
pub mod route;
pub mod session;
pub mod submit;

pub use content::{ContentStore, HeroContent, SiteContent};
pub use error::{CoreError, Result};
pub use form::{
    Attachment, ContactForm, EmailPayload, FieldErrors, PortfolioRequest, QuestionnaireForm,
    is_valid_email,
};
pub use navigation::{
    Anchor, History, LinkClick, Location, MemoryHistory, NavigationDecision, Navigator, intercept,
};
pub use route::{Route, is_main_path};
pub use session::{AdminSession, IntroGate, KeyValueStore, MemoryStore};
pub use submit::{
    QuestionnaireSubmission, SubmitOutcome, Submittable, Transport, TransportResponse, submit,
};
