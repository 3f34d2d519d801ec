//! Route table for the single-page site.

use serde::{Deserialize, Serialize};

/// A page the site can display.
///
/// Resolution is an exact match on the pathname; anything unknown renders
/// the main page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    /// Main composed page (hero, services, portfolio, testimonials, contact).
    #[default]
    Home,
    /// Admin password gate.
    Admin,
    /// Confirmation page after a successful submission.
    ThankYou,
    /// Multi-step lead questionnaire.
    Questionnaire,
    /// Timed splash that forwards to the questionnaire.
    Intro,
}

impl Route {
    /// All routes, in display order.
    pub const ALL: [Route; 5] = [
        Route::Home,
        Route::Admin,
        Route::ThankYou,
        Route::Questionnaire,
        Route::Intro,
    ];

    /// Resolve a pathname to a route.
    pub fn resolve(pathname: &str) -> Self {
        match pathname {
            "/admin" => Route::Admin,
            "/thank-you" => Route::ThankYou,
            "/questionnaire" => Route::Questionnaire,
            "/intro" => Route::Intro,
            _ => Route::Home,
        }
    }

    /// Canonical pathname of the route.
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Admin => "/admin",
            Route::ThankYou => "/thank-you",
            Route::Questionnaire => "/questionnaire",
            Route::Intro => "/intro",
        }
    }

    /// Document title shown for the route.
    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Telya Agency - Marketing digital pour le tourisme",
            Route::Admin => "Accès Administrateur - Telya Agency",
            Route::ThankYou => "Merci ! - Telya Agency",
            Route::Questionnaire => "Votre projet - Telya Agency",
            Route::Intro => "Prêt à décoller ? - Telya Agency",
        }
    }
}

/// Whether the pathname is the main page, where hash links scroll in place.
pub fn is_main_path(pathname: &str) -> bool {
    matches!(pathname, "/" | "/index.html")
}
