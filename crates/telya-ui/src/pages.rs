//! Standalone pages: admin login, thank-you and the questionnaire intro.

use leptos::{ev, prelude::*};
use telya_core::Route;

use crate::{
    context::use_auth,
    dom,
    layout::{LoadingSpinner, Logo},
    router::use_router,
};

/// Delay before the intro page moves on to the questionnaire.
pub const INTRO_REDIRECT_MS: i32 = 2800;

/// Password gate for the inline edit mode.
#[component]
pub fn AdminLoginPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<&'static str>);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if password.with_untracked(|p| auth.login(p)) {
            router.navigate(Route::Home.path());
        } else {
            error.set(Some("Mot de passe incorrect."));
        }
    };

    view! {
      <div class="page-center page-muted">
        <div class="card login-card">
          <Logo class="logo-medium" />
          <h2>"Accès Administrateur"</h2>
          <p>"Veuillez entrer le mot de passe pour accéder au mode d'édition."</p>
          <form class="form" on:submit=on_submit>
            <input
              type="password"
              class="field-input"
              placeholder="Mot de passe"
              prop:value=move || password.get()
              on:input=move |ev| {
                password.set(event_target_value(&ev));
                error.set(None);
              }
            />
            {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
            <button type="submit" class="btn btn-primary btn-block">
              "Se Connecter"
            </button>
          </form>
        </div>
      </div>
    }
}

#[component]
pub fn ThankYouPage() -> impl IntoView {
    view! {
      <div class="page-center page-muted">
        <div class="card thank-you">
          <Logo class="logo-medium" />
          <h1>"Message envoyé avec succès !"</h1>
          <p>
            "Merci de nous avoir contactés. Nous avons bien reçu votre message et reviendrons vers vous dans les plus brefs délais."
          </p>
          <a href="/" class="btn btn-primary btn-large">
            "Retour au site"
          </a>
        </div>
      </div>
    }
}

/// Short splash that forwards to the questionnaire.
#[component]
pub fn IntroPage() -> impl IntoView {
    let router = use_router();

    let timer = dom::set_timeout(INTRO_REDIRECT_MS, move || {
        router.navigate(Route::Questionnaire.path());
    });
    on_cleanup(move || {
        if let Some(id) = timer {
            dom::clear_timeout(id);
        }
    });

    view! {
      <div class="page-center intro-page">
        <div class="intro-logo shown">
          <Logo class="logo-large" />
        </div>
        <p class="intro-text shown delayed">"Prêt à décoller ?"</p>
        <div class="intro-spinner">
          <LoadingSpinner />
        </div>
      </div>
    }
}
