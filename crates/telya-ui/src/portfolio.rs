//! Portfolio access request modal.

use leptos::{ev, prelude::*};
use telya_core::{FieldErrors, PortfolioRequest};

use crate::{
    dom,
    fields::{TextField, bind, reveal_first_error},
};

/// Collects name, email and establishment, then hands a prefilled message
/// to the visitor's mail client.
#[component]
pub fn PortfolioModal(
    /// Called when the modal should close.
    on_close: Callback<()>,
) -> impl IntoView {
    let form = RwSignal::new(PortfolioRequest::default());
    let errors = RwSignal::new(FieldErrors::new());

    dom::lock_body_scroll(true);
    let handle = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || {
        handle.remove();
        dom::lock_body_scroll(false);
    });

    let name = bind(form, errors, "name", |f| &f.name, |f| &mut f.name);
    let email = bind(form, errors, "email", |f| &f.email, |f| &mut f.email);
    let company = bind(
        form,
        errors,
        "companyName",
        |f| &f.company_name,
        |f| &mut f.company_name,
    );

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let request = form.get_untracked();
        let found = request.validate();
        if !found.is_empty() {
            reveal_first_error(&found, "modal");
            errors.set(found);
            return;
        }
        errors.set(FieldErrors::new());
        dom::open_url(&request.mailto_link());
        on_close.run(());
    };

    view! {
      <div class="modal-overlay" on:click=move |_| on_close.run(())>
        <div
          class="modal"
          role="dialog"
          aria-modal="true"
          on:click=|ev: ev::MouseEvent| ev.stop_propagation()
        >
          <button class="modal-close" aria-label="Fermer" on:click=move |_| on_close.run(())>
            "×"
          </button>
          <h3>"Accéder au Portfolio"</h3>
          <p class="modal-intro">
            "Remplissez ce formulaire pour recevoir un accès exclusif à nos réalisations."
          </p>
          <form class="form" novalidate=true on:submit=on_submit>
            <TextField
              id="modal-name".to_string()
              label="Nom complet"
              bound=name
              placeholder="Votre nom"
            />
            <TextField
              id="modal-email".to_string()
              label="Adresse e-mail"
              bound=email
              kind="email"
              placeholder="Votre e-mail"
            />
            <TextField
              id="modal-companyName".to_string()
              label="Nom d'établissement"
              bound=company
              placeholder="Ex: Hôtel Le Grand Panorama"
            />
            <button type="submit" class="btn btn-primary btn-block">
              "Préparer l'e-mail"
            </button>
          </form>
        </div>
      </div>
    }
}
