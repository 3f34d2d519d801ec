//! Contact section: lead form posted to the same-origin relay.

use leptos::{ev, prelude::*, task::spawn_local};
use telya_core::{ContactForm, FieldErrors, Route, SubmitOutcome, submit};

use crate::{
    browser::FetchTransport,
    fields::{TextField, bind, reveal_first_error},
    layout::LoadingSpinner,
    router::use_router,
};

/// Contact form with an optional attachment.
///
/// A successful send moves to the thank-you page; any failure keeps the
/// form (and the chosen file) as it was and shows the server's message.
#[component]
pub fn Contact() -> impl IntoView {
    let router = use_router();
    let form = RwSignal::new(ContactForm::default());
    let errors = RwSignal::new(FieldErrors::new());
    let sending = RwSignal::new(false);
    let failure = RwSignal::new(None::<String>);
    let file_input = NodeRef::<leptos::html::Input>::new();

    let name = bind(form, errors, "name", |f| &f.name, |f| &mut f.name);
    let email = bind(form, errors, "email", |f| &f.email, |f| &mut f.email);
    let subject = bind(form, errors, "subject", |f| &f.subject, |f| &mut f.subject);
    let message = bind(form, errors, "message", |f| &f.message, |f| &mut f.message);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if sending.get_untracked() {
            return;
        }

        let contact = form.get_untracked();
        let attachment = file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));

        failure.set(None);
        sending.set(true);
        spawn_local(async move {
            let outcome = submit(&contact, &FetchTransport, attachment.as_ref(), || {
                router.navigate(Route::ThankYou.path());
            })
            .await;

            match outcome {
                // The route changed and this section is gone.
                SubmitOutcome::Sent => {}
                SubmitOutcome::Invalid(found) => {
                    sending.set(false);
                    reveal_first_error(&found, "contact");
                    errors.set(found);
                }
                SubmitOutcome::Failed(message) => {
                    sending.set(false);
                    failure.set(Some(message));
                }
            }
        });
    };

    view! {
      <section id="contact" class="section">
        <div class="container narrow">
          <div class="section-title">
            <h2>"Contactez-nous"</h2>
            <p>"Parlez-nous de votre projet, nous vous répondons sous 48 heures."</p>
          </div>
          <form class="form card" novalidate=true on:submit=on_submit>
            <div class="form-row">
              <TextField id="contact-name".to_string() label="Nom" bound=name placeholder="Votre nom" />
              <TextField
                id="contact-email".to_string()
                label="Adresse e-mail"
                bound=email
                kind="email"
                placeholder="Votre e-mail"
              />
            </div>
            <TextField id="contact-subject".to_string() label="Sujet" bound=subject />
            <TextField
              id="contact-message".to_string()
              label="Message"
              bound=message
              multiline=true
            />
            <div class="field">
              <label for="contact-attachment" class="field-label">
                "Pièce jointe (optionnel)"
              </label>
              <input
                type="file"
                id="contact-attachment"
                name="attachment"
                class="field-input"
                node_ref=file_input
              />
            </div>
            <Show when=move || failure.with(Option::is_some)>
              <p class="form-error" role="alert">
                {move || failure.get().unwrap_or_default()}
              </p>
            </Show>
            <button type="submit" class="btn btn-primary btn-block" disabled=move || sending.get()>
              <Show when=move || sending.get() fallback=|| "Envoyer le message">
                <LoadingSpinner />
              </Show>
            </button>
          </form>
        </div>
      </section>
    }
}
