//! Project questionnaire page, posted to the external form service.

use leptos::{ev, prelude::*, task::spawn_local};
use telya_core::{
    FieldErrors, QuestionnaireForm, QuestionnaireSubmission, Route, SubmitOutcome,
    form::{BUDGETS, ESTABLISHMENT_TYPES, OBJECTIVES},
    submit,
};

use crate::{
    browser::FetchTransport,
    dom,
    fields::{FieldError, SelectField, TextField, bind, clear_error, error_for, reveal_first_error},
    layout::{LoadingSpinner, Logo},
    router::use_router,
};

#[component]
fn Step(number: u8, title: &'static str, children: Children) -> impl IntoView {
    view! {
      <fieldset class="step">
        <legend class="step-title">{format!("{number}. {title}")}</legend>
        {children()}
      </fieldset>
    }
}

/// Four-step lead questionnaire.
#[component]
pub fn QuestionnairePage() -> impl IntoView {
    let router = use_router();
    let form = RwSignal::new(QuestionnaireForm::default());
    let errors = RwSignal::new(FieldErrors::new());
    let sending = RwSignal::new(false);
    let failure = RwSignal::new(None::<String>);

    let company = bind(
        form,
        errors,
        "companyName",
        |f| &f.company_name,
        |f| &mut f.company_name,
    );
    let kind = bind(
        form,
        errors,
        "establishmentType",
        |f| &f.establishment_type,
        |f| &mut f.establishment_type,
    );
    let budget = bind(form, errors, "budget", |f| &f.budget, |f| &mut f.budget);
    let name = bind(form, errors, "name", |f| &f.name, |f| &mut f.name);
    let email = bind(form, errors, "email", |f| &f.email, |f| &mut f.email);
    let phone = bind(form, errors, "phone", |f| &f.phone, |f| &mut f.phone);
    let objectives_error = error_for(errors, "objectives");

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if sending.get_untracked() {
            return;
        }

        let answers = form.get_untracked();
        let origin = dom::origin();
        failure.set(None);
        sending.set(true);
        spawn_local(async move {
            let submission = QuestionnaireSubmission {
                form: &answers,
                origin: &origin,
            };
            let outcome = submit(&submission, &FetchTransport, None, || {
                router.navigate(Route::ThankYou.path());
            })
            .await;

            match outcome {
                SubmitOutcome::Sent => {}
                SubmitOutcome::Invalid(found) => {
                    sending.set(false);
                    reveal_first_error(&found, "");
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
      <div class="questionnaire page-muted">
        <div class="container narrow">
          <header class="questionnaire-header">
            <a href="/">
              <Logo class="logo-medium" />
            </a>
            <h1>"Prêt à décoller ?"</h1>
            <p>
              "Remplissez ce questionnaire pour nous aider à mieux comprendre vos besoins. Cela ne prend que 2 minutes !"
            </p>
          </header>

          <form class="form card" novalidate=true on:submit=on_submit>
            <Step number=1 title="À propos de votre établissement">
              <TextField
                id="companyName".to_string()
                label="Nom de l'établissement"
                bound=company
                placeholder="Ex: Hôtel Le Grand Panorama"
              />
              <SelectField
                id="establishmentType".to_string()
                label="Type d'établissement"
                bound=kind
                placeholder="Sélectionnez un type"
                options=&ESTABLISHMENT_TYPES
              />
            </Step>

            <div id="objectives-section">
              <Step number=2 title="Vos objectifs">
                <p class="field-label">
                  "Quels sont vos principaux objectifs ? (plusieurs choix possibles)"
                </p>
                {OBJECTIVES
                  .iter()
                  .map(|&objective| {
                    view! {
                      <label class="checkbox">
                        <input
                          type="checkbox"
                          name="objectives"
                          value=objective
                          prop:checked=move || {
                            form.with(|f| f.objectives.iter().any(|o| o == objective))
                          }
                          on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            form.update(|f| f.toggle_objective(objective, checked));
                            clear_error(errors, "objectives");
                          }
                        />
                        <span>{objective}</span>
                      </label>
                    }
                  })
                  .collect_view()}
                <FieldError error=objectives_error />
              </Step>
            </div>

            <Step number=3 title="Votre budget">
              <SelectField
                id="budget".to_string()
                label="Quelle est votre estimation de budget marketing mensuel ?"
                bound=budget
                placeholder="Sélectionnez une fourchette de prix"
                options=&BUDGETS
              />
            </Step>

            <Step number=4 title="Vos coordonnées">
              <div class="form-row">
                <TextField
                  id="name".to_string()
                  label="Votre nom complet"
                  bound=name
                  placeholder="Votre nom"
                />
                <TextField
                  id="email".to_string()
                  label="Votre adresse e-mail"
                  bound=email
                  kind="email"
                  placeholder="Votre e-mail"
                />
              </div>
              <TextField
                id="phone".to_string()
                label="Votre numéro de téléphone (optionnel)"
                bound=phone
                kind="tel"
                placeholder="06 12 34 56 78"
              />
            </Step>

            <Show when=move || failure.with(Option::is_some)>
              <p class="form-error" role="alert">
                {move || failure.get().unwrap_or_default()}
              </p>
            </Show>
            <div class="form-actions">
              <button type="submit" class="btn btn-primary btn-large" disabled=move || sending.get()>
                <Show when=move || sending.get() fallback=|| "Envoyer ma demande de projet">
                  <LoadingSpinner />
                </Show>
              </button>
            </div>
          </form>
        </div>
      </div>
    }
}
