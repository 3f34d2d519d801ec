//! Form controls with inline error display.

use leptos::prelude::*;
use telya_core::FieldErrors;

use crate::dom;

/// Signals wiring one string field of a form signal to a control.
#[derive(Clone, Copy)]
pub struct Bound {
    pub value: Signal<String>,
    pub on_input: Callback<String>,
    pub error: Signal<Option<String>>,
}

/// Bind `field` of `form` through a getter/setter pair.
///
/// Typing clears the field's error.
pub fn bind<F>(
    form: RwSignal<F>,
    errors: RwSignal<FieldErrors>,
    field: &'static str,
    get: fn(&F) -> &String,
    set: fn(&mut F) -> &mut String,
) -> Bound
where
    F: Send + Sync + 'static,
{
    Bound {
        value: Signal::derive(move || form.with(|f| get(f).clone())),
        on_input: Callback::new(move |value: String| {
            form.update(|f| *set(f) = value);
            clear_error(errors, field);
        }),
        error: error_for(errors, field),
    }
}

/// Error message of one field (tracked).
pub fn error_for(errors: RwSignal<FieldErrors>, field: &'static str) -> Signal<Option<String>> {
    Signal::derive(move || errors.with(|e| e.get(field).map(str::to_string)))
}

/// Drop one field's error without notifying when there was none.
pub fn clear_error(errors: RwSignal<FieldErrors>, field: &'static str) {
    if errors.with_untracked(|e| e.get(field).is_some()) {
        errors.update(|e| e.clear(field));
    }
}

/// DOM id of the control for `field`; the objectives checkboxes are
/// addressed through their section.
pub fn element_id(prefix: &str, field: &str) -> String {
    match (field, prefix) {
        ("objectives", _) => "objectives-section".to_string(),
        (field, "") => field.to_string(),
        (field, prefix) => format!("{prefix}-{field}"),
    }
}

/// Scroll to and focus the first invalid control.
pub fn reveal_first_error(errors: &FieldErrors, prefix: &str) {
    if let Some(field) = errors.first() {
        dom::reveal(&element_id(prefix, field));
    }
}

/// Inline error message under a control.
#[component]
pub fn FieldError(error: Signal<Option<String>>) -> impl IntoView {
    move || {
        error
            .get()
            .map(|message| view! { <p class="field-error">{message}</p> })
    }
}

/// Labelled text input or textarea.
#[component]
pub fn TextField(
    /// Element id, also used as the `name`.
    id: String,
    /// Visible label.
    label: &'static str,
    /// Binding to the form field.
    bound: Bound,
    /// Input type.
    #[prop(default = "text")]
    kind: &'static str,
    #[prop(optional)] placeholder: &'static str,
    /// Render a textarea instead of an input.
    #[prop(optional)]
    multiline: bool,
) -> impl IntoView {
    let Bound {
        value,
        on_input,
        error,
    } = bound;
    let invalid = move || error.with(Option::is_some);
    let name = id.clone();
    let label_for = id.clone();

    let control = if multiline {
        view! {
          <textarea
            id=id
            name=name
            rows="5"
            class="field-input"
            class:invalid=invalid
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| on_input.run(event_target_value(&ev))
          ></textarea>
        }
            .into_any()
    } else {
        view! {
          <input
            type=kind
            id=id
            name=name
            class="field-input"
            class:invalid=invalid
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| on_input.run(event_target_value(&ev))
          />
        }
            .into_any()
    };

    view! {
      <div class="field">
        <label for=label_for class="field-label">
          {label}
        </label>
        {control}
        <FieldError error=error />
      </div>
    }
}

/// Labelled select with a placeholder option.
#[component]
pub fn SelectField(
    id: String,
    label: &'static str,
    bound: Bound,
    /// Shown while nothing is selected.
    placeholder: &'static str,
    options: &'static [&'static str],
) -> impl IntoView {
    let Bound {
        value,
        on_input,
        error,
    } = bound;
    let label_for = id.clone();
    let name = id.clone();

    view! {
      <div class="field">
        <label for=label_for class="field-label">
          {label}
        </label>
        <select
          id=id
          name=name
          class="field-input"
          class:invalid=move || error.with(Option::is_some)
          prop:value=move || value.get()
          on:change=move |ev| on_input.run(event_target_value(&ev))
        >
          <option value="">{placeholder}</option>
          {options
            .iter()
            .map(|option| {
              view! {
                <option value=*option selected=move || value.with(|v| v.as_str() == *option)>
                  {*option}
                </option>
              }
            })
            .collect_view()}
        </select>
        <FieldError error=error />
      </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_id_with_prefix() {
        assert_eq!(element_id("contact", "email"), "contact-email");
        assert_eq!(element_id("modal", "companyName"), "modal-companyName");
    }

    #[test]
    fn test_element_id_without_prefix() {
        assert_eq!(element_id("", "budget"), "budget");
    }

    #[test]
    fn test_objectives_use_section_id() {
        assert_eq!(element_id("", "objectives"), "objectives-section");
        assert_eq!(element_id("q", "objectives"), "objectives-section");
    }
}
