//! Lead-capture forms, client-side validation and the relay wire payload.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Mailbox that receives questionnaire and portfolio requests.
pub const AGENCY_EMAIL: &str = "telyaagency@gmail.com";

/// Check an address against the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Per-field validation messages, kept in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(&'static str, String)>,
}

impl FieldErrors {
    /// Create an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for a field, replacing any previous one.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        let message = message.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = message,
            None => self.entries.push((field, message)),
        }
    }

    /// Message for a field, if it is invalid.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    /// Drop the error for a field once the user edits it.
    pub fn clear(&mut self, field: &str) {
        self.entries.retain(|(f, _)| *f != field);
    }

    /// First invalid field in form order; the UI focuses it.
    pub fn first(&self) -> Option<&'static str> {
        self.entries.first().map(|(f, _)| *f)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over `(field, message)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message);
    }
}

fn require_email(errors: &mut FieldErrors, field: &'static str, value: &str, missing: &str) {
    if value.trim().is_empty() {
        errors.insert(field, missing);
    } else if !is_valid_email(value) {
        errors.insert(field, "L'adresse e-mail n'est pas valide.");
    }
}

/// Contact section form, relayed by `/api/send-email`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Validate every required field.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Le nom est requis.");
        require_email(&mut errors, "email", &self.email, "L'e-mail est requis.");
        require(&mut errors, "subject", &self.subject, "Le sujet est requis.");
        require(&mut errors, "message", &self.message, "Le message est requis.");
        errors
    }

    /// Build the relay payload with the message rendered as HTML.
    pub fn to_payload(&self) -> EmailPayload {
        let body = html_escape(self.message.trim()).replace('\n', "<br>");
        let html_content = format!(
            "<h2>Nouveau message depuis le site</h2>\
             <p><strong>Nom :</strong> {}</p>\
             <p><strong>E-mail :</strong> {}</p>\
             <p>{}</p>",
            html_escape(self.name.trim()),
            html_escape(self.email.trim()),
            body
        );
        EmailPayload {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            html_content,
            company_name: None,
            extra: Map::new(),
        }
    }
}

/// Establishment types offered in the questionnaire.
pub const ESTABLISHMENT_TYPES: [&str; 6] = [
    "Hôtel",
    "Restaurant / Café",
    "Agence de voyage / Tour Opérateur",
    "Activité de loisir",
    "Office de tourisme",
    "Autre",
];

/// Marketing objectives offered in the questionnaire.
pub const OBJECTIVES: [&str; 7] = [
    "Augmenter les réservations directes",
    "Améliorer la visibilité en ligne (SEO)",
    "Développer notre communauté sur les réseaux sociaux",
    "Créer du contenu de qualité (photos/vidéos)",
    "Refonte de notre site web",
    "Lancer des campagnes publicitaires",
    "Autre (à préciser dans le message)",
];

/// Monthly budget ranges offered in the questionnaire.
pub const BUDGETS: [&str; 6] = [
    "Moins de 500€",
    "500€ - 1,500€",
    "1,500€ - 3,000€",
    "3,000€ - 5,000€",
    "Plus de 5,000€",
    "Je ne sais pas encore",
];

/// Project questionnaire posted straight to the form service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireForm {
    pub company_name: String,
    pub establishment_type: String,
    pub objectives: Vec<String>,
    pub budget: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl QuestionnaireForm {
    /// Add or remove an objective.
    pub fn toggle_objective(&mut self, objective: &str, checked: bool) {
        let present = self.objectives.iter().any(|o| o == objective);
        if checked && !present {
            self.objectives.push(objective.to_string());
        } else if !checked {
            self.objectives.retain(|o| o != objective);
        }
    }

    /// Validate every required field; phone is optional.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(
            &mut errors,
            "companyName",
            &self.company_name,
            "Le nom de l'établissement est requis.",
        );
        require(
            &mut errors,
            "establishmentType",
            &self.establishment_type,
            "Le type d'établissement est requis.",
        );
        if self.objectives.is_empty() {
            errors.insert("objectives", "Veuillez sélectionner au moins un objectif.");
        }
        require(&mut errors, "budget", &self.budget, "Le budget est requis.");
        require(&mut errors, "name", &self.name, "Votre nom est requis.");
        require_email(
            &mut errors,
            "email",
            &self.email,
            "L'adresse e-mail est requise.",
        );
        errors
    }

    /// Form-data fields, including the form service control fields.
    pub fn to_fields(&self, next_url: &str) -> Vec<(String, String)> {
        let mut fields = vec![
            (
                "_subject".to_string(),
                format!("Nouveau projet de {}", self.company_name.trim()),
            ),
            ("_captcha".to_string(), "false".to_string()),
            ("_next".to_string(), next_url.to_string()),
            (
                "_autoresponse".to_string(),
                "Merci pour votre intérêt ! Votre projet a bien été soumis. Notre équipe vous \
                 recontactera très prochainement pour discuter des prochaines étapes."
                    .to_string(),
            ),
            ("companyName".to_string(), self.company_name.trim().to_string()),
            (
                "establishmentType".to_string(),
                self.establishment_type.clone(),
            ),
        ];
        fields.extend(
            self.objectives
                .iter()
                .map(|o| ("objectives".to_string(), o.clone())),
        );
        fields.push(("budget".to_string(), self.budget.clone()));
        fields.push(("name".to_string(), self.name.trim().to_string()));
        fields.push(("email".to_string(), self.email.trim().to_string()));
        fields.push(("phone".to_string(), self.phone.trim().to_string()));
        fields
    }
}

/// Portfolio access request, delivered through the visitor's mail client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRequest {
    pub name: String,
    pub email: String,
    pub company_name: String,
}

impl PortfolioRequest {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Le nom est requis.");
        require_email(&mut errors, "email", &self.email, "L'e-mail est requis.");
        require(
            &mut errors,
            "companyName",
            &self.company_name,
            "Le nom de l'établissement est requis.",
        );
        errors
    }

    /// `mailto:` link with a prefilled subject and body.
    pub fn mailto_link(&self) -> String {
        let who = if self.company_name.trim().is_empty() {
            self.name.trim()
        } else {
            self.company_name.trim()
        };
        let subject = format!("Demande de Portfolio de {who}");
        let body = format!(
            "Bonjour,\n\nJe suis intéressé(e) et je souhaiterais voir votre portfolio complet.\n\n\
             Nom: {}\nEmail: {}\nÉtablissement: {}\n",
            self.name.trim(),
            self.email.trim(),
            self.company_name.trim()
        );
        format!(
            "mailto:{AGENCY_EMAIL}?subject={}&body={}",
            urlencoding::encode(&subject),
            urlencoding::encode(&body)
        )
    }
}

/// JSON body accepted by `POST /api/send-email`.
///
/// Unknown fields are kept in `extra` so form-oriented providers receive
/// everything the client sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default, rename = "htmlContent")]
    pub html_content: String,
    #[serde(
        default,
        rename = "companyName",
        skip_serializing_if = "Option::is_none"
    )]
    pub company_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EmailPayload {
    /// Fields an email-sending provider cannot do without.
    pub const EMAIL_FIELDS: &'static [&'static str] = &["name", "email", "subject", "htmlContent"];

    /// Names of [`Self::EMAIL_FIELDS`] that are absent or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.missing_among(Self::EMAIL_FIELDS)
    }

    /// Names from `required` that are absent or blank, in `required` order.
    ///
    /// Fields outside the four known ones are looked up in `extra`; a
    /// non-string value counts as present.
    pub fn missing_among(&self, required: &[&'static str]) -> Vec<&'static str> {
        required
            .iter()
            .copied()
            .filter(|field| match *field {
                "name" => self.name.trim().is_empty(),
                "email" => self.email.trim().is_empty(),
                "subject" => self.subject.trim().is_empty(),
                "htmlContent" => self.html_content.trim().is_empty(),
                "companyName" => self
                    .company_name
                    .as_deref()
                    .is_none_or(|value| value.trim().is_empty()),
                other => match self.extra.get(other) {
                    None | Some(Value::Null) => true,
                    Some(Value::String(value)) => value.trim().is_empty(),
                    Some(_) => false,
                },
            })
            .collect()
    }

    /// Flatten into form fields (used for multipart uploads).
    pub fn to_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("name".to_string(), self.name.clone()),
            ("email".to_string(), self.email.clone()),
            ("subject".to_string(), self.subject.clone()),
            ("htmlContent".to_string(), self.html_content.clone()),
        ];
        if let Some(company) = &self.company_name {
            fields.push(("companyName".to_string(), company.clone()));
        }
        for (key, value) in &self.extra {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            fields.push((key.clone(), value));
        }
        fields
    }
}

/// A file uploaded with a submission.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_contact() -> ContactForm {
        ContactForm {
            name: "Sophie Dubois".into(),
            email: "sophie@grand-panorama.fr".into(),
            subject: "Refonte".into(),
            message: "Bonjour,\nNous aimerions discuter.".into(),
        }
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.domain.fr"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@domain"));
        assert!(!is_valid_email("@domain.com"));
        assert!(!is_valid_email("us er@domain.com"));
    }

    #[test]
    fn test_contact_form_valid() {
        assert!(valid_contact().validate().is_empty());
    }

    #[test]
    fn test_contact_form_all_empty() {
        let errors = ContactForm::default().validate();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.first(), Some("name"));
        assert_eq!(errors.get("email"), Some("L'e-mail est requis."));
    }

    #[test]
    fn test_contact_form_whitespace_is_empty() {
        let form = ContactForm {
            name: "   ".into(),
            ..valid_contact()
        };
        assert_eq!(form.validate().get("name"), Some("Le nom est requis."));
    }

    #[test]
    fn test_contact_form_malformed_email() {
        let form = ContactForm {
            email: "sophie.grand-panorama.fr".into(),
            ..valid_contact()
        };
        let errors = form.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("email"), Some("L'adresse e-mail n'est pas valide."));
    }

    #[test]
    fn test_contact_payload_escapes_html() {
        let form = ContactForm {
            message: "<script>alert(1)</script>\nligne 2".into(),
            ..valid_contact()
        };
        let payload = form.to_payload();
        assert!(payload.html_content.contains("&lt;script&gt;"));
        assert!(payload.html_content.contains("<br>ligne 2"));
        assert!(payload.missing_fields().is_empty());
    }

    #[test]
    fn test_field_errors_clear_and_replace() {
        let mut errors = FieldErrors::new();
        errors.insert("name", "a");
        errors.insert("email", "b");
        errors.insert("name", "c");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("name"), Some("c"));

        errors.clear("name");
        assert_eq!(errors.first(), Some("email"));
        assert!(errors.get("name").is_none());
    }

    #[test]
    fn test_questionnaire_requires_objective() {
        let mut form = QuestionnaireForm {
            company_name: "Hôtel Le Grand Panorama".into(),
            establishment_type: ESTABLISHMENT_TYPES[0].into(),
            budget: BUDGETS[1].into(),
            name: "Sophie".into(),
            email: "sophie@panorama.fr".into(),
            ..QuestionnaireForm::default()
        };
        let errors = form.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first(), Some("objectives"));

        form.toggle_objective(OBJECTIVES[0], true);
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_questionnaire_toggle_objective() {
        let mut form = QuestionnaireForm::default();
        form.toggle_objective(OBJECTIVES[0], true);
        form.toggle_objective(OBJECTIVES[0], true);
        form.toggle_objective(OBJECTIVES[2], true);
        assert_eq!(form.objectives.len(), 2);

        form.toggle_objective(OBJECTIVES[0], false);
        assert_eq!(form.objectives, vec![OBJECTIVES[2].to_string()]);
    }

    #[test]
    fn test_questionnaire_fields() {
        let form = QuestionnaireForm {
            company_name: "Aventures Nomades".into(),
            objectives: vec![OBJECTIVES[1].into(), OBJECTIVES[5].into()],
            ..QuestionnaireForm::default()
        };
        let fields = form.to_fields("https://telyaagency.com/thank-you");

        assert!(fields.contains(&(
            "_subject".to_string(),
            "Nouveau projet de Aventures Nomades".to_string()
        )));
        assert!(fields.contains(&("_captcha".to_string(), "false".to_string())));
        assert_eq!(fields.iter().filter(|(k, _)| k == "objectives").count(), 2);
    }

    #[test]
    fn test_portfolio_request_mailto() {
        let request = PortfolioRequest {
            name: "Marc".into(),
            email: "marc@nomades.fr".into(),
            company_name: "Aventures Nomades".into(),
        };
        assert!(request.validate().is_empty());

        let link = request.mailto_link();
        assert!(link.starts_with("mailto:telyaagency@gmail.com?subject="));
        assert!(link.contains("Aventures%20Nomades"));
        assert!(!link.contains(' '));
        assert!(!link.contains('\n'));
    }

    #[test]
    fn test_portfolio_request_requires_company() {
        let request = PortfolioRequest {
            name: "Marc".into(),
            email: "marc@nomades.fr".into(),
            company_name: String::new(),
        };
        assert_eq!(request.validate().first(), Some("companyName"));
    }

    #[test]
    fn test_payload_missing_fields() {
        let payload: EmailPayload =
            serde_json::from_str(r#"{"name":"A","subject":"  "}"#).unwrap();
        assert_eq!(
            payload.missing_fields(),
            vec!["email", "subject", "htmlContent"]
        );
    }

    #[test]
    fn test_payload_missing_among_custom_set() {
        let payload: EmailPayload = serde_json::from_str(
            r#"{"name":"Marc","email":"marc@nomades.fr","companyName":"Aventures Nomades","budget":"  "}"#,
        )
        .unwrap();
        assert!(payload.missing_among(&[]).is_empty());
        assert!(payload.missing_among(&["email", "companyName"]).is_empty());
        assert_eq!(payload.missing_among(&["budget", "phone"]), vec!["budget", "phone"]);
        assert_eq!(payload.missing_fields(), vec!["subject", "htmlContent"]);
    }

    #[test]
    fn test_payload_keeps_extra_fields() {
        let payload: EmailPayload = serde_json::from_str(
            r#"{"name":"A","email":"a@b.co","subject":"S","htmlContent":"<p>x</p>","budget":"Moins de 500€"}"#,
        )
        .unwrap();
        assert!(payload.missing_fields().is_empty());
        assert_eq!(payload.extra["budget"], "Moins de 500€");

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["htmlContent"], "<p>x</p>");
        assert_eq!(json["budget"], "Moins de 500€");
        assert!(json.get("companyName").is_none());
    }

    #[test]
    fn test_payload_to_fields() {
        let mut payload = valid_contact().to_payload();
        payload.company_name = Some("Panorama".into());
        let fields = payload.to_fields();
        assert_eq!(fields[0], ("name".to_string(), "Sophie Dubois".to_string()));
        assert!(fields.contains(&("companyName".to_string(), "Panorama".to_string())));
    }
}
