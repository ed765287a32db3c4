//! Submission-form validation.
//!
//! Runs before any request leaves the client: on failure the form shows the
//! per-field messages and sends nothing. The server re-checks presence but
//! not the email shape, so this is the only place the pattern is enforced.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::record::Category;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Deliberately loose: one @ with a dotted domain after it.
        let pattern = r"^\S+@\S+\.\S+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Raw form state as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    /// Full name field.
    pub name: String,
    /// Email field.
    pub email: String,
    /// Feedback message field.
    pub message: String,
    /// Selected category; the selector defaults to general.
    pub category: Category,
}

/// Per-field validation messages, mirroring the inline errors the form
/// renders under each input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    /// Error under the name field.
    pub name: Option<String>,
    /// Error under the email field.
    pub email: Option<String>,
    /// Error under the message field.
    pub message: Option<String>,
}

impl FieldErrors {
    /// True when validation passed.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }
}

/// JSON body for `POST /api/submit-feedback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitFeedbackBody {
    /// Visitor name.
    pub name: String,
    /// Visitor contact email.
    pub email: String,
    /// Feedback text.
    pub message: String,
    /// Category keyword, always one of the known four.
    pub category: String,
}

impl FormInput {
    /// Validate the form and, on success, produce the request body.
    ///
    /// # Errors
    /// Returns the per-field messages when any check fails; entered values
    /// are untouched so the form can keep them.
    pub fn validate(&self) -> Result<SubmitFeedbackBody, FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.name.trim().is_empty() {
            errors.name = Some("Full name is required.".to_owned());
        }
        if self.email.trim().is_empty() {
            errors.email = Some("Email is required.".to_owned());
        } else if !email_regex().is_match(&self.email) {
            errors.email = Some("Enter a valid email.".to_owned());
        }
        if self.message.trim().is_empty() {
            errors.message = Some("Feedback message is required.".to_owned());
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(SubmitFeedbackBody {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
            category: self.category.as_str().to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn filled() -> FormInput {
        FormInput {
            name: "Jane Doe".to_owned(),
            email: "jane@example.com".to_owned(),
            message: "Works great".to_owned(),
            category: Category::Praise,
        }
    }

    #[test]
    fn a_complete_form_produces_the_request_body() {
        let body = filled().validate().expect("form should validate");
        assert_eq!(body.category, "praise");
        assert_eq!(body.name, "Jane Doe");
    }

    #[test]
    fn body_serialises_the_wire_field_names() {
        let body = filled().validate().expect("form should validate");
        let json = serde_json::to_value(&body).expect("serialise body");
        assert_eq!(
            json.get("category").and_then(serde_json::Value::as_str),
            Some("praise")
        );
        assert!(json.get("name").is_some());
    }

    #[rstest]
    #[case("", Some("Full name is required."))]
    #[case("   ", Some("Full name is required."))]
    #[case("Jane", None)]
    fn name_presence_is_checked(#[case] name: &str, #[case] expected: Option<&str>) {
        let input = FormInput {
            name: name.to_owned(),
            ..filled()
        };
        match input.validate() {
            Ok(_) => assert_eq!(expected, None),
            Err(errors) => assert_eq!(errors.name.as_deref(), expected),
        }
    }

    #[rstest]
    #[case("", "Email is required.")]
    #[case("janeexample.com", "Enter a valid email.")]
    #[case("jane@example", "Enter a valid email.")]
    #[case("jane doe@example.com", "Enter a valid email.")]
    fn email_shape_is_checked(#[case] email: &str, #[case] expected: &str) {
        let input = FormInput {
            email: email.to_owned(),
            ..filled()
        };
        let errors = input.validate().expect_err("email should be rejected");
        assert_eq!(errors.email.as_deref(), Some(expected));
    }

    #[test]
    fn message_presence_is_checked() {
        let input = FormInput {
            message: " ".to_owned(),
            ..filled()
        };
        let errors = input.validate().expect_err("message should be rejected");
        assert_eq!(errors.message.as_deref(), Some("Feedback message is required."));
    }

    #[test]
    fn all_errors_are_reported_together() {
        let errors = FormInput::default()
            .validate()
            .expect_err("empty form should fail");
        assert!(errors.name.is_some());
        assert!(errors.email.is_some());
        assert!(errors.message.is_some());
    }
}
