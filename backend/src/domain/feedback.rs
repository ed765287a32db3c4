//! Feedback record model.
//!
//! A record is immutable once stored: there is no update operation anywhere
//! in the service, so `updated_at` stays equal to `created_at` for the whole
//! lifetime of a record.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by the feedback constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackValidationError {
    /// The identifier string is empty.
    EmptyId,
    /// The identifier string is not a UUID.
    InvalidId,
    /// The author name is empty once trimmed.
    EmptyName,
    /// The author email is empty once trimmed.
    EmptyEmail,
    /// The message body is empty once trimmed.
    EmptyMessage,
}

impl fmt::Display for FeedbackValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "feedback id must not be empty"),
            Self::InvalidId => write!(f, "feedback id must be a valid UUID"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyMessage => write!(f, "message must not be empty"),
        }
    }
}

impl std::error::Error for FeedbackValidationError {}

/// Stable record identifier, assigned by the store at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeedbackId(Uuid);

impl FeedbackId {
    /// Validate and construct a [`FeedbackId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, FeedbackValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(FeedbackValidationError::EmptyId);
        }
        let parsed = Uuid::parse_str(raw).map_err(|_| FeedbackValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for FeedbackId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<FeedbackId> for String {
    fn from(value: FeedbackId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for FeedbackId {
    type Error = FeedbackValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Feedback category. Anything the service does not recognise is treated as
/// [`Category::General`], matching what the dashboard does for display.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// General feedback.
    #[default]
    General,
    /// Bug report.
    Bug,
    /// Feature request.
    Feature,
    /// Praise.
    Praise,
}

impl Category {
    /// Parse a raw category, falling back to [`Category::General`] for
    /// unknown values.
    pub fn parse_or_general(raw: &str) -> Self {
        match raw {
            "bug" => Self::Bug,
            "feature" => Self::Feature,
            "praise" => Self::Praise,
            _ => Self::General,
        }
    }

    /// Wire representation of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Bug => "bug",
            Self::Feature => "feature",
            Self::Praise => "praise",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! non_empty_text {
    ($(#[$doc:meta])* $name:ident, $error:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct from owned input.
            pub fn new(value: impl Into<String>) -> Result<Self, FeedbackValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(FeedbackValidationError::$error);
                }
                Ok(Self(value))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = FeedbackValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

non_empty_text!(
    /// Name the visitor signed the feedback with.
    AuthorName,
    EmptyName
);
non_empty_text!(
    /// Contact email as submitted. The public form owns the shape check;
    /// the service only requires the field to be present.
    AuthorEmail,
    EmptyEmail
);
non_empty_text!(
    /// Free-form feedback text.
    MessageBody,
    EmptyMessage
);

/// A validated feedback submission that has not been stored yet.
///
/// The store assigns the identifier and timestamps on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    name: AuthorName,
    email: AuthorEmail,
    message: MessageBody,
    category: Category,
}

impl NewFeedback {
    /// Build a submission from validated components.
    pub fn new(
        name: AuthorName,
        email: AuthorEmail,
        message: MessageBody,
        category: Category,
    ) -> Self {
        Self {
            name,
            email,
            message,
            category,
        }
    }

    /// Fallible constructor from raw request input. An absent or unknown
    /// category falls back to [`Category::General`].
    pub fn try_from_parts(
        name: &str,
        email: &str,
        message: &str,
        category: Option<&str>,
    ) -> Result<Self, FeedbackValidationError> {
        Ok(Self {
            name: AuthorName::new(name)?,
            email: AuthorEmail::new(email)?,
            message: MessageBody::new(message)?,
            category: category.map_or_else(Category::default, Category::parse_or_general),
        })
    }

    /// Author name.
    pub fn name(&self) -> &AuthorName {
        &self.name
    }

    /// Author email.
    pub fn email(&self) -> &AuthorEmail {
        &self.email
    }

    /// Message body.
    pub fn message(&self) -> &MessageBody {
        &self.message
    }

    /// Submission category.
    pub fn category(&self) -> Category {
        self.category
    }
}

/// A stored feedback record.
///
/// ## Invariants
/// - `id` is unique and never changes.
/// - `name`, `email`, and `message` are non-empty.
/// - `category` is one of the four known values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "FeedbackDto", into = "FeedbackDto")]
pub struct Feedback {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: FeedbackId,
    #[schema(value_type = String, example = "Jane Doe")]
    name: AuthorName,
    #[schema(value_type = String, example = "jane@example.com")]
    email: AuthorEmail,
    #[schema(value_type = String, example = "Love the new search box.")]
    message: MessageBody,
    #[schema(value_type = String, example = "praise")]
    category: Category,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Feedback {
    /// Assemble a record from validated components.
    pub fn new(
        id: FeedbackId,
        submission: NewFeedback,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let NewFeedback {
            name,
            email,
            message,
            category,
        } = submission;
        Self {
            id,
            name,
            email,
            message,
            category,
            created_at,
            updated_at,
        }
    }

    /// Stable record identifier.
    pub fn id(&self) -> &FeedbackId {
        &self.id
    }

    /// Author name.
    pub fn name(&self) -> &AuthorName {
        &self.name
    }

    /// Author email.
    pub fn email(&self) -> &AuthorEmail {
        &self.email
    }

    /// Message body.
    pub fn message(&self) -> &MessageBody {
        &self.message
    }

    /// Record category.
    pub fn category(&self) -> Category {
        self.category
    }

    /// When the store created the record.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the store last touched the record; equal to [`Feedback::created_at`]
    /// because records are never modified.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackDto {
    id: String,
    name: String,
    email: String,
    message: String,
    category: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<Feedback> for FeedbackDto {
    fn from(value: Feedback) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.into(),
            email: value.email.into(),
            message: value.message.into(),
            category: value.category.as_str().to_owned(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl TryFrom<FeedbackDto> for Feedback {
    type Error = FeedbackValidationError;

    fn try_from(value: FeedbackDto) -> Result<Self, Self::Error> {
        let FeedbackDto {
            id,
            name,
            email,
            message,
            category,
            created_at,
            updated_at,
        } = value;
        Ok(Self {
            id: FeedbackId::new(id)?,
            name: AuthorName::new(name)?,
            email: AuthorEmail::new(email)?,
            message: MessageBody::new(message)?,
            category: Category::parse_or_general(&category),
            created_at,
            updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> Feedback {
        let submission =
            NewFeedback::try_from_parts("Jane Doe", "jane@example.com", "Hello", Some("bug"))
                .expect("valid submission");
        let at = Utc::now();
        Feedback::new(FeedbackId::random(), submission, at, at)
    }

    #[rstest]
    #[case("", "a@b.c", "hi", FeedbackValidationError::EmptyName)]
    #[case("  ", "a@b.c", "hi", FeedbackValidationError::EmptyName)]
    #[case("Jane", "", "hi", FeedbackValidationError::EmptyEmail)]
    #[case("Jane", "a@b.c", " ", FeedbackValidationError::EmptyMessage)]
    fn submissions_reject_blank_fields(
        #[case] name: &str,
        #[case] email: &str,
        #[case] message: &str,
        #[case] expected: FeedbackValidationError,
    ) {
        let err = NewFeedback::try_from_parts(name, email, message, None)
            .expect_err("submission should fail validation");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case(None, Category::General)]
    #[case(Some("feature"), Category::Feature)]
    #[case(Some("no-such-category"), Category::General)]
    fn category_defaults_and_coerces(#[case] raw: Option<&str>, #[case] expected: Category) {
        let submission = NewFeedback::try_from_parts("Jane", "jane@example.com", "hi", raw)
            .expect("valid submission");
        assert_eq!(submission.category(), expected);
    }

    #[rstest]
    fn serialises_camel_case_timestamps() {
        let json = serde_json::to_value(sample()).expect("serialise record");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[rstest]
    fn round_trips_through_wire_format() {
        let record = sample();
        let json = serde_json::to_string(&record).expect("serialise record");
        let back: Feedback = serde_json::from_str(&json).expect("deserialise record");
        assert_eq!(back, record);
    }

    #[rstest]
    fn rejects_invalid_identifier() {
        assert_eq!(
            FeedbackId::new("not-a-uuid"),
            Err(FeedbackValidationError::InvalidId)
        );
    }
}
