//! Wire representation of a feedback record as the dashboard sees it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Known feedback categories with their display labels.
///
/// The server only ever stores these four, but the type stays lenient on
/// input: anything unrecognised reads as [`Category::General`] so a stray
/// value in old data cannot break the dashboard.
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
    /// Every known category, in display order.
    pub const ALL: [Self; 4] = [Self::General, Self::Bug, Self::Feature, Self::Praise];

    /// Parse a raw category, treating unknown values as general.
    pub fn parse_or_general(raw: &str) -> Self {
        match raw {
            "bug" => Self::Bug,
            "feature" => Self::Feature,
            "praise" => Self::Praise,
            _ => Self::General,
        }
    }

    /// Wire keyword for the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Bug => "bug",
            Self::Feature => "feature",
            Self::Praise => "praise",
        }
    }

    /// Label shown in selectors and the category breakdown.
    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "General Feedback",
            Self::Bug => "Bug Report",
            Self::Feature => "Feature Request",
            Self::Praise => "Praise",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One feedback record fetched from the list endpoint.
///
/// Mirrors the JSON the server produces; `category` stays raw because the
/// server may predate the category field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    /// Opaque record identifier.
    pub id: String,
    /// Visitor name.
    pub name: String,
    /// Visitor contact email.
    pub email: String,
    /// Feedback text.
    pub message: String,
    /// Raw category keyword, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// When the server stored the record.
    pub created_at: DateTime<Utc>,
    /// Equal to `created_at`; records are immutable.
    pub updated_at: DateTime<Utc>,
}

impl FeedbackRecord {
    /// Category for display; absent or unknown values read as general.
    pub fn category_or_default(&self) -> Category {
        self.category
            .as_deref()
            .map_or(Category::General, Category::parse_or_general)
    }

    /// Raw category keyword with the display default applied; used where the
    /// dashboard compares categories as strings.
    pub(crate) fn category_key(&self) -> &str {
        self.category.as_deref().unwrap_or("general")
    }
}
