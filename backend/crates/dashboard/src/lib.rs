//! Client-side logic for the feedback admin dashboard and submission form.
//!
//! The dashboard fetches the full record set once and derives everything
//! else locally: a filtered, sorted, paginated view; aggregate statistics;
//! and a CSV export of the current view. This crate holds that pipeline as
//! plain functions over in-memory data, plus the submission-form validation
//! and a thin HTTP client, so a rendering layer only has to display state.

pub mod api;
pub mod export;
pub mod form;
pub mod record;
pub mod stats;
pub mod view;

pub use api::{ApiClientError, FeedbackApi};
pub use export::{export_filename, to_csv};
pub use form::{FieldErrors, FormInput, SubmitFeedbackBody};
pub use record::{Category, FeedbackRecord};
pub use stats::DashboardStats;
pub use view::{
    derive_view, CategoryFilter, Dashboard, DashboardQuery, SortDirection, SortField, PAGE_SIZE,
};
