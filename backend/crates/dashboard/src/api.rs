//! Reqwest-backed client for the feedback API.
//!
//! Owns transport details only: URL assembly, the bearer credential header,
//! status mapping, and JSON decoding. There is no login endpoint to call, so
//! "logging in" is [`FeedbackApi::verify_secret`] — a list request that
//! either succeeds or comes back 401.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::form::SubmitFeedbackBody;
use crate::record::FeedbackRecord;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Failures surfaced by the API client.
///
/// A failed call never touches caller state: the dashboard keeps its
/// previous record set on a failed fetch and keeps the record on a failed
/// delete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiClientError {
    /// The request never produced a response.
    #[error("request failed: {message}")]
    Transport {
        /// Underlying failure description.
        message: String,
    },
    /// The server rejected the admin credential.
    #[error("admin credential rejected")]
    Unauthorized,
    /// The server does not know the targeted record.
    #[error("no such feedback record")]
    NotFound,
    /// Any other non-success status.
    #[error("unexpected status {status}")]
    UnexpectedStatus {
        /// The status code received.
        status: u16,
    },
    /// The response body did not parse.
    #[error("response body malformed: {message}")]
    Decode {
        /// Underlying failure description.
        message: String,
    },
}

/// HTTP client bound to one deployment of the feedback service.
#[derive(Debug, Clone)]
pub struct FeedbackApi {
    client: Client,
    base_url: Url,
}

impl FeedbackApi {
    /// Build a client for the service at `base_url`.
    ///
    /// # Errors
    /// Returns an error when the underlying HTTP client cannot be
    /// constructed.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base_url })
    }

    /// Submit one feedback record; no credential required.
    ///
    /// # Errors
    /// Maps transport failures and non-2xx statuses to [`ApiClientError`].
    pub async fn submit_feedback(&self, body: &SubmitFeedbackBody) -> Result<(), ApiClientError> {
        let response = self
            .client
            .post(self.endpoint("/api/submit-feedback")?)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        expect_success(response.status())
    }

    /// Fetch every record, newest first. Requires the admin credential.
    ///
    /// # Errors
    /// Maps transport failures, non-2xx statuses, and undecodable bodies to
    /// [`ApiClientError`].
    pub async fn list_feedbacks(
        &self,
        secret: &str,
    ) -> Result<Vec<FeedbackRecord>, ApiClientError> {
        let response = self
            .client
            .get(self.endpoint("/api/feedbacks")?)
            .bearer_auth(secret)
            .send()
            .await
            .map_err(map_transport_error)?;
        expect_success(response.status())?;
        response
            .json()
            .await
            .map_err(|err| ApiClientError::Decode {
                message: err.to_string(),
            })
    }

    /// Delete one record by identifier. Requires the admin credential.
    ///
    /// # Errors
    /// Maps transport failures and non-2xx statuses to [`ApiClientError`];
    /// an unknown identifier comes back as [`ApiClientError::NotFound`].
    pub async fn delete_feedback(&self, secret: &str, id: &str) -> Result<(), ApiClientError> {
        let response = self
            .client
            .delete(self.endpoint(&format!("/api/feedbacks/{id}"))?)
            .bearer_auth(secret)
            .send()
            .await
            .map_err(map_transport_error)?;
        expect_success(response.status())
    }

    /// Prove a candidate secret against the list endpoint.
    ///
    /// Returns `Ok(true)` when the secret unlocks the listing, `Ok(false)`
    /// when the server answers 401, and an error for anything else — a dead
    /// server must not read as a wrong password.
    ///
    /// # Errors
    /// Propagates every failure other than a clean 401.
    pub async fn verify_secret(&self, secret: &str) -> Result<bool, ApiClientError> {
        match self.list_feedbacks(secret).await {
            Ok(_) => Ok(true),
            Err(ApiClientError::Unauthorized) => Ok(false),
            Err(err) => Err(err),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiClientError::Transport {
                message: err.to_string(),
            })
    }
}

fn map_transport_error(err: reqwest::Error) -> ApiClientError {
    ApiClientError::Transport {
        message: err.to_string(),
    }
}

fn expect_success(status: StatusCode) -> Result<(), ApiClientError> {
    if status.is_success() {
        return Ok(());
    }
    Err(match status {
        StatusCode::UNAUTHORIZED => ApiClientError::Unauthorized,
        StatusCode::NOT_FOUND => ApiClientError::NotFound,
        other => ApiClientError::UnexpectedStatus {
            status: other.as_u16(),
        },
    })
}
