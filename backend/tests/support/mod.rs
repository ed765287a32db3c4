//! Shared test doubles for the HTTP integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use actix_web::web;
use backend::domain::ports::{FeedbackPersistenceError, FeedbackRepository};
use backend::domain::{AdminSecret, Feedback, FeedbackId, NewFeedback};
use backend::inbound::http::state::HttpState;

/// Admin secret wired into every test app.
pub const TEST_SECRET: &str = "test-admin-secret";

#[derive(Default)]
struct State {
    records: Vec<Feedback>,
    inserts: i64,
    failure: Option<FeedbackPersistenceError>,
}

/// In-memory feedback store with deterministic timestamps.
///
/// Each insert is stamped one minute after the previous one from a fixed
/// base, so ordering assertions do not depend on the wall clock.
#[derive(Default)]
pub struct InMemoryFeedbackRepository {
    state: Mutex<State>,
}

impl InMemoryFeedbackRepository {
    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0)
            .single()
            .expect("valid base time")
    }

    /// Make every subsequent store operation fail with the given error.
    #[allow(dead_code, reason = "not every test target injects failures")]
    pub fn fail_with(&self, failure: FeedbackPersistenceError) {
        self.state.lock().expect("state lock").failure = Some(failure);
    }

    fn check_failure(state: &State) -> Result<(), FeedbackPersistenceError> {
        state.failure.clone().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedbackRepository {
    async fn insert(&self, submission: NewFeedback) -> Result<Feedback, FeedbackPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        Self::check_failure(&state)?;
        state.inserts += 1;
        let at = Self::base_time() + Duration::minutes(state.inserts);
        let record = Feedback::new(FeedbackId::random(), submission, at, at);
        state.records.push(record.clone());
        Ok(record)
    }

    async fn list_newest_first(&self) -> Result<Vec<Feedback>, FeedbackPersistenceError> {
        let state = self.state.lock().expect("state lock");
        Self::check_failure(&state)?;
        let mut records = state.records.clone();
        records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(records)
    }

    async fn delete_by_id(&self, id: &FeedbackId) -> Result<bool, FeedbackPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        Self::check_failure(&state)?;
        let before = state.records.len();
        state.records.retain(|record| record.id() != id);
        Ok(state.records.len() != before)
    }
}

/// Build handler state over a fresh in-memory store, returning the store so
/// tests can reach behind the API.
pub fn test_state() -> (Arc<InMemoryFeedbackRepository>, web::Data<HttpState>) {
    let repository = Arc::new(InMemoryFeedbackRepository::default());
    let state = web::Data::new(HttpState::new(
        repository.clone(),
        AdminSecret::new(TEST_SECRET).expect("valid test secret"),
    ));
    (repository, state)
}
