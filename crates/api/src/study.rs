//! The three session operations the review loop drives.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use study_core::{DeckId, DueCard, Progress, Rating, SessionId, SessionState, UserId};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Remote collaborator that owns session scheduling and state.
///
/// The backend is authoritative: start and grade hand back a complete
/// `SessionState` that replaces whatever the caller held. Implemented by
/// [`ApiClient`] in production; tests drive the review loop with in-memory
/// fakes of this trait.
#[async_trait]
pub trait StudyBackend: Send + Sync {
    /// Open a new session for a user and deck.
    ///
    /// `Ok(None)` means the backend answered without a session state, which
    /// the caller treats as "nothing to study" rather than a failure.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    async fn start_session(
        &self,
        user_id: &UserId,
        deck_id: &DeckId,
    ) -> Result<Option<SessionState>, ApiError>;

    /// Submit a rating for the session's current card and receive the
    /// successor state.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, a non-success status, or a
    /// response without a session state.
    async fn grade_card(
        &self,
        session_id: &SessionId,
        rating: Rating,
    ) -> Result<SessionState, ApiError>;

    /// Close the session. The loop calls this exactly once per session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    async fn end_session(&self, session_id: &SessionId) -> Result<(), ApiError>;
}

#[async_trait]
impl StudyBackend for ApiClient {
    async fn start_session(
        &self,
        user_id: &UserId,
        deck_id: &DeckId,
    ) -> Result<Option<SessionState>, ApiError> {
        let payload = StartSessionRequest { user_id, deck_id };
        let response: SessionStateResponse = self.post("study/session/start", &payload).await?;
        Ok(response.session_state)
    }

    async fn grade_card(
        &self,
        session_id: &SessionId,
        rating: Rating,
    ) -> Result<SessionState, ApiError> {
        let payload = GradeCardRequest { session_id, rating };
        let response: SessionStateResponse = self.post("study/session/grade", &payload).await?;
        response.session_state.ok_or(ApiError::MissingSessionState)
    }

    async fn end_session(&self, session_id: &SessionId) -> Result<(), ApiError> {
        let payload = EndSessionRequest { session_id };
        self.post_ack("study/session/end", &payload).await
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StartSessionRequest<'a> {
    user_id: &'a UserId,
    deck_id: &'a DeckId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GradeCardRequest<'a> {
    session_id: &'a SessionId,
    rating: Rating,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EndSessionRequest<'a> {
    session_id: &'a SessionId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionStateResponse {
    #[serde(default)]
    session_state: Option<SessionState>,
}

//
// ─── IN-MEMORY BACKEND ─────────────────────────────────────────────────────────
//

/// One recorded call against [`InMemoryBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Start { user_id: UserId, deck_id: DeckId },
    Grade { session_id: SessionId, rating: Rating },
    End { session_id: SessionId },
}

/// In-memory implementation of [`StudyBackend`] for testing and prototyping.
///
/// Behaves like the real service: `start_session` hands out a state holding
/// the first queued card, each `grade_card` appends to the progress record
/// and moves to the next card, and the current card goes absent once the
/// queue is drained. Every call is recorded for assertions.
#[derive(Debug)]
pub struct InMemoryBackend {
    session_id: Option<SessionId>,
    cards: Mutex<VecDeque<DueCard>>,
    progress: Mutex<Progress>,
    calls: Mutex<Vec<BackendCall>>,
    fail_grades: bool,
}

impl InMemoryBackend {
    /// Backend holding a session with the given cards queued in order.
    #[must_use]
    pub fn new(session_id: SessionId, cards: Vec<DueCard>) -> Self {
        Self {
            session_id: Some(session_id),
            cards: Mutex::new(cards.into()),
            progress: Mutex::new(Progress::default()),
            calls: Mutex::new(Vec::new()),
            fail_grades: false,
        }
    }

    /// Backend whose `start_session` answers without a state at all.
    #[must_use]
    pub fn without_session() -> Self {
        Self {
            session_id: None,
            cards: Mutex::new(VecDeque::new()),
            progress: Mutex::new(Progress::default()),
            calls: Mutex::new(Vec::new()),
            fail_grades: false,
        }
    }

    /// Make every `grade_card` call fail with a server error.
    #[must_use]
    pub fn with_grade_failure(mut self) -> Self {
        self.fail_grades = true;
        self
    }

    /// Everything called so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Number of `end_session` calls received.
    #[must_use]
    pub fn end_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, BackendCall::End { .. }))
            .count()
    }

    /// Number of `grade_card` calls received.
    #[must_use]
    pub fn grade_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, BackendCall::Grade { .. }))
            .count()
    }

    fn record(&self, call: BackendCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn snapshot(&self, session_id: &SessionId) -> SessionState {
        let current_card = self
            .cards
            .lock()
            .ok()
            .and_then(|cards| cards.front().cloned());
        let progress = self
            .progress
            .lock()
            .map(|progress| progress.clone())
            .unwrap_or_default();
        SessionState {
            session_id: session_id.clone(),
            current_card,
            progress,
        }
    }
}

#[async_trait]
impl StudyBackend for InMemoryBackend {
    async fn start_session(
        &self,
        user_id: &UserId,
        deck_id: &DeckId,
    ) -> Result<Option<SessionState>, ApiError> {
        self.record(BackendCall::Start {
            user_id: user_id.clone(),
            deck_id: deck_id.clone(),
        });
        Ok(self.session_id.as_ref().map(|id| self.snapshot(id)))
    }

    async fn grade_card(
        &self,
        session_id: &SessionId,
        rating: Rating,
    ) -> Result<SessionState, ApiError> {
        self.record(BackendCall::Grade {
            session_id: session_id.clone(),
            rating,
        });
        if self.fail_grades {
            return Err(ApiError::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                message: "grade rejected".to_string(),
            });
        }
        if let Ok(mut progress) = self.progress.lock() {
            progress.reviewed += 1;
            progress.grades.push(rating);
        }
        if let Ok(mut cards) = self.cards.lock() {
            cards.pop_front();
        }
        Ok(self.snapshot(session_id))
    }

    async fn end_session(&self, session_id: &SessionId) -> Result<(), ApiError> {
        self.record(BackendCall::End {
            session_id: session_id.clone(),
        });
        Ok(())
    }
}
