use std::sync::Arc;

use api::{ApiError, BackendCall, InMemoryBackend};
use services::{ScriptedPrompter, SessionError, SessionLoopService, SessionOutcome};
use study_core::{CardId, DeckId, DueCard, Rating, SessionId, UserId};

fn card(id: &str, term: &str, definition: &str) -> DueCard {
    DueCard::new(CardId::new(id), term, definition)
}

fn user() -> UserId {
    UserId::new("user-7")
}

fn deck() -> DeckId {
    DeckId::new("deck-3")
}

#[tokio::test]
async fn end_to_end_session_grades_once_and_ends_once() {
    let backend = Arc::new(InMemoryBackend::new(
        SessionId::new("sess-1"),
        vec![card("card-a", "하늘", "sky"), card("card-b", "바다", "sea")],
    ));
    let service = SessionLoopService::new(backend.clone());

    // Reveal card A, rate it 3, reveal card B, quit at its rating prompt.
    let mut prompter = ScriptedPrompter::new(["", "3", "", "q"]);
    let report = service
        .run(&mut prompter, &user(), &deck())
        .await
        .unwrap();

    assert_eq!(report.outcome, SessionOutcome::QuitEarly);
    assert_eq!(report.summary.reviewed(), 1);
    assert_eq!(report.summary.average(), Some(3.0));
    assert_eq!(
        backend.calls(),
        vec![
            BackendCall::Start {
                user_id: user(),
                deck_id: deck(),
            },
            BackendCall::Grade {
                session_id: SessionId::new("sess-1"),
                rating: Rating::Good,
            },
            BackendCall::End {
                session_id: SessionId::new("sess-1"),
            },
        ]
    );
}

#[tokio::test]
async fn quitting_at_the_reveal_step_still_ends_the_session() {
    let backend = Arc::new(InMemoryBackend::new(
        SessionId::new("sess-1"),
        vec![card("card-a", "하늘", "sky")],
    ));
    let service = SessionLoopService::new(backend.clone());

    let mut prompter = ScriptedPrompter::new(["q"]);
    let report = service
        .run(&mut prompter, &user(), &deck())
        .await
        .unwrap();

    assert_eq!(report.outcome, SessionOutcome::QuitEarly);
    assert!(report.summary.is_empty());
    assert_eq!(backend.grade_calls(), 0);
    assert_eq!(backend.end_calls(), 1);
}

#[tokio::test]
async fn quitting_at_the_rating_step_still_ends_the_session() {
    let backend = Arc::new(InMemoryBackend::new(
        SessionId::new("sess-1"),
        vec![card("card-a", "하늘", "sky")],
    ));
    let service = SessionLoopService::new(backend.clone());

    let mut prompter = ScriptedPrompter::new(["", "q"]);
    let report = service
        .run(&mut prompter, &user(), &deck())
        .await
        .unwrap();

    assert_eq!(report.outcome, SessionOutcome::QuitEarly);
    assert!(report.summary.is_empty());
    assert_eq!(backend.grade_calls(), 0);
    assert_eq!(backend.end_calls(), 1);
}

#[tokio::test]
async fn a_session_with_nothing_due_still_ends_exactly_once() {
    let backend = Arc::new(InMemoryBackend::new(SessionId::new("sess-1"), Vec::new()));
    let service = SessionLoopService::new(backend.clone());

    let mut prompter = ScriptedPrompter::default();
    let report = service
        .run(&mut prompter, &user(), &deck())
        .await
        .unwrap();

    assert_eq!(report.outcome, SessionOutcome::Completed);
    assert!(report.summary.is_empty());
    assert_eq!(backend.grade_calls(), 0);
    assert_eq!(backend.end_calls(), 1);
}

#[tokio::test]
async fn start_without_a_state_warns_and_skips_the_end_call() {
    let backend = Arc::new(InMemoryBackend::without_session());
    let service = SessionLoopService::new(backend.clone());

    let mut prompter = ScriptedPrompter::default();
    let report = service
        .run(&mut prompter, &user(), &deck())
        .await
        .unwrap();

    assert_eq!(report.outcome, SessionOutcome::NoSession);
    assert!(report.summary.is_empty());
    assert_eq!(backend.end_calls(), 0);
    assert!(
        prompter
            .transcript()
            .iter()
            .any(|line| line.contains("No session found"))
    );
}

#[tokio::test]
async fn grades_accumulate_in_review_order() {
    let backend = Arc::new(InMemoryBackend::new(
        SessionId::new("sess-1"),
        vec![
            card("card-a", "하나", "one"),
            card("card-b", "둘", "two"),
            card("card-c", "셋", "three"),
        ],
    ));
    let service = SessionLoopService::new(backend.clone());

    let mut prompter = ScriptedPrompter::new(["", "1", "", "4", "", "2"]);
    let report = service
        .run(&mut prompter, &user(), &deck())
        .await
        .unwrap();

    assert_eq!(report.outcome, SessionOutcome::Completed);
    assert_eq!(report.summary.reviewed(), 3);

    let graded: Vec<Rating> = backend
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            BackendCall::Grade { rating, .. } => Some(rating),
            _ => None,
        })
        .collect();
    assert_eq!(graded, vec![Rating::Again, Rating::Easy, Rating::Hard]);

    // The reviewed count reported after each turn tracks the grades so far.
    let progress_lines: Vec<&str> = prompter
        .transcript()
        .iter()
        .map(String::as_str)
        .filter(|line| line.starts_with("Progress:"))
        .collect();
    assert_eq!(
        progress_lines,
        vec![
            "Progress: 1 cards reviewed.",
            "Progress: 2 cards reviewed.",
            "Progress: 3 cards reviewed.",
        ]
    );
}

#[tokio::test]
async fn a_failed_grade_aborts_but_still_ends_the_session() {
    let backend = Arc::new(
        InMemoryBackend::new(
            SessionId::new("sess-1"),
            vec![card("card-a", "하늘", "sky")],
        )
        .with_grade_failure(),
    );
    let service = SessionLoopService::new(backend.clone());

    let mut prompter = ScriptedPrompter::new(["", "3"]);
    let err = service
        .run(&mut prompter, &user(), &deck())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SessionError::Api(ApiError::Status { .. })
    ));
    assert_eq!(err.to_string(), "grade rejected");
    assert_eq!(backend.grade_calls(), 1);
    assert_eq!(backend.end_calls(), 1);
}
