use std::sync::Arc;

use api::StudyBackend;
use study_core::{DeckId, Rating, SessionState, SessionSummary, UserId};

use crate::error::SessionError;
use crate::prompter::{PromptError, Prompter};

const RATING_MENU: &str = "\
1: Again (You didn't remember it)
2: Hard (You remembered it, but with difficulty)
3: Good (You remembered it with some effort)
4: Easy (You remembered it easily)";

//
// ─── TURN OUTCOMES ─────────────────────────────────────────────────────────────
//

/// Result of a single review turn.
#[derive(Debug)]
pub enum Turn {
    /// The rating was graded; the successor state replaces the current one.
    Continue(SessionState),
    /// The user typed the quit sentinel at one of the two checkpoints.
    Quit,
    /// The state carries no current card; the backend has nothing due.
    Done,
}

/// How a completed run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The backend ran out of due cards.
    Completed,
    /// The user quit at a reveal or rating prompt.
    QuitEarly,
    /// Start answered without a session state; no session ever existed.
    NoSession,
}

/// Outcome of a full session run, handed to the renderer.
#[derive(Debug)]
pub struct SessionReport {
    pub outcome: SessionOutcome,
    pub summary: SessionSummary,
}

enum LoopEnd {
    Quit,
    Done,
}

//
// ─── RATING INPUT ──────────────────────────────────────────────────────────────
//

/// One line of input at the rating prompt, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RatingInput {
    Quit,
    Rated(Rating),
    Invalid,
}

fn parse_rating_input(input: &str) -> RatingInput {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("q") {
        return RatingInput::Quit;
    }
    trimmed
        .parse::<u8>()
        .ok()
        .and_then(|value| Rating::try_from(value).ok())
        .map_or(RatingInput::Invalid, RatingInput::Rated)
}

//
// ─── SESSION LOOP ──────────────────────────────────────────────────────────────
//

/// Drives the turn-by-turn review loop for exactly one session.
///
/// The loop owns the working `SessionState` and replaces it wholesale with
/// whatever the backend returns from each grade call; it never merges or
/// predicts state. Quit is honored only at the reveal and rating prompts,
/// never during an in-flight remote call.
pub struct SessionLoopService {
    backend: Arc<dyn StudyBackend>,
    debug: bool,
}

impl SessionLoopService {
    #[must_use]
    pub fn new(backend: Arc<dyn StudyBackend>) -> Self {
        Self {
            backend,
            debug: false,
        }
    }

    /// Echo a session-state snapshot after every remote round trip.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Run one full session: start, loop over turns, end, summarize.
    ///
    /// The end call is issued exactly once per session that started, whether
    /// the loop finished, the user quit, or a turn failed. When start answers
    /// without a state there is no session to end and the report carries
    /// [`SessionOutcome::NoSession`].
    ///
    /// # Errors
    ///
    /// Returns `SessionError` when a remote call or the terminal fails. A
    /// failed turn still gets a best-effort end call before the error
    /// propagates.
    pub async fn run(
        &self,
        prompter: &mut dyn Prompter,
        user_id: &UserId,
        deck_id: &DeckId,
    ) -> Result<SessionReport, SessionError> {
        prompter.show("Starting session...")?;
        let started = self.backend.start_session(user_id, deck_id).await?;
        let Some(mut state) = started else {
            log::warn!("session start returned no state for deck {}", deck_id);
            prompter.show("No session found for this deck; nothing is due.")?;
            return Ok(SessionReport {
                outcome: SessionOutcome::NoSession,
                summary: SessionSummary::from_grades(&[]),
            });
        };
        self.echo_state(prompter, &state)?;

        let ended = loop {
            match self.run_turn(prompter, &state).await {
                Ok(Turn::Continue(next)) => state = next,
                Ok(Turn::Quit) => break LoopEnd::Quit,
                Ok(Turn::Done) => break LoopEnd::Done,
                Err(err) => {
                    self.end_best_effort(&state).await;
                    return Err(err);
                }
            }
        };

        self.backend.end_session(&state.session_id).await?;

        let outcome = match ended {
            LoopEnd::Quit => {
                prompter.show("\nSession quit early.")?;
                SessionOutcome::QuitEarly
            }
            LoopEnd::Done => {
                prompter.show("\nSession complete! No more cards to review.")?;
                SessionOutcome::Completed
            }
        };

        Ok(SessionReport {
            outcome,
            summary: SessionSummary::from_grades(&state.progress.grades),
        })
    }

    /// Run a single review turn against `state`.
    ///
    /// Reveals the current card's term, waits for the reveal acknowledgement,
    /// shows the definition, collects a validated rating and submits it. The
    /// quit sentinel (`q`, trimmed, case-insensitive) is honored at both
    /// prompts. Invalid rating input re-prompts without consuming the turn.
    ///
    /// # Errors
    ///
    /// The grade call fails closed: a remote error propagates with no retry
    /// and no credit recorded locally.
    pub async fn run_turn(
        &self,
        prompter: &mut dyn Prompter,
        state: &SessionState,
    ) -> Result<Turn, SessionError> {
        let Some(card) = &state.current_card else {
            return Ok(Turn::Done);
        };

        prompter.show(&format!("\nWord: {}", card.term))?;
        let reveal = prompter.prompt("Press Enter to show definition, or type q to quit:")?;
        if reveal.trim().eq_ignore_ascii_case("q") {
            return Ok(Turn::Quit);
        }

        prompter.show(&format!("Definition: {}", card.definition))?;

        let Some(rating) = self.collect_rating(prompter)? else {
            return Ok(Turn::Quit);
        };

        prompter.show("Submitting grade...")?;
        let next = self.backend.grade_card(&state.session_id, rating).await?;
        self.echo_state(prompter, &next)?;
        prompter.show(&format!(
            "Progress: {} cards reviewed.",
            next.progress.reviewed
        ))?;
        Ok(Turn::Continue(next))
    }

    /// The rating sub-loop: menu, prompt, classify, repeat until a rating is
    /// accepted or the user quits. `None` means quit.
    fn collect_rating(&self, prompter: &mut dyn Prompter) -> Result<Option<Rating>, PromptError> {
        loop {
            prompter.show(RATING_MENU)?;
            let input = prompter.prompt("How well did you recall this? (1-4, or q to quit):")?;
            match parse_rating_input(&input) {
                RatingInput::Quit => return Ok(None),
                RatingInput::Rated(rating) => return Ok(Some(rating)),
                RatingInput::Invalid => {
                    prompter.show("Please enter a number from 1 to 4, or q to quit.")?;
                }
            }
        }
    }

    fn echo_state(
        &self,
        prompter: &mut dyn Prompter,
        state: &SessionState,
    ) -> Result<(), PromptError> {
        if self.debug {
            prompter.show(&format!("Session state: {state:#?}"))?;
        }
        Ok(())
    }

    async fn end_best_effort(&self, state: &SessionState) {
        if let Err(end_err) = self.backend.end_session(&state.session_id).await {
            log::warn!("failed to end session {}: {}", state.session_id, end_err);
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use api::InMemoryBackend;
    use study_core::{CardId, DueCard, Progress, SessionId};

    use crate::prompter::ScriptedPrompter;

    fn card(id: &str, term: &str, definition: &str) -> DueCard {
        DueCard::new(CardId::new(id), term, definition)
    }

    fn state_with_card(card: DueCard) -> SessionState {
        SessionState {
            session_id: SessionId::new("sess-1"),
            current_card: Some(card),
            progress: Progress::default(),
        }
    }

    #[test]
    fn rating_input_accepts_each_valid_value() {
        assert_eq!(parse_rating_input("1"), RatingInput::Rated(Rating::Again));
        assert_eq!(parse_rating_input("2"), RatingInput::Rated(Rating::Hard));
        assert_eq!(parse_rating_input("3"), RatingInput::Rated(Rating::Good));
        assert_eq!(parse_rating_input("4"), RatingInput::Rated(Rating::Easy));
    }

    #[test]
    fn rating_input_tolerates_surrounding_whitespace() {
        assert_eq!(parse_rating_input(" 3 "), RatingInput::Rated(Rating::Good));
        assert_eq!(parse_rating_input("\t2\n"), RatingInput::Rated(Rating::Hard));
    }

    #[test]
    fn rating_input_recognizes_the_quit_sentinel() {
        assert_eq!(parse_rating_input("q"), RatingInput::Quit);
        assert_eq!(parse_rating_input("Q"), RatingInput::Quit);
        assert_eq!(parse_rating_input(" q "), RatingInput::Quit);
    }

    #[test]
    fn rating_input_rejects_everything_else() {
        for input in ["0", "5", "42", "-1", "3.5", "abc", "", "  ", "qq"] {
            assert_eq!(parse_rating_input(input), RatingInput::Invalid, "{input:?}");
        }
    }

    #[tokio::test]
    async fn turn_is_done_when_no_card_is_due() {
        let backend = Arc::new(InMemoryBackend::new(SessionId::new("sess-1"), Vec::new()));
        let service = SessionLoopService::new(backend.clone());
        let mut prompter = ScriptedPrompter::default();

        let state = SessionState {
            session_id: SessionId::new("sess-1"),
            current_card: None,
            progress: Progress::default(),
        };
        let turn = service.run_turn(&mut prompter, &state).await.unwrap();

        assert!(matches!(turn, Turn::Done));
        assert!(backend.calls().is_empty());
        assert!(prompter.transcript().is_empty());
    }

    #[tokio::test]
    async fn invalid_ratings_reprompt_without_grading() {
        let backend = Arc::new(InMemoryBackend::new(
            SessionId::new("sess-1"),
            vec![card("card-1", "별", "star")],
        ));
        let service = SessionLoopService::new(backend.clone());
        let mut prompter = ScriptedPrompter::new(["", "abc", "0", "5", "2"]);

        let state = state_with_card(card("card-1", "별", "star"));
        let turn = service.run_turn(&mut prompter, &state).await.unwrap();

        let Turn::Continue(next) = turn else {
            panic!("expected the turn to continue");
        };
        assert_eq!(next.progress.grades, vec![Rating::Hard]);
        assert_eq!(backend.grade_calls(), 1);

        let errors = prompter
            .transcript()
            .iter()
            .filter(|line| line.starts_with("Please enter a number"))
            .count();
        assert_eq!(errors, 3);
    }

    #[tokio::test]
    async fn quit_at_the_reveal_prompt_skips_the_definition() {
        let backend = Arc::new(InMemoryBackend::new(
            SessionId::new("sess-1"),
            vec![card("card-1", "별", "star")],
        ));
        let service = SessionLoopService::new(backend.clone());
        let mut prompter = ScriptedPrompter::new(["q"]);

        let state = state_with_card(card("card-1", "별", "star"));
        let turn = service.run_turn(&mut prompter, &state).await.unwrap();

        assert!(matches!(turn, Turn::Quit));
        assert_eq!(backend.grade_calls(), 0);
        assert!(
            !prompter
                .transcript()
                .iter()
                .any(|line| line.starts_with("Definition:"))
        );
    }

    #[tokio::test]
    async fn debug_mode_echoes_state_snapshots() {
        let backend = Arc::new(InMemoryBackend::new(
            SessionId::new("sess-1"),
            vec![card("card-1", "별", "star")],
        ));
        let service = SessionLoopService::new(backend).with_debug(true);
        let mut prompter = ScriptedPrompter::new(["", "3"]);

        let report = service
            .run(
                &mut prompter,
                &UserId::new("user-1"),
                &DeckId::new("deck-1"),
            )
            .await
            .unwrap();

        assert_eq!(report.outcome, SessionOutcome::Completed);
        let snapshots = prompter
            .transcript()
            .iter()
            .filter(|line| line.starts_with("Session state:"))
            .count();
        assert_eq!(snapshots, 2);
    }
}
