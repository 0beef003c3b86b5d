use serde::{Deserialize, Serialize};

use crate::model::card::DueCard;
use crate::model::ids::SessionId;
use crate::model::rating::Rating;

/// Running tally the backend reports with every session state.
///
/// `grades` is insertion-ordered: one entry per grade call, in review order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub reviewed: u32,
    pub grades: Vec<Rating>,
}

/// Snapshot of an in-progress study session.
///
/// The backend is authoritative: every grade round trip returns a fresh
/// state that replaces this one wholesale. The client never merges or
/// edits a state, it only reads it and hands it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub session_id: SessionId,
    /// Absent once the backend has no more due cards for this session.
    #[serde(default)]
    pub current_card: Option<DueCard>,
    #[serde(default)]
    pub progress: Progress,
}

/// Aggregate statistics for a finished session.
///
/// Pure function of the grade sequence; review order does not affect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    reviewed: u32,
    again: u32,
    hard: u32,
    good: u32,
    easy: u32,
}

impl SessionSummary {
    /// Build a summary by counting each grade in the sequence.
    #[must_use]
    pub fn from_grades(grades: &[Rating]) -> Self {
        let mut again = 0_u32;
        let mut hard = 0_u32;
        let mut good = 0_u32;
        let mut easy = 0_u32;

        for grade in grades {
            match grade {
                Rating::Again => again = again.saturating_add(1),
                Rating::Hard => hard = hard.saturating_add(1),
                Rating::Good => good = good.saturating_add(1),
                Rating::Easy => easy = easy.saturating_add(1),
            }
        }

        let reviewed = u32::try_from(grades.len()).unwrap_or(u32::MAX);

        Self {
            reviewed,
            again,
            hard,
            good,
            easy,
        }
    }

    #[must_use]
    pub fn reviewed(&self) -> u32 {
        self.reviewed
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reviewed == 0
    }

    /// Occurrences of one rating level.
    #[must_use]
    pub fn count(&self, rating: Rating) -> u32 {
        match rating {
            Rating::Again => self.again,
            Rating::Hard => self.hard,
            Rating::Good => self.good,
            Rating::Easy => self.easy,
        }
    }

    /// Mean of the numeric grade values, or `None` for an empty session.
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        if self.reviewed == 0 {
            return None;
        }
        let sum: u64 = Rating::ALL
            .iter()
            .map(|rating| u64::from(rating.value()) * u64::from(self.count(*rating)))
            .sum();
        Some(sum as f64 / f64::from(self.reviewed))
    }

    /// Counts per rating in Again..Easy order, omitting ratings never given.
    #[must_use]
    pub fn breakdown(&self) -> Vec<(Rating, u32)> {
        Rating::ALL
            .iter()
            .map(|rating| (*rating, self.count(*rating)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::CardId;

    #[test]
    fn empty_summary_has_no_average() {
        let summary = SessionSummary::from_grades(&[]);
        assert!(summary.is_empty());
        assert_eq!(summary.reviewed(), 0);
        assert_eq!(summary.average(), None);
        assert!(summary.breakdown().is_empty());
    }

    #[test]
    fn summary_counts_and_averages_grades() {
        let grades = [Rating::Good, Rating::Good, Rating::Easy, Rating::Again];
        let summary = SessionSummary::from_grades(&grades);

        assert_eq!(summary.reviewed(), 4);
        assert_eq!(summary.average(), Some(2.75));
        assert_eq!(
            summary.breakdown(),
            vec![(Rating::Again, 1), (Rating::Good, 2), (Rating::Easy, 1)]
        );
    }

    #[test]
    fn breakdown_omits_ratings_never_given() {
        let summary = SessionSummary::from_grades(&[Rating::Hard]);
        assert_eq!(summary.breakdown(), vec![(Rating::Hard, 1)]);
        assert_eq!(summary.count(Rating::Again), 0);
    }

    #[test]
    fn summary_is_order_insensitive() {
        let forward = SessionSummary::from_grades(&[Rating::Again, Rating::Hard, Rating::Easy]);
        let reversed = SessionSummary::from_grades(&[Rating::Easy, Rating::Hard, Rating::Again]);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn state_deserializes_with_current_card() {
        let json = r#"{
            "sessionId": "sess-1",
            "currentCard": {"id": "card-1", "korean": "고양이", "english": "cat"},
            "progress": {"reviewed": 2, "grades": [3, 4]}
        }"#;
        let state: SessionState = serde_json::from_str(json).unwrap();

        assert_eq!(state.session_id, SessionId::new("sess-1"));
        let card = state.current_card.unwrap();
        assert_eq!(card.id, CardId::new("card-1"));
        assert_eq!(state.progress.reviewed, 2);
        assert_eq!(state.progress.grades, vec![Rating::Good, Rating::Easy]);
    }

    #[test]
    fn state_tolerates_missing_card_and_progress() {
        let state: SessionState = serde_json::from_str(r#"{"sessionId": "sess-2"}"#).unwrap();
        assert!(state.current_card.is_none());
        assert_eq!(state.progress, Progress::default());
    }
}
