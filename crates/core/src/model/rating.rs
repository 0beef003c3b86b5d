use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors that can occur when converting numeric input into a rating.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RatingError {
    #[error("rating must be a whole number from 1 to 4, got {0}")]
    OutOfRange(u8),
}

//
// ─── RATING ───────────────────────────────────────────────────────────────────
//

/// Four-level recall rating submitted to the backend after each card.
///
/// The numeric value of each variant is the wire representation the
/// scheduling service expects:
/// - `Again` (1): Failed to recall, card comes back soon
/// - `Hard` (2): Recalled with difficulty
/// - `Good` (3): Recalled with some effort
/// - `Easy` (4): Recalled easily
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Rating {
    Again = 1,
    Hard = 2,
    Good = 3,
    Easy = 4,
}

impl Rating {
    /// All ratings in ascending (Again..Easy) order.
    pub const ALL: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    /// Returns the numeric value sent over the wire (1-4).
    #[must_use]
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Returns the human-readable label for this rating.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Rating::Again => "Again",
            Rating::Hard => "Hard",
            Rating::Good => "Good",
            Rating::Easy => "Easy",
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Rating::Again),
            2 => Ok(Rating::Hard),
            3 => Ok(Rating::Good),
            4 => Ok(Rating::Easy),
            other => Err(RatingError::OutOfRange(other)),
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating as u8
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
