#![forbid(unsafe_code)]

pub mod model;

pub use model::{
    CardId, CatalogCard, Chapter, ChapterId, Deck, DeckId, DueCard, Progress, Rating, RatingError,
    Series, SeriesId, SessionId, SessionState, SessionSummary, User, UserId,
};
