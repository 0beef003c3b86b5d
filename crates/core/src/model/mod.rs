mod card;
mod catalog;
mod ids;
mod rating;
mod session;

pub use ids::{CardId, ChapterId, DeckId, SeriesId, SessionId, UserId};

pub use card::DueCard;
pub use catalog::{CatalogCard, Chapter, Deck, Series, User};
pub use rating::{Rating, RatingError};
pub use session::{Progress, SessionState, SessionSummary};
