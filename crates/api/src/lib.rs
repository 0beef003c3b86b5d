#![forbid(unsafe_code)]

pub mod catalog;
pub mod client;
pub mod error;
pub mod study;

pub use catalog::{DeckBundle, NewUser};
pub use client::ApiClient;
pub use error::ApiError;
pub use study::{BackendCall, InMemoryBackend, StudyBackend};
