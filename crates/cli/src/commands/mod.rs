pub mod auth;
pub mod card;
pub mod chapter;
pub mod config;
pub mod deck;
pub mod dev;
pub mod series;
pub mod study;
pub mod user;
