//! Shared error types for the services crate.

use thiserror::Error;

use api::ApiError;

use crate::prompter::PromptError;

/// Errors emitted by `SessionLoopService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
}
