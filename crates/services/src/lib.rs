#![forbid(unsafe_code)]

pub mod error;
pub mod prompter;
pub mod session_loop;

pub use error::SessionError;
pub use prompter::{PromptError, Prompter, ScriptedPrompter};
pub use session_loop::{SessionLoopService, SessionOutcome, SessionReport, Turn};
