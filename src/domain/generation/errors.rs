//! Generation Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationDomainError {
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Seed out of range: {0}")]
    SeedOutOfRange(u32),

    #[error("Prompt cannot be empty")]
    EmptyPrompt,

    #[error("Prompt too long: {0} characters")]
    PromptTooLong(usize),
}
