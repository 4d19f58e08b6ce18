use thiserror::Error;

/// Scene entities must know where they are going in every state. Anything
/// else is rejected before it reaches the world.
#[derive(Debug, Error, PartialEq)]
pub enum EntityConfigError {
    #[error("entity '{id}' has no {target} target")]
    MissingTarget { id: String, target: &'static str },

    #[error("entity '{id}' has a non-finite {target} target")]
    NonFiniteTarget { id: String, target: &'static str },

    #[error("entity '{id}' already exists")]
    DuplicateId { id: String },
}
