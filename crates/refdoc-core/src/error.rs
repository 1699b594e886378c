//! Error types for descriptor registration and catalogue parsing

use thiserror::Error;

/// Errors raised while building the registry.
///
/// All of them abort the synthesis run: rendering assumes unique names and
/// resolvable protocol references.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate function name: {0}")]
    DuplicateName(String),

    #[error("duplicate protocol id: {0}")]
    DuplicateProtocol(String),

    #[error("function '{function}' refers to unknown protocol '{protocol}'")]
    UnknownProtocol { function: String, protocol: String },
}

/// Errors raised while parsing a catalogue document
#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("failed to parse catalogue: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid function name '{0}': {1}")]
    InvalidName(String, &'static str),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
