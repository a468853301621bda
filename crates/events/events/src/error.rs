//! Event error types.

use thiserror::Error;

/// Result type for event operations.
pub type EventResult<T> = Result<T, EventError>;

/// Error type for registry operations.
///
/// Only subscription and configuration can fail. Firing and unsubscribing
/// always succeed, reporting "nothing matched" through their return values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// The event name was an empty string.
    #[error("Event name is empty")]
    EmptyName,

    /// The event name does not follow the `[namespace::]name` grammar.
    #[error("Invalid event name: {0:?}")]
    InvalidName(String),

    /// The event name parsed, but carries no name part (e.g. `"ns::"`).
    #[error("Event name has no name part: {0:?}")]
    MissingName(String),

    /// The wildcard can be used to filter, never to subscribe.
    #[error("Cannot subscribe to the wildcard: {0:?}")]
    WildcardName(String),

    /// Configuration could not be deserialized.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for EventError {
    fn from(err: toml::de::Error) -> Self {
        EventError::Config(err.to_string())
    }
}
