//! Error taxonomy shared by the generator and the map transforms.

/// Errors raised by engine operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MagstripeError {
    /// An input value is outside its accepted domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as the caller knows it
        name: &'static str,
        /// Human-readable constraint that was violated
        reason: String,
    },
}

impl MagstripeError {
    /// Shorthand for building an [`MagstripeError::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { name, reason: reason.into() }
    }
}

/// Engine result alias.
pub type Result<T> = std::result::Result<T, MagstripeError>;
