use std::fmt;

use crate::errors::ServiceError;

/// A stored message. `id` is minted by the store and never changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub text: String,
}

/// Input for creating a message; the id is assigned by the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewMessage {
    pub text: String,
}

impl NewMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Presence check only; whitespace is kept as-is.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.text.is_empty() {
            return Err(ServiceError::Validation("message must not be empty".into()));
        }
        Ok(())
    }
}

/// Receipt for a successful delete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deleted {
    pub id: String,
}

impl fmt::Display for Deleted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Message {} deleted successfully", self.id)
    }
}
