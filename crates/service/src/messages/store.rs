use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::messages::domain::{Deleted, Message, NewMessage};

/// Trait abstraction for message storage.
///
/// Ids are opaque strings minted by the implementation and never reused
/// for the lifetime of the store.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn create(&self, input: NewMessage) -> Result<Message, ServiceError>;
    async fn get(&self, id: &str) -> Result<Message, ServiceError>;
    async fn delete(&self, id: &str) -> Result<Deleted, ServiceError>;
    /// All stored messages in insertion order.
    async fn list(&self) -> Vec<Message>;
    async fn len(&self) -> usize;
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
