//! Message storage: domain types, the store trait and its in-memory backend.

pub mod domain;
pub mod memory;
pub mod store;

pub use domain::{Deleted, Message, NewMessage};
pub use memory::{InMemoryMessageStore, LenObserver};
pub use store::MessageStore;
