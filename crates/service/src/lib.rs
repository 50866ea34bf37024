//! Service layer for the message API.
//! - `messages` holds the domain types and the `MessageStore` abstraction.
//! - Errors are surfaced as `ServiceError` and mapped to HTTP by the server crate.

pub mod errors;
pub mod messages;
