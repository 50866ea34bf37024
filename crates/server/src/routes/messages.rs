use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use service::messages::{Message, NewMessage};
use utoipa::ToSchema;

use crate::errors::ApiError;
use crate::extract::{Validate, ValidatedJson};
use crate::metrics;
use crate::routes::AppState;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MessageRequest {
    pub message: String,
}

impl Validate for MessageRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if self.message.is_empty() {
            return Err(ApiError::validation(
                &["body", "message"],
                "String should have at least 1 character",
                "string_too_short",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct MessageResponse {
    pub id: String,
    pub message: String,
}

impl From<Message> for MessageResponse {
    fn from(m: Message) -> Self {
        Self { id: m.id, message: m.text }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageList {
    pub messages: Vec<MessageResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

/// Post a new message
#[utoipa::path(post, path = "/messages", tag = "messages", request_body = MessageRequest,
    responses((status = 200, description = "OK", body = MessageResponse), (status = 422, description = "Validation Error")))]
pub async fn post_message(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<MessageRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let created = state.store.create(NewMessage::new(req.message)).await?;
    metrics::MESSAGES_CREATED_TOTAL.inc();
    Ok(Json(created.into()))
}

/// Get a message by id
#[utoipa::path(get, path = "/messages/{id}", tag = "messages",
    params(("id" = String, Path, description = "Message id")),
    responses((status = 200, description = "OK", body = MessageResponse), (status = 404, description = "Message not found")))]
pub async fn get_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let found = state.store.get(&id).await?;
    Ok(Json(found.into()))
}

/// Delete a message by id
#[utoipa::path(delete, path = "/messages/{id}", tag = "messages",
    params(("id" = String, Path, description = "Message id")),
    responses((status = 200, description = "Deleted", body = DeleteResponse), (status = 404, description = "Message not found")))]
pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = state.store.delete(&id).await?;
    metrics::MESSAGES_DELETED_TOTAL.inc();
    Ok(Json(DeleteResponse { message: deleted.to_string() }))
}

/// List all messages
#[utoipa::path(get, path = "/messages", tag = "messages", responses((status = 200, description = "OK", body = MessageList)))]
pub async fn list_messages(State(state): State<AppState>) -> Json<MessageList> {
    let messages = state
        .store
        .list()
        .await
        .into_iter()
        .map(MessageResponse::from)
        .collect();
    Json(MessageList { messages })
}
