use axum::Json;
use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::routes::messages::{DeleteResponse, MessageList, MessageRequest, MessageResponse};

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Simple Message API", version = "1.0.0"),
    paths(
        crate::routes::health,
        crate::routes::messages::post_message,
        crate::routes::messages::get_message,
        crate::routes::messages::delete_message,
        crate::routes::messages::list_messages,
    ),
    components(
        schemas(
            HealthResponse,
            MessageRequest,
            MessageResponse,
            MessageList,
            DeleteResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "messages")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
