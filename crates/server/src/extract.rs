//! Request body extraction with schema validation.
//!
//! Every body failure (missing content type, malformed JSON, missing field,
//! wrong type, failed `Validate`) is reported as 422 before a handler runs.

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::errors::ApiError;

/// Field-level checks run after deserialization.
pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

/// `Json<T>` that also runs `T::validate`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let text = rejection.body_text();
        match rejection {
            JsonRejection::JsonDataError(_) => match missing_field(&text) {
                Some(field) => ApiError::validation(&["body", field], "Field required", "missing"),
                None => ApiError::validation(&["body"], text.clone(), "value_error"),
            },
            JsonRejection::JsonSyntaxError(_) => ApiError::validation(&["body"], text, "json_invalid"),
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::validation(&["body"], text, "missing_content_type")
            }
            _ => ApiError::validation(&["body"], text, "body_error"),
        }
    }
}

/// Pull `name` out of serde's "missing field `name`" message.
fn missing_field(text: &str) -> Option<&str> {
    let start = text.find("missing field `")? + "missing field `".len();
    let len = text[start..].find('`')?;
    Some(&text[start..start + len])
}
