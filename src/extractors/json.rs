//! JSON request body with structured rejection.

use crate::error::AppError;
use async_trait::async_trait;
use axum::extract::{rejection::JsonRejection, FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Like `axum::Json`, but the body must be a JSON object and every rejection uses the shared error body.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;
        from_object(value).map(JsonBody)
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let message = rejection.body_text();
    match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(message),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => AppError::UnsupportedMediaType(message),
        _ => AppError::BadRequest(message),
    }
}

/// Decode `value` into `T`; arrays, scalars and null are rejected before decoding.
pub fn from_object<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    if !value.is_object() {
        return Err(AppError::BadRequest("request body must be a JSON object".into()));
    }
    serde_json::from_value(value).map_err(|e| AppError::BadRequest(format!("invalid body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewBook;
    use serde_json::json;

    #[test]
    fn objects_decode() {
        let b: NewBook = from_object(json!({"title": "Dune", "callNumber": 42})).unwrap();
        assert_eq!(b.title, "Dune");
        assert_eq!(b.call_number, 42);
    }

    #[test]
    fn non_objects_are_rejected() {
        for value in [json!([]), json!([1, 2]), json!(null), json!("book"), json!(7)] {
            let err = from_object::<NewBook>(value.clone()).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "{}", value);
        }
    }

    #[test]
    fn wrong_field_type_is_bad_request() {
        let err = from_object::<NewBook>(json!({"callNumber": "forty-two"})).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
