//! Path extractor that rejects in the standard envelope

use axum::extract::rejection::PathRejection;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;

use super::ApiResponse;

/// Drop-in for `axum::extract::Path`. A segment that does not parse
/// (`/api/vehicles/abc`) answers 400 with `{success: false, error}`.
pub struct Path<T>(pub T);

pub struct PathError(PathRejection);

impl IntoResponse for PathError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PathRejection::FailedToDeserializePathParams(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ApiResponse::<()>::error(format!("Invalid path: {}", self.0.body_text()));
        (status, Json(body)).into_response()
    }
}

impl<S, T> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = PathError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        axum::extract::Path::<T>::from_request_parts(parts, state)
            .await
            .map(|axum::extract::Path(value)| Path(value))
            .map_err(PathError)
    }
}
