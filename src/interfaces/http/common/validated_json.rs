//! JSON extractors for Axum
//!
//! `JsonBody<T>` works like `axum::Json<T>`, but rejects in the standard
//! envelope. `ValidatedJson<T>` additionally runs
//! `validator::Validate::validate()` on the deserialized value.
//! Both malformed bodies and failed validation answer 400 in the standard
//! envelope, with field-level details for the latter.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::ApiResponse;

/// An extractor that deserializes JSON without further checks.
pub struct JsonBody<T>(pub T);

/// An extractor that deserializes JSON and validates it.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct AddVehicle {
///     #[validate(length(min = 1, max = 100))]
///     make: String,
/// }
///
/// async fn handler(ValidatedJson(body): ValidatedJson<AddVehicle>) {
///     // `body` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    JsonError(JsonRejection),
    ValidationError(validator::ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let message = match self {
            Self::JsonError(rejection) => format!("Invalid JSON: {}", rejection.body_text()),
            Self::ValidationError(errors) => {
                let mut field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errs)| {
                        errs.iter().map(move |e| {
                            let msg = e
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string());
                            format!("{}: {}", field, msg)
                        })
                    })
                    .collect();
                field_errors.sort();

                if field_errors.is_empty() {
                    "Validation failed".to_string()
                } else {
                    field_errors.join("; ")
                }
            }
        };

        let body = ApiResponse::<()>::error(message);
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;
        Ok(JsonBody(value))
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(length(min = 1, max = 10, message = "must be 1-10 characters"))]
        make: String,
        #[validate(range(min = 1900, max = 2100))]
        year: i32,
    }

    async fn handler(ValidatedJson(_body): ValidatedJson<TestBody>) -> &'static str {
        "ok"
    }

    async fn raw_handler(JsonBody(body): JsonBody<Vec<i32>>) -> String {
        body.len().to_string()
    }

    async fn send(body: Body) -> (StatusCode, serde_json::Value) {
        send_to(Router::new().route("/test", post(handler)), body).await
    }

    async fn send_to(app: Router, body: Body) -> (StatusCode, serde_json::Value) {
        let req = Request::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", "application/json")
            .body(body)
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn valid_body_returns_ok() {
        let body = serde_json::json!({"make": "Toyota", "year": 2016});
        let (status, _) = send(Body::from(body.to_string())).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_json_returns_400() {
        let (status, json) = send(Body::from("not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn validation_failure_returns_400_with_fields() {
        let body = serde_json::json!({"make": "", "year": 1800});
        let (status, json) = send(Body::from(body.to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error = json["error"].as_str().unwrap();
        assert!(error.contains("make: must be 1-10 characters"));
        assert!(error.contains("year"));
    }

    #[tokio::test]
    async fn plain_body_type_mismatch_returns_enveloped_400() {
        let app = Router::new().route("/test", post(raw_handler));
        let (status, json) = send_to(app, Body::from(r#"{"a": 1}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }
}
