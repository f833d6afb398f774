//! HTTP helpers shared by every router
//!
//! Error envelope rendering, request id propagation and a JSON body
//! extractor that answers with the envelope instead of axum's plain-text
//! rejections.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::app_error::AppError;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Client-facing part of an [`AppError`](crate::error::app_error::AppError).
///
/// Stored in the response extensions so that [`attach_request_id`] can
/// re-render the body once the request id is known.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
struct Envelope<'a> {
    error: EnvelopeDetail<'a>,
}

#[derive(Serialize)]
struct EnvelopeDetail<'a> {
    code: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<&'a str>,
}

impl ErrorBody {
    /// `{"error": {"code", "message", "request_id"}}`
    pub fn render(&self, request_id: Option<&str>) -> Json<serde_json::Value> {
        let envelope = Envelope {
            error: EnvelopeDetail {
                code: &self.code,
                message: &self.message,
                request_id,
            },
        };
        Json(serde_json::to_value(envelope).unwrap_or(serde_json::Value::Null))
    }
}

/// Middleware that stamps the request id into error envelopes.
///
/// Must run inside the layer that assigns `x-request-id`.
pub async fn attach_request_id(req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let response = next.run(req).await;

    let Some(request_id) = request_id else {
        return response;
    };
    let Some(body) = response.extensions().get::<ErrorBody>().cloned() else {
        return response;
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    let (_, rendered) = body.render(Some(&request_id)).into_response().into_parts();
    Response::from_parts(parts, rendered)
}

/// JSON request body.
///
/// Unlike `axum::Json` the `Content-Type` header is not required, and any
/// unreadable or malformed body becomes `400 invalid_json`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|_| {
            AppError::bad_request("Invalid JSON payload.").with_code("invalid_json")
        })?;
        let value = serde_json::from_slice(&bytes)?;
        Ok(JsonBody(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route(
                "/fail",
                get(|| async {
                    AppError::unauthorized("Authentication required.").into_response()
                }),
            )
            .route("/ok", get(|| async { "fine" }))
            .route(
                "/echo",
                axum::routing::post(|JsonBody(v): JsonBody<Echo>| async move { v.name }),
            )
            .layer(axum::middleware::from_fn(attach_request_id))
    }

    #[derive(serde::Deserialize)]
    struct Echo {
        name: String,
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_error_envelope_carries_request_id() {
        let response = app()
            .oneshot(
                HttpRequest::get("/fail")
                    .header(REQUEST_ID_HEADER, "req-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "unauthorized");
        assert_eq!(json["error"]["message"], "Authentication required.");
        assert_eq!(json["error"]["request_id"], "req-123");
    }

    #[tokio::test]
    async fn test_error_envelope_without_request_id() {
        let response = app()
            .oneshot(HttpRequest::get("/fail").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "unauthorized");
        assert!(json["error"].get("request_id").is_none());
    }

    #[tokio::test]
    async fn test_success_response_untouched() {
        let response = app()
            .oneshot(
                HttpRequest::get("/ok")
                    .header(REQUEST_ID_HEADER, "req-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"fine");
    }

    #[tokio::test]
    async fn test_json_body_without_content_type() {
        let response = app()
            .oneshot(
                HttpRequest::post("/echo")
                    .body(Body::from(r#"{"name":"lumen"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"lumen");
    }

    #[tokio::test]
    async fn test_json_body_malformed_is_invalid_json() {
        let response = app()
            .oneshot(
                HttpRequest::post("/echo")
                    .header(REQUEST_ID_HEADER, "req-9")
                    .body(Body::from("{nope"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "invalid_json");
        assert_eq!(json["error"]["message"], "Invalid JSON payload.");
        assert_eq!(json["error"]["request_id"], "req-9");
    }
}
