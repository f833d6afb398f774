//! Router assembly
//!
//! Kept separate from `main` so the full middleware stack can be driven in
//! tests without binding a socket.

use std::time::Duration;

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
    middleware::from_fn,
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer, ExposeHeaders};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use coaching::{CoachingAppState, coaching_router};
use coaching::domain::repository::CoachingSessionRepository;
use kernel::http::{REQUEST_ID_HEADER, attach_request_id};
use magic_auth::domain::repository::{
    AuthSessionRepository, AuthTokenRepository, UserIdentityRepository,
};
use magic_auth::handlers::health;
use magic_auth::{AuthService, auth_router};

/// Build the `/v1` application with the full middleware stack.
pub fn build_app<A, C>(
    auth: AuthService<A>,
    coaching: CoachingAppState<C>,
    web_origins: &[String],
) -> Router
where
    A: AuthTokenRepository + AuthSessionRepository + UserIdentityRepository + Send + Sync + 'static,
    C: CoachingSessionRepository + Send + Sync + 'static,
{
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/v1/health", get(health))
        .nest("/v1/auth", auth_router(auth.clone()))
        .nest("/v1/sessions", coaching_router(coaching, auth))
        // first layer listed is outermost
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(cors_layer(web_origins))
                .layer(from_fn(attach_request_id)),
        )
}

fn cors_layer(web_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = web_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ]))
        .expose_headers(ExposeHeaders::list([HeaderName::from_static(
            REQUEST_ID_HEADER,
        )]))
        .allow_credentials(true)
        .max_age(Duration::from_secs(300))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use coaching::MemoryCoachingRepository;
    use magic_auth::{AuthConfig, MemoryAuthRepository};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        build_app(
            AuthService::new(MemoryAuthRepository::new(), AuthConfig::development()),
            CoachingAppState::new(MemoryCoachingRepository::new()),
            &["http://localhost:3000".to_string()],
        )
    }

    async fn json(resp: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let resp = app()
            .oneshot(Request::builder().uri("/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key(REQUEST_ID_HEADER));
        assert_eq!(json(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_generated_request_id_in_error_body() {
        let resp = app()
            .oneshot(Request::builder().uri("/v1/auth/session").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let header_id = resp
            .headers()
            .get(REQUEST_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let body = json(resp).await;
        assert_eq!(body["error"]["code"], "unauthorized");
        assert_eq!(body["error"]["request_id"], header_id.as_str());
    }

    #[tokio::test]
    async fn test_client_request_id_is_kept() {
        let resp = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/auth/request-link")
                    .header(REQUEST_ID_HEADER, "client-id-1")
                    .body(Body::from(r#"{"email":""}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(resp.headers()[REQUEST_ID_HEADER], "client-id-1");
        let body = json(resp).await;
        assert_eq!(body["error"]["code"], "invalid_email");
        assert_eq!(body["error"]["request_id"], "client-id-1");
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let resp = app()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/v1/auth/verify")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = resp.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "300");
    }

    #[tokio::test]
    async fn test_cors_unknown_origin_not_allowed() {
        let resp = app()
            .oneshot(
                Request::builder()
                    .uri("/v1/health")
                    .header(header::ORIGIN, "https://evil.test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(!resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let resp = app()
            .oneshot(Request::builder().uri("/v1/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
