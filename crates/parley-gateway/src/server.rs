use crate::error::ApiError;
use crate::router::{ChatReply, ChatRequest, ChatRouter};
use crate::sanitizer::Sanitizer;
use axum::{
    body::Bytes,
    extract::State,
    http::{Method, Uri},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use parley_session::SessionRegistry;
use std::sync::Arc;
use tracing::debug;

/// Shared application state.
pub struct AppState {
    pub router: Arc<ChatRouter>,
}

/// The HTTP gateway.
pub struct GatewayServer;

impl GatewayServer {
    /// Build the gateway with the default sanitizer limits.
    pub fn build(registry: Arc<SessionRegistry>) -> Router {
        Self::build_with_sanitizer(registry, Sanitizer::default())
    }

    /// Build the gateway with a custom message sanitizer.
    pub fn build_with_sanitizer(registry: Arc<SessionRegistry>, sanitizer: Sanitizer) -> Router {
        let state = Arc::new(AppState {
            router: Arc::new(ChatRouter::new(registry, sanitizer)),
        });

        Router::new()
            .route("/chat", post(chat_handler))
            .route("/chat/", post(chat_handler))
            .route("/health", get(health_handler))
            .route("/health/", get(health_handler))
            .route("/healthz", get(health_handler))
            .route("/healthz/", get(health_handler))
            .fallback(not_found_handler)
            .method_not_allowed_fallback(method_not_allowed_handler)
            .with_state(state)
    }
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok", "service": "parley"}))
}

async fn chat_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ChatReply>, ApiError> {
    let body = std::str::from_utf8(&body)
        .map_err(|_| ApiError::BadRequest("Invalid JSON".to_string()))?;
    let request = ChatRequest::from_body(body)?;
    let reply = state.router.chat(request).await?;
    Ok(Json(reply))
}

async fn not_found_handler(uri: Uri) -> ApiError {
    debug!(path = %uri.path(), "No route");
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

async fn method_not_allowed_handler(method: Method, uri: Uri) -> ApiError {
    debug!(method = %method, path = %uri.path(), "Method not allowed");
    ApiError::MethodNotAllowed(format!("{method} is not supported on {}", uri.path()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use parley_session::BundledCatalog;
    use tower::ServiceExt;

    fn app() -> Router {
        GatewayServer::build(Arc::new(SessionRegistry::new(Arc::new(BundledCatalog))))
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_healthz_route() {
        let resp = app()
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_chat_without_content_type() {
        let resp = app()
            .oneshot(
                Request::post("/chat")
                    .body(Body::from(r#"{"message": "hello"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert!(json["reply"].is_string());
        assert!(json["session_id"].is_string());
    }

    #[tokio::test]
    async fn test_trailing_slash_chat() {
        let resp = app()
            .oneshot(
                Request::post("/chat/")
                    .body(Body::from(r#"{"message": "hello"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_utf8_body_is_bad_request() {
        let resp = app()
            .oneshot(
                Request::post("/chat")
                    .body(Body::from(vec![0xff, 0xfe, 0xfd]))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let resp = app()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["error"], "not_found");
    }

    #[tokio::test]
    async fn test_health_trailing_slash() {
        let resp = app()
            .oneshot(Request::get("/health/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_wrong_method_is_json_405() {
        let resp = app()
            .oneshot(Request::get("/chat").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        let json = body_json(resp).await;
        assert_eq!(json["error"], "method_not_allowed");
        assert!(json["message"].as_str().unwrap().contains("/chat"));
    }
}
