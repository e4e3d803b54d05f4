use api_gateway::{ApiGateway, ApiGatewayConfig};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

fn test_gateway(tokens: Vec<String>) -> ApiGateway {
    ApiGateway::new(ApiGatewayConfig::default(), tokens)
}

async fn boom() -> &'static str {
    panic!("intentional test panic")
}

fn test_api_routes() -> Router {
    Router::new()
        .route("/ping", get(|| async { "pong" }))
        .route("/boom", get(boom))
}

fn build_test_router(tokens: Vec<String>) -> Router {
    test_gateway(tokens).build_router(test_api_routes())
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let router = build_test_router(vec!["secret".into()]);

    let request = Request::builder()
        .uri("/ping")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Unauthorized.");
}

#[tokio::test]
async fn wrong_token_is_unauthorized() {
    let router = build_test_router(vec!["secret".into()]);

    let request = Request::builder()
        .uri("/ping")
        .header("authorization", "Bearer wrong")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_token_reaches_handler() {
    let router = build_test_router(vec!["secret".into()]);

    let request = Request::builder()
        .uri("/ping")
        .header("authorization", "Bearer secret")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"pong");
}

#[tokio::test]
async fn empty_token_set_denies_all() {
    let router = build_test_router(Vec::new());

    let request = Request::builder()
        .uri("/ping")
        .header("authorization", "Bearer anything")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_is_exempt_from_auth() {
    let router = build_test_router(vec!["secret".into()]);

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn handler_panic_becomes_generic_500() {
    let router = build_test_router(vec!["secret".into()]);

    let request = Request::builder()
        .uri("/boom")
        .header("authorization", "Bearer secret")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "An unexpected error occurred.");
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let router = build_test_router(vec!["secret".into()]);

    let request = Request::builder()
        .uri("/ping")
        .header("authorization", "Bearer secret")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn client_request_id_is_propagated() {
    let router = build_test_router(vec!["secret".into()]);

    let request = Request::builder()
        .uri("/ping")
        .header("authorization", "Bearer secret")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "req-123"
    );
}
