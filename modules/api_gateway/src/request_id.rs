use axum::http::{HeaderName, Request};
use axum::{body::Body, middleware::Next, response::Response};
use std::time::Duration;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::request_id::{MakeRequestId, RequestId};
use tower_http::trace::{DefaultOnRequest, TraceLayer};
use tracing::field::Empty;
use tracing::Span;

#[derive(Clone, Debug)]
pub struct XRequestId(pub String);

pub fn header() -> HeaderName {
    HeaderName::from_static("x-request-id")
}

#[derive(Clone, Default)]
pub struct MakeReqId;

impl MakeRequestId for MakeReqId {
    fn make_request_id<B>(&mut self, _req: &Request<B>) -> Option<RequestId> {
        // Generate a unique request ID using nanoid
        let id = nanoid::nanoid!();
        Some(RequestId::new(id.parse().ok()?))
    }
}

/// Middleware that stores request_id in Request.extensions and records it in the current span
pub async fn push_req_id_to_extensions(mut req: Request<Body>, next: Next) -> Response {
    let hdr = header();
    let rid = req
        .headers()
        .get(&hdr)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| "n/a".to_string());

    // Make it available to handlers
    req.extensions_mut().insert(XRequestId(rid.clone()));

    // Ensure the current span has the request_id field recorded
    tracing::Span::current().record("request_id", tracing::field::display(&rid));

    next.run(req).await
}

/// Activity logger: a trace layer spanning every handler invocation with
/// method/path/request_id, recording status and latency on the way out.
#[allow(clippy::type_complexity)]
pub fn create_trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    impl Fn(&Request<Body>) -> Span + Clone,
    DefaultOnRequest,
    impl Fn(&Response, Duration, &Span) + Clone,
> {
    TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            let hdr = header();
            let rid = req
                .headers()
                .get(&hdr)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("n/a");
            tracing::info_span!(
                "http_request",
                method = %req.method(),
                uri = %req.uri().path(),
                version = ?req.version(),
                module = "api_gateway",
                endpoint = %req.uri().path(),
                request_id = %rid,
                status = Empty,
                latency_ms = Empty
            )
        })
        .on_response(|res: &Response, latency: Duration, span: &Span| {
            let status = u64::from(res.status().as_u16());
            let latency_ms = latency.as_millis() as u64;
            span.record("status", status);
            span.record("latency_ms", latency_ms);
            tracing::info!(status, latency_ms, "request completed");
        })
}
