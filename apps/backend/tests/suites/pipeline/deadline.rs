use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_web::{test, web, HttpResponse};
use backend::errors::messages;
use backend::http;
use backend::middleware::RequestDeadline;
use backend_test_support::envelope::{assert_failure, read_envelope};
use backend_test_support::logging;
use backend_test_support::service::call_service_or_error;
use serde_json::json;

use crate::support::create_test_app;

const TIMEOUT: Duration = Duration::from_millis(100);

async fn fast() -> HttpResponse {
    http::ok(json!({ "done": true }))
}

async fn slow() -> HttpResponse {
    tokio::time::sleep(Duration::from_millis(300)).await;
    http::ok(json!({ "done": true }))
}

async fn very_slow() -> HttpResponse {
    tokio::time::sleep(Duration::from_secs(5)).await;
    http::ok_plain()
}

async fn panics() -> HttpResponse {
    panic!("lost connection to db:5432");
}

async fn remaining(deadline: RequestDeadline) -> HttpResponse {
    let remaining_ms = u64::try_from(deadline.remaining().as_millis()).unwrap_or(u64::MAX);
    http::ok(json!({ "remaining_ms": remaining_ms, "cancelled": deadline.is_cancelled() }))
}

fn test_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/test")
            .route("/fast", web::get().to(fast))
            .route("/slow", web::get().to(slow))
            .route("/very-slow", web::get().to(very_slow))
            .route("/panics", web::get().to(panics))
            .route("/remaining", web::get().to(remaining)),
    );
}

#[actix_web::test]
async fn handler_outcome_is_returned_before_deadline() {
    let logs = logging::capture();
    let app = create_test_app()
        .with_timeout(TIMEOUT)
        .with_routes(test_routes)
        .build()
        .await;

    let req = test::TestRequest::get().uri("/test/fast").to_request();
    let resp = call_service_or_error(&app, req).await;

    assert_eq!(resp.status.as_u16(), 200);
    let envelope = read_envelope(&resp);
    assert_eq!(envelope.message, messages::SUCCESS);
    assert_eq!(envelope.data, Some(json!({ "done": true })));
    assert!(envelope.errors.is_none());

    // Nothing fires once the deadline has passed.
    tokio::time::sleep(TIMEOUT * 2).await;
    assert!(!logs.contains("request deadline exceeded"));
    assert!(!logs.contains("outcome discarded"));
}

#[actix_web::test]
async fn slow_handler_gets_exactly_one_timeout_response() {
    let app = create_test_app()
        .with_timeout(TIMEOUT)
        .with_routes(test_routes)
        .build()
        .await;

    let started = Instant::now();
    let req = test::TestRequest::get().uri("/test/very-slow").to_request();
    let resp = call_service_or_error(&app, req).await;
    let elapsed = started.elapsed();

    assert_failure(&resp, 408, messages::REQUEST_TIMEOUT);
    assert!(elapsed >= TIMEOUT, "answered before the deadline: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(2), "answered late: {elapsed:?}");
}

#[actix_web::test]
async fn late_completion_is_logged_not_sent() {
    let logs = logging::capture();
    let app = create_test_app()
        .with_timeout(TIMEOUT)
        .with_routes(test_routes)
        .build()
        .await;

    let req = test::TestRequest::get().uri("/test/slow").to_request();
    let resp = call_service_or_error(&app, req).await;
    assert_failure(&resp, 408, messages::REQUEST_TIMEOUT);
    assert!(!logs.contains("outcome discarded"));

    // Let the handler finish on its own.
    tokio::time::sleep(Duration::from_millis(400)).await;

    let late = logs.with_message("handler completed after the request deadline; outcome discarded");
    assert_eq!(late.len(), 1, "logs: {}", logs.contents());
    assert_eq!(late[0]["level"], "WARN");
}

#[actix_web::test]
async fn cooperative_handler_sees_cancellation() {
    let observed = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&observed);

    let app = create_test_app()
        .with_timeout(TIMEOUT)
        .with_routes(move |cfg| {
            cfg.route(
                "/test/cooperative",
                web::get().to(move |deadline: RequestDeadline| {
                    let flag = Arc::clone(&flag);
                    async move {
                        tokio::select! {
                            _ = deadline.cancelled() => {
                                flag.store(true, Ordering::SeqCst);
                                http::ok_plain()
                            }
                            _ = tokio::time::sleep(Duration::from_secs(5)) => http::ok_plain(),
                        }
                    }
                }),
            );
        })
        .build()
        .await;

    let req = test::TestRequest::get().uri("/test/cooperative").to_request();
    let resp = call_service_or_error(&app, req).await;
    assert_failure(&resp, 408, messages::REQUEST_TIMEOUT);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(observed.load(Ordering::SeqCst));
}

#[actix_web::test]
async fn panic_becomes_opaque_internal_error() {
    let app = create_test_app()
        .with_timeout(Duration::from_secs(1))
        .with_routes(test_routes)
        .build()
        .await;

    let req = test::TestRequest::get().uri("/test/panics").to_request();
    let resp = call_service_or_error(&app, req).await;

    assert_failure(&resp, 500, messages::INTERNAL_SERVER_ERROR);
    let body = String::from_utf8_lossy(&resp.body);
    assert!(!body.contains("db:5432"));
}

#[actix_web::test]
async fn handlers_can_read_their_deadline() {
    let timeout = Duration::from_secs(2);
    let app = create_test_app()
        .with_timeout(timeout)
        .with_routes(test_routes)
        .build()
        .await;

    let req = test::TestRequest::get().uri("/test/remaining").to_request();
    let resp = call_service_or_error(&app, req).await;
    assert_eq!(resp.status.as_u16(), 200);

    let data = read_envelope(&resp).data.expect("data");
    let remaining_ms = data["remaining_ms"].as_u64().expect("remaining_ms");
    assert!(remaining_ms > 0);
    assert!(remaining_ms <= 2_000);
    assert_eq!(data["cancelled"], false);
}
