use actix_web::test;
use backend::middleware::request_id::REQUEST_ID_HEADER;
use backend_test_support::logging;
use backend_test_support::service::call_service_or_error;
use uuid::Uuid;

use crate::support::create_test_app;

#[actix_web::test]
async fn success_and_failure_responses_carry_a_request_id() {
    let app = create_test_app().build().await;

    for uri in ["/health", "/api/me"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = call_service_or_error(&app, req).await;

        let id = resp
            .header(REQUEST_ID_HEADER)
            .unwrap_or_else(|| panic!("{uri} has no request id"));
        assert!(Uuid::parse_str(id).is_ok(), "{uri}: {id}");
    }
}

#[actix_web::test]
async fn rejection_and_access_records_share_the_request_id() {
    let logs = logging::capture();
    let app = create_test_app().build().await;

    let req = test::TestRequest::get().uri("/api/me").to_request();
    let resp = call_service_or_error(&app, req).await;
    assert_eq!(resp.status.as_u16(), 401);
    let id = resp.header(REQUEST_ID_HEADER).expect("request id").to_string();

    let rejected: Vec<_> = logs
        .records()
        .into_iter()
        .filter(|r| r["fields"]["event"] == "SECURITY_AUTH_REJECTED")
        .collect();
    assert_eq!(rejected.len(), 1, "logs: {}", logs.contents());
    assert_eq!(rejected[0]["fields"]["request_id"], id.as_str());

    let completed = logs.with_message("request_completed");
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0]["span"]["request_id"], id.as_str());
}
