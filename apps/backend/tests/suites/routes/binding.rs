use actix_web::http::header::ContentType;
use actix_web::{test, web, HttpResponse};
use backend::errors::messages;
use backend::extractors::ValidatedJson;
use backend::http;
use backend::validation::{rules, FieldName, Rule, Validate, Violation, Violations};
use backend_test_support::service::call_service_or_error;
use serde::Deserialize;

use crate::common::assert_failure_envelope;
use crate::support::create_test_app;

const EMAIL: FieldName = FieldName::new("email");

#[derive(Debug, Deserialize)]
struct SignupRequest {
    email: String,
    #[serde(default)]
    age: Option<u8>,
}

impl Validate for SignupRequest {
    fn validate(&self) -> Result<(), Vec<Violation>> {
        let mut v = Violations::new();
        v.check(rules::email(&self.email), EMAIL, Rule::Email);
        v.finish()
    }
}

async fn signup(body: ValidatedJson<SignupRequest>) -> HttpResponse {
    http::created(serde_json::json!({ "email": body.email, "age": body.age }))
}

async fn echo(body: web::Json<serde_json::Value>) -> HttpResponse {
    http::ok(body.into_inner())
}

#[derive(Debug, Deserialize)]
struct PlainSignup {
    email: String,
}

async fn plain_signup(body: web::Json<PlainSignup>) -> HttpResponse {
    http::created(serde_json::json!({ "email": body.email }))
}

fn test_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/test/signup", web::post().to(signup));
    cfg.route("/test/echo", web::post().to(echo));
    cfg.route("/test/plain-signup", web::post().to(plain_signup));
}

async fn post_raw(uri: &str, body: &'static str) -> backend_test_support::service::TestResponse {
    let app = create_test_app().with_routes(test_routes).build().await;
    let req = test::TestRequest::post()
        .uri(uri)
        .insert_header(ContentType::json())
        .set_payload(body)
        .to_request();
    call_service_or_error(&app, req).await
}

#[actix_web::test]
async fn type_mismatch_names_the_field() {
    let resp = post_raw("/test/signup", r#"{"email": 123}"#).await;
    assert_failure_envelope(&resp, 400, "invalid value for email");
}

#[actix_web::test]
async fn nested_value_out_of_range_names_the_field() {
    let resp = post_raw("/test/signup", r#"{"email": "a@b.co", "age": 300}"#).await;
    assert_failure_envelope(&resp, 400, "invalid value for age");
}

#[actix_web::test]
async fn root_type_mismatch_names_the_body() {
    let resp = post_raw("/test/signup", r#""just a string""#).await;
    assert_failure_envelope(&resp, 400, "invalid value for body");
}

#[actix_web::test]
async fn broken_syntax_is_reported() {
    let resp = post_raw("/test/signup", r#"{"email" "a@b.co"}"#).await;
    assert_failure_envelope(&resp, 400, messages::JSON_SYNTAX);
}

#[actix_web::test]
async fn truncated_or_empty_body_is_missing() {
    for body in [r#"{"email": "a@b"#, "", "   "] {
        let resp = post_raw("/test/signup", body).await;
        assert_failure_envelope(&resp, 400, messages::MISSING_BODY);
    }
}

#[actix_web::test]
async fn trailing_garbage_is_a_syntax_error() {
    let resp = post_raw("/test/signup", r#"{"email": "a@b.co"} x"#).await;
    assert_failure_envelope(&resp, 400, messages::JSON_SYNTAX);
}

#[actix_web::test]
async fn validation_failure_lists_fields() {
    let resp = post_raw("/test/signup", r#"{"email": "not-an-email"}"#).await;
    let envelope = assert_failure_envelope(&resp, 400, messages::VALIDATION);

    let errors = envelope.errors.expect("errors");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "email");
    assert_eq!(errors[0].message, "email has invalid email format");
}

#[actix_web::test]
async fn non_json_content_type_is_rejected() {
    let app = create_test_app().with_routes(test_routes).build().await;
    let req = test::TestRequest::post()
        .uri("/test/signup")
        .insert_header(ContentType::plaintext())
        .set_payload(r#"{"email": "a@b.co"}"#)
        .to_request();
    let resp = call_service_or_error(&app, req).await;

    assert_failure_envelope(&resp, 415, messages::UNSUPPORTED_CONTENT_TYPE);
}

#[actix_web::test]
async fn oversized_body_is_rejected() {
    let app = create_test_app().with_routes(test_routes).build().await;
    let email = format!("{}@example.com", "a".repeat(backend::extractors::validated_json::BODY_LIMIT));
    let req = test::TestRequest::post()
        .uri("/test/signup")
        .insert_header(ContentType::json())
        .set_payload(format!(r#"{{"email": "{email}"}}"#))
        .to_request();
    let resp = call_service_or_error(&app, req).await;

    assert_failure_envelope(&resp, 413, messages::PAYLOAD_TOO_LARGE);
}

#[actix_web::test]
async fn plain_json_extractor_shares_the_classification() {
    let resp = post_raw("/test/echo", r#"{"a": "#).await;
    assert_failure_envelope(&resp, 400, messages::MISSING_BODY);

    let resp = post_raw("/test/echo", r#"{"a" 1}"#).await;
    assert_failure_envelope(&resp, 400, messages::JSON_SYNTAX);
}

#[actix_web::test]
async fn valid_body_reaches_the_handler() {
    let resp = post_raw("/test/signup", r#"{"email": "a@b.co", "age": 30}"#).await;
    assert_eq!(resp.status.as_u16(), 201);
    assert_eq!(resp.json()["data"]["email"], "a@b.co");
    assert_eq!(resp.json()["data"]["age"], 30);
}

#[actix_web::test]
async fn typed_plain_json_reports_mismatch_at_the_root() {
    // actix's extractor keeps no field path; only ValidatedJson names the field.
    let resp = post_raw("/test/plain-signup", r#"{"email": 123}"#).await;
    assert_failure_envelope(&resp, 400, "invalid value for body");

    let resp = post_raw("/test/signup", r#"{"email": 123}"#).await;
    assert_failure_envelope(&resp, 400, "invalid value for email");
}

#[actix_web::test]
async fn typed_plain_json_accepts_a_valid_body() {
    let resp = post_raw("/test/plain-signup", r#"{"email": "a@b.co"}"#).await;
    assert_eq!(resp.status.as_u16(), 201);
    assert_eq!(resp.json()["data"]["email"], "a@b.co");
}
