use actix_web::{test, web, HttpRequest, HttpResponse};
use backend::extractors::PageQuery;
use backend::http::paging::paginate;
use backend::http::{self, Links};
use backend_test_support::envelope::read_envelope;
use backend_test_support::service::call_service_or_error;
use serde_json::json;

use crate::support::create_test_app;

async fn items(req: HttpRequest, query: PageQuery) -> HttpResponse {
    let all: Vec<i64> = (1..=5).collect();
    let (window, meta) = paginate(all, query.page, query.limit);
    let links = Links::for_request(&req, meta.page, meta.total_page);
    http::ok_paginated(window, meta.with_links(links))
}

fn test_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/test/items", web::get().to(items));
}

#[actix_web::test]
async fn middle_page_with_links() {
    let app = create_test_app().with_routes(test_routes).build().await;

    let req = test::TestRequest::get()
        .uri("/test/items?limit=2&page=2&sort=desc")
        .to_request();
    let resp = call_service_or_error(&app, req).await;
    assert_eq!(resp.status.as_u16(), 200);

    let envelope = read_envelope(&resp);
    assert_eq!(envelope.data, Some(json!([3, 4])));

    let paging = envelope.paging.expect("paging");
    assert_eq!(paging["page"], 2);
    assert_eq!(paging["size"], 2);
    assert_eq!(paging["total_item"], 5);
    assert_eq!(paging["total_page"], 3);

    let links = &paging["links"];
    let ends_with = |key: &str, suffix: &str| {
        let link = links[key].as_str().unwrap_or_default();
        assert!(link.ends_with(suffix), "{key}: {link}");
    };
    ends_with("self", "/test/items?limit=2&page=2&sort=desc");
    ends_with("first", "/test/items?limit=2&page=1&sort=desc");
    ends_with("prev", "/test/items?limit=2&page=1&sort=desc");
    ends_with("next", "/test/items?limit=2&page=3&sort=desc");
    ends_with("last", "/test/items?limit=2&page=3&sort=desc");
}

#[actix_web::test]
async fn bad_query_values_fall_back_to_defaults() {
    let app = create_test_app().with_routes(test_routes).build().await;

    let req = test::TestRequest::get()
        .uri("/test/items?page=zero&limit=-4")
        .to_request();
    let resp = call_service_or_error(&app, req).await;
    assert_eq!(resp.status.as_u16(), 200);

    let envelope = read_envelope(&resp);
    assert_eq!(envelope.data, Some(json!([1, 2, 3, 4, 5])));
    let paging = envelope.paging.expect("paging");
    assert_eq!(paging["page"], 1);
    assert_eq!(paging["size"], 10);
    assert_eq!(paging["total_page"], 1);
}

#[actix_web::test]
async fn page_past_the_end_is_empty() {
    let app = create_test_app().with_routes(test_routes).build().await;

    let req = test::TestRequest::get().uri("/test/items?page=9&limit=2").to_request();
    let resp = call_service_or_error(&app, req).await;

    let envelope = read_envelope(&resp);
    assert_eq!(envelope.data, Some(json!([])));
    assert_eq!(envelope.paging.expect("paging")["page"], 9);
}

#[actix_web::test]
async fn extreme_query_values_do_not_break_the_route() {
    let app = create_test_app().with_routes(test_routes).build().await;

    let uri = format!("/test/items?page={max}&limit={max}", max = i64::MAX);
    let req = test::TestRequest::get().uri(&uri).to_request();
    let resp = call_service_or_error(&app, req).await;
    assert_eq!(resp.status.as_u16(), 200);

    let envelope = read_envelope(&resp);
    assert_eq!(envelope.data, Some(json!([])));
    let paging = envelope.paging.expect("paging");
    assert_eq!(paging["total_page"], 1);
    assert!(paging["links"]["next"]
        .as_str()
        .is_some_and(|link| link.ends_with("page=1")));
}
