use actix_web::{web, HttpResponse};
use serde::Serialize;
use time::OffsetDateTime;

use crate::http;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    time: String,
}

async fn health() -> HttpResponse {
    let time = OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    http::ok(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        time,
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(health));
}
