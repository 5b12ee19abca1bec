use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::auth::claims::SubjectId;
use crate::extractors::CurrentSubject;
use crate::http;

#[derive(Debug, Serialize)]
struct MeResponse {
    user_id: SubjectId,
}

async fn me(subject: CurrentSubject) -> HttpResponse {
    http::ok(MeResponse {
        user_id: subject.id(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(me));
}
