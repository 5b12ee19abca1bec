//! Response envelope, paging, and the success helpers handlers return.

pub mod envelope;
pub mod paging;

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;

use crate::errors::messages;
pub use envelope::{FieldError, ResponseEnvelope};
pub use paging::{Links, PageMetaData};

/// 200 with `data`.
pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    respond(StatusCode::OK, ResponseEnvelope::success(messages::SUCCESS, data))
}

/// 200 with only the success message.
pub fn ok_plain() -> HttpResponse {
    respond(StatusCode::OK, ResponseEnvelope::<()>::message_only(messages::SUCCESS))
}

pub fn ok_paginated<T: Serialize>(data: T, paging: PageMetaData) -> HttpResponse {
    respond(
        StatusCode::OK,
        ResponseEnvelope::success_paged(messages::SUCCESS, data, paging),
    )
}

/// 201 with `data`.
pub fn created<T: Serialize>(data: T) -> HttpResponse {
    respond(StatusCode::CREATED, ResponseEnvelope::success(messages::SUCCESS, data))
}

pub fn created_plain() -> HttpResponse {
    respond(
        StatusCode::CREATED,
        ResponseEnvelope::<()>::message_only(messages::SUCCESS),
    )
}

fn respond<T: Serialize>(status: StatusCode, envelope: ResponseEnvelope<T>) -> HttpResponse {
    HttpResponse::build(status).json(envelope)
}
