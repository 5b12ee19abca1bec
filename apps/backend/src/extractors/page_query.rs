use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use serde::Deserialize;

use crate::error::FailureSignal;
use crate::http::paging::{DEFAULT_LIMIT, DEFAULT_PAGE};

/// `?page=&limit=` with defaults for anything absent, unparsable or not
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Deserialize)]
struct RawPageQuery {
    page: Option<String>,
    limit: Option<String>,
}

impl PageQuery {
    pub fn from_query(query: &str) -> Self {
        let raw: RawPageQuery = serde_urlencoded::from_str(query).unwrap_or(RawPageQuery {
            page: None,
            limit: None,
        });
        Self {
            page: positive_or(raw.page.as_deref(), DEFAULT_PAGE),
            limit: positive_or(raw.limit.as_deref(), DEFAULT_LIMIT),
        }
    }
}

fn positive_or(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

impl FromRequest for PageQuery {
    type Error = FailureSignal;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_query(req.query_string())))
    }
}
