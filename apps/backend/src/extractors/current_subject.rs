use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use tracing::error;

use crate::auth::claims::SubjectId;
use crate::error::FailureSignal;

/// The subject bound by the token verifier.
///
/// Only usable on routes behind `TokenVerifier`; anywhere else the subject is
/// missing and the request fails with `Unauthorized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentSubject(pub SubjectId);

impl CurrentSubject {
    pub fn id(&self) -> SubjectId {
        self.0
    }
}

impl FromRequest for CurrentSubject {
    type Error = FailureSignal;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let subject = req.extensions().get::<SubjectId>().copied();
        ready(match subject {
            Some(subject) => Ok(CurrentSubject(subject)),
            None => {
                error!(path = %req.path(), "CurrentSubject used on a route without TokenVerifier");
                Err(FailureSignal::Unauthorized)
            }
        })
    }
}
