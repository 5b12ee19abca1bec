//! Bearer-token authentication for protected scopes.
//!
//! Reads the credential from `Authorization: Bearer <token>` or, when that
//! header is absent, the `accessToken` cookie; verifies it once with the
//! injected [`Signer`]; and binds the resulting [`SubjectId`] into request
//! extensions. Every failure short-circuits with `Unauthorized`.

use std::future::{ready, Ready};
use std::sync::Arc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::auth::claims::SubjectId;
use crate::auth::credential::extract_credential;
use crate::auth::signer::Signer;
use crate::error::FailureSignal;
use crate::logging::pii::{bounded_preview, Redacted};
use crate::logging::security;

const CAUSE_PREVIEW_CHARS: usize = 64;

/// Verify the request's credential and return the subject it names.
pub fn verify_request(req: &HttpRequest, signer: &dyn Signer) -> Result<SubjectId, FailureSignal> {
    let token = extract_credential(req).map_err(|e| {
        security::auth_rejected(e.reason());
        FailureSignal::Unauthorized
    })?;

    let claims = signer.verify(&token).map_err(|e| {
        security::auth_rejected(e.reason());
        debug!(
            cause = %bounded_preview(&Redacted(&e.to_string()).to_string(), CAUSE_PREVIEW_CHARS),
            "token verification failed"
        );
        FailureSignal::Unauthorized
    })?;

    Ok(claims.subject())
}

#[derive(Clone)]
pub struct TokenVerifier {
    signer: Arc<dyn Signer>,
}

impl TokenVerifier {
    pub fn new(signer: Arc<dyn Signer>) -> Self {
        Self { signer }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TokenVerifier
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TokenVerifierMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TokenVerifierMiddleware {
            service,
            signer: Arc::clone(&self.signer),
        }))
    }
}

pub struct TokenVerifierMiddleware<S> {
    service: S,
    signer: Arc<dyn Signer>,
}

impl<S, B> Service<ServiceRequest> for TokenVerifierMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match verify_request(req.request(), self.signer.as_ref()) {
            Ok(subject) => {
                // Bind before calling downstream so extractors can see it.
                req.extensions_mut().insert(subject);
                Box::pin(self.service.call(req))
            }
            Err(signal) => Box::pin(async move { Err(signal.into()) }),
        }
    }
}
