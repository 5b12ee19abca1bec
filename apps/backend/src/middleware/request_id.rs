//! Outermost middleware: request correlation and the final error-to-response
//! step.
//!
//! Generates a UUID v4 per request, stores it in request extensions and the
//! task-local request context, echoes it as `x-request-id`, and runs the rest
//! of the pipeline inside a `request` span carrying `request_id`, `method` and
//! `path`. An `Err` that reaches this layer is rendered once through its
//! `ResponseError` impl and handed on as an already-built response carrying
//! the same header, so the client always receives exactly one envelope.
//!
//! The `HttpRequest` must not be cloned here: routing below needs sole
//! ownership of it to record match info.

use std::future::{ready, Ready};

use actix_web::body::MessageBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::InternalError;
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::request_ctx;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestIdValue(pub String);

#[derive(Clone, Default)]
pub struct RequestId;

impl<S, B> Transform<S, ServiceRequest> for RequestId
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestIdMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdMiddleware { service }))
    }
}

pub struct RequestIdMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestIdMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = Uuid::new_v4().to_string();
        req.extensions_mut()
            .insert(RequestIdValue(request_id.clone()));

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %req.method(),
            path = %req.path()
        );
        // Downstream `call`s run synchronously here, so give them the span
        // and the request id too.
        let fut = {
            let _entered = span.enter();
            request_ctx::sync_with_request_id(request_id.clone(), || self.service.call(req))
        };

        let header_value = HeaderValue::from_str(&request_id)
            .unwrap_or_else(|_| HeaderValue::from_static("invalid-uuid"));

        Box::pin(
            request_ctx::with_request_id(request_id, async move {
                match fut.await {
                    Ok(mut res) => {
                        res.headers_mut()
                            .insert(HeaderName::from_static(REQUEST_ID_HEADER), header_value);
                        Ok(res)
                    }
                    Err(err) => {
                        let mut rendered = err.error_response();
                        rendered
                            .headers_mut()
                            .insert(HeaderName::from_static(REQUEST_ID_HEADER), header_value);
                        Err(InternalError::from_response(err, rendered).into())
                    }
                }
            })
            .instrument(span),
        )
    }
}
