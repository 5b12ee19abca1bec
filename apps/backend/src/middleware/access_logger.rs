use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::Error as ActixError;
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::error::FailureSignal;
use crate::logging::pii::{bounded_preview, Redacted};

const CAUSE_PREVIEW_CHARS: usize = 256;

/// One structured `request_completed` record per request.
///
/// Observes only: the downstream result is returned untouched, whether it is
/// a response or an error still to be rendered by the outer layer.
#[derive(Clone, Default)]
pub struct AccessLogger;

impl<S, B> Transform<S, ServiceRequest> for AccessLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = AccessLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessLoggerMiddleware { service }))
    }
}

pub struct AccessLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AccessLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let client = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, cause) = match &result {
                Ok(res) => (res.status(), res.response().error().map(original_cause)),
                Err(err) => (err.as_response_error().status_code(), Some(original_cause(err))),
            };
            let record = Record {
                method: &method,
                path: &path,
                client: &client,
                status,
                duration_us: u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
                cause: cause.as_deref(),
            };
            record.emit();

            result
        })
    }
}

/// Innermost cause of a failure, redacted and bounded for logging.
fn original_cause(err: &ActixError) -> String {
    let raw = match err.as_error::<FailureSignal>() {
        Some(signal) => signal.original_cause(),
        None => err.to_string(),
    };
    bounded_preview(&Redacted(&raw).to_string(), CAUSE_PREVIEW_CHARS)
}

struct Record<'a> {
    method: &'a str,
    path: &'a str,
    client: &'a str,
    status: StatusCode,
    duration_us: u64,
    cause: Option<&'a str>,
}

impl Record<'_> {
    fn emit(&self) {
        let status_code = self.status.as_u16();
        let (method, path, client, duration_us) =
            (self.method, self.path, self.client, self.duration_us);

        match self.cause {
            Some(cause) if self.status.is_server_error() => {
                error!(http.method=%method, url.path=%path, client.address=%client, http.status_code=%status_code, duration_us=%duration_us, error.cause=%cause, message="request_completed");
            }
            Some(cause) => {
                warn!(http.method=%method, url.path=%path, client.address=%client, http.status_code=%status_code, duration_us=%duration_us, error.cause=%cause, message="request_completed");
            }
            None if self.status.is_server_error() => {
                error!(http.method=%method, url.path=%path, client.address=%client, http.status_code=%status_code, duration_us=%duration_us, message="request_completed");
            }
            None if self.status.is_client_error() => {
                warn!(http.method=%method, url.path=%path, client.address=%client, http.status_code=%status_code, duration_us=%duration_us, message="request_completed");
            }
            None => {
                info!(http.method=%method, url.path=%path, client.address=%client, http.status_code=%status_code, duration_us=%duration_us, message="request_completed");
            }
        }
    }
}
