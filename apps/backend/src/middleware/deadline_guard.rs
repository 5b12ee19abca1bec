//! Bounded processing time per request.
//!
//! The rest of the pipeline runs on its own local task. The caller waits for
//! whichever comes first, the task's outcome or the deadline. The outcome is
//! delivered through a single-use channel, so once the deadline has answered
//! `Timeout` a late completion can only be logged, never written.
//!
//! Cancellation is cooperative: on timeout the request's [`CancellationToken`]
//! is cancelled, but the task itself is left to finish. Handlers that do slow
//! work should select on [`RequestDeadline::cancelled`].

use std::any::Any;
use std::future::{ready, Future, Ready};
use std::panic::AssertUnwindSafe;
use std::rc::Rc;
use std::time::Duration;

use actix_web::dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use futures_util::FutureExt;
use tokio::sync::oneshot;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn, Instrument, Span};

use crate::error::{FailureSignal, PipelineOutcome};
use crate::request_ctx;

/// Longest deadline a request can be given. Larger timeouts are clamped.
pub const MAX_REQUEST_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Deadline and cancellation token of the current request.
#[derive(Debug, Clone)]
pub struct RequestDeadline {
    pub deadline: Instant,
    pub token: CancellationToken,
}

impl RequestDeadline {
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the deadline guard has given up on this request.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }
}

impl FromRequest for RequestDeadline {
    type Error = FailureSignal;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let deadline = req.extensions().get::<RequestDeadline>().cloned();
        ready(deadline.ok_or_else(|| {
            FailureSignal::unknown("RequestDeadline extracted outside DeadlineGuard")
        }))
    }
}

/// Run `future` on its own local task, giving up after `timeout`.
///
/// A completed value is returned verbatim. Expiry cancels `token` and yields
/// `Failed(Timeout)`; a panic in the task yields `Failed(Unknown)`.
pub async fn run_with_deadline<F>(
    timeout: Duration,
    token: CancellationToken,
    future: F,
) -> PipelineOutcome<F::Output>
where
    F: Future + 'static,
    F::Output: 'static,
{
    let (tx, mut rx) = oneshot::channel::<Result<F::Output, FailureSignal>>();

    let task = async move {
        let outcome = AssertUnwindSafe(future)
            .catch_unwind()
            .await
            .map_err(|payload| {
                let message = panic_message(payload.as_ref());
                warn!(panic = %message, "handler panicked");
                FailureSignal::unknown(format!("handler panicked: {message}"))
            });
        let failed = outcome.is_err();
        if tx.send(outcome).is_err() {
            warn!(
                handler_failed = failed,
                "handler completed after the request deadline; outcome discarded"
            );
        }
    }
    .instrument(Span::current());

    actix_web::rt::spawn(request_ctx::with_request_id(request_ctx::request_id(), task));

    match tokio::time::timeout(timeout, &mut rx).await {
        Ok(Ok(Ok(value))) => PipelineOutcome::Completed(value),
        Ok(Ok(Err(signal))) => PipelineOutcome::Failed(signal),
        Ok(Err(_)) => PipelineOutcome::Failed(FailureSignal::unknown(
            "handler task ended without an outcome",
        )),
        Err(_) => {
            token.cancel();
            rx.close();
            // The task may have sent between expiry and close.
            if rx.try_recv().is_ok() {
                warn!("handler completed at the request deadline; outcome discarded");
            }
            debug!(timeout_ms = %timeout.as_millis(), "request deadline exceeded");
            PipelineOutcome::Failed(FailureSignal::Timeout)
        }
    }
}

/// Text of a panic payload, for `&str` and `String` payloads.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Runs everything downstream under a fixed per-request deadline.
#[derive(Clone)]
pub struct DeadlineGuard {
    timeout: Duration,
}

impl DeadlineGuard {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout: timeout.min(MAX_REQUEST_TIMEOUT),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<S, B> Transform<S, ServiceRequest> for DeadlineGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = DeadlineGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(DeadlineGuardMiddleware {
            service: Rc::new(service),
            timeout: self.timeout,
        }))
    }
}

pub struct DeadlineGuardMiddleware<S> {
    service: Rc<S>,
    timeout: Duration,
}

impl<S, B> Service<ServiceRequest> for DeadlineGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = CancellationToken::new();
        req.extensions_mut().insert(RequestDeadline {
            deadline: Instant::now() + self.timeout,
            token: token.clone(),
        });

        let service = Rc::clone(&self.service);
        let timeout = self.timeout;

        Box::pin(async move {
            let downstream = async move { service.call(req).await };
            match run_with_deadline(timeout, token, downstream).await {
                PipelineOutcome::Completed(result) => result,
                PipelineOutcome::Failed(signal) => Err(signal.into()),
            }
        })
    }
}
