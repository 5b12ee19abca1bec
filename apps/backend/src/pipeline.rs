//! Composition of the request pipeline around the application's routes.

use std::sync::Arc;
use std::time::Duration;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};

use crate::auth::signer::Signer;
use crate::extractors::validated_json::{json_error_handler, BODY_LIMIT};
use crate::middleware::{AccessLogger, DeadlineGuard, RequestId, TokenVerifier};

/// Everything needed to build the per-worker `App`.
///
/// Built once at start-up and cloned into each worker; it holds no mutable
/// state.
#[derive(Clone)]
pub struct Pipeline {
    request_timeout: Duration,
    signer: Arc<dyn Signer>,
}

impl Pipeline {
    pub fn new(request_timeout: Duration, signer: Arc<dyn Signer>) -> Self {
        Self {
            request_timeout,
            signer,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn signer(&self) -> Arc<dyn Signer> {
        Arc::clone(&self.signer)
    }

    pub fn deadline_guard(&self) -> DeadlineGuard {
        DeadlineGuard::new(self.request_timeout)
    }

    /// For wrapping the scopes that require a credential.
    pub fn token_verifier(&self) -> TokenVerifier {
        TokenVerifier::new(self.signer())
    }

    pub fn access_logger(&self) -> AccessLogger {
        AccessLogger
    }

    /// An `App` wrapped, outermost first, in `RequestId`, `AccessLogger` and
    /// `DeadlineGuard`, with `configure` applied for the routes.
    pub fn build_app<F>(
        &self,
        configure: F,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    >
    where
        F: FnOnce(&mut web::ServiceConfig),
    {
        App::new()
            .app_data(
                web::JsonConfig::default()
                    .limit(BODY_LIMIT)
                    .error_handler(json_error_handler),
            )
            .app_data(web::Data::from(self.signer()))
            .configure(configure)
            .wrap(self.deadline_guard())
            .wrap(self.access_logger())
            .wrap(RequestId)
    }
}
