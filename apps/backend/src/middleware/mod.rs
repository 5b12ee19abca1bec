//! Pipeline stages, outermost first: `RequestId`, `AccessLogger`,
//! `DeadlineGuard`, then `TokenVerifier` on protected scopes.

pub mod access_logger;
pub mod deadline_guard;
pub mod request_id;
pub mod token_verifier;

pub use access_logger::AccessLogger;
pub use deadline_guard::{run_with_deadline, DeadlineGuard, RequestDeadline};
pub use request_id::{RequestId, RequestIdValue};
pub use token_verifier::{verify_request, TokenVerifier};
