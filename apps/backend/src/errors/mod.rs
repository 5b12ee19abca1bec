//! Failure classification and its translation to client responses.

pub mod domain;
pub mod messages;
pub mod translate;

pub use domain::DomainFailure;
pub use translate::translate;
