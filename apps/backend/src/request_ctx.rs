//! Task-local request id.
//!
//! Set by the `RequestId` middleware and re-established by the deadline guard
//! on the task it spawns, so helpers that only see the current task (security
//! logs, for one) can still name the request.

use tokio::task_local;

task_local! {
    static REQUEST_ID: String;
}

/// The current request id, or `"unknown"` outside a request.
pub fn request_id() -> String {
    REQUEST_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Like [`request_id`], but `None` outside a request.
pub fn try_request_id() -> Option<String> {
    REQUEST_ID.try_with(Clone::clone).ok()
}

pub async fn with_request_id<F, R>(request_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    REQUEST_ID.scope(request_id, future).await
}

/// Run a synchronous closure with the request id set.
pub fn sync_with_request_id<F, R>(request_id: String, f: F) -> R
where
    F: FnOnce() -> R,
{
    REQUEST_ID.sync_scope(request_id, f)
}
