use tracing::warn;

use crate::request_ctx;

/// A request was refused by the token verifier.
///
/// `reason` is a short fixed code (`missing_credential`, `token_expired`, ...);
/// callers never pass token text here.
pub fn auth_rejected(reason: &str) {
    let request_id = request_ctx::request_id();

    warn!(
        event = "SECURITY_AUTH_REJECTED",
        %request_id,
        reason,
        "Authentication failure"
    );
}
