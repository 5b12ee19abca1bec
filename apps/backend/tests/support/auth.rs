//! Token helpers for tests

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use actix_web::http::header;
use backend::auth::claims::SubjectId;
use backend::auth::jwt::JwtSigner;
use backend::auth::signer::Signer;
use backend::middleware::TokenVerifier;
use jsonwebtoken::Algorithm;

pub const TEST_ISSUER: &str = "twclone-test";
pub const TEST_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";
pub const TOKEN_DURATION: Duration = Duration::from_secs(15 * 60);

/// The signer every test app is built with.
pub fn test_signer() -> Arc<JwtSigner> {
    Arc::new(
        JwtSigner::new(TEST_ISSUER, TEST_SECRET, vec![Algorithm::HS256], TOKEN_DURATION)
            .expect("test signer should build"),
    )
}

/// A verifier for custom protected scopes in tests.
pub fn test_verifier() -> TokenVerifier {
    TokenVerifier::new(test_signer())
}

/// A valid token for `user_id`, without the "Bearer " prefix.
pub fn mint_test_token(user_id: i64) -> String {
    test_signer()
        .sign(SubjectId(user_id))
        .expect("should mint token successfully")
}

/// A token that expired an hour ago.
pub fn mint_expired_token(user_id: i64) -> String {
    let issued = SystemTime::now() - TOKEN_DURATION - Duration::from_secs(3600);
    test_signer()
        .sign_at(SubjectId(user_id), issued)
        .expect("should mint token successfully")
}

/// A well-formed token from a signer with another secret.
pub fn mint_foreign_token(user_id: i64) -> String {
    JwtSigner::new(
        TEST_ISSUER,
        b"some_other_secret_entirely",
        vec![Algorithm::HS256],
        TOKEN_DURATION,
    )
    .expect("foreign signer should build")
    .sign(SubjectId(user_id))
    .expect("should mint token successfully")
}

pub fn bearer_header(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}
