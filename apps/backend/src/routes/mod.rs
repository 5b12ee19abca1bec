use actix_web::web;

use crate::middleware::TokenVerifier;

pub mod health;
pub mod me;
pub mod posts;

/// Public routes at the root, protected routes under `/api` behind the
/// token verifier.
pub fn configure(cfg: &mut web::ServiceConfig, verifier: TokenVerifier) {
    cfg.service(web::scope("/health").configure(health::configure_routes));

    cfg.service(
        web::scope("/api")
            .wrap(verifier)
            .service(web::scope("/me").configure(me::configure_routes))
            .service(web::scope("/posts").configure(posts::configure_routes)),
    );
}
