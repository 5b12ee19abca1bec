use std::sync::Arc;

use actix_web::HttpServer;
use backend::auth::jwt::JwtSigner;
use backend::config::Config;
use backend::pipeline::Pipeline;
use backend::{routes, telemetry};
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    telemetry::init_tracing(&config.logger.level);

    let signer = match JwtSigner::from_config(&config.jwt) {
        Ok(signer) => signer,
        Err(e) => {
            eprintln!("❌ Invalid JWT configuration: {e}");
            std::process::exit(1);
        }
    };

    let pipeline = Pipeline::new(config.http_server.request_timeout(), Arc::new(signer));
    let server = &config.http_server;

    info!(
        host = %server.host,
        port = server.port,
        environment = ?config.app.environment,
        request_timeout_s = server.request_timeout_period,
        "starting backend"
    );

    HttpServer::new(move || {
        let verifier = pipeline.token_verifier();
        pipeline.build_app(move |cfg| routes::configure(cfg, verifier))
    })
    .shutdown_timeout(server.grace_period)
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
