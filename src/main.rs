use actix_web::HttpServer;
use prokat_core::{create_proxy_app, ProxyConfig};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .json()
        .init();

    let config = ProxyConfig::from_env();
    let bind_addr = config.bind_addr.clone();

    tracing::info!(
        bind = %bind_addr,
        prefix = %config.mount_prefix,
        upstream = %config.upstream,
        "Starting proxy"
    );

    HttpServer::new(move || create_proxy_app(config.clone()))
        .bind(&bind_addr)?
        .run()
        .await
}
