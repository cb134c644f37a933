//! OpenAPI specification generation and app factory.

use crate::{
    config::ProxyConfig,
    handlers::{forward, health, version},
    middleware::RequestIdMiddleware,
};
use actix_web::App;
use paperclip::actix::{web, OpenApiExt};
use paperclip::v2::models::{DefaultApiRaw, Info};
use std::time::Duration;

/// Creates the shared OpenAPI specification for the proxy's own endpoints.
///
/// Forwarded backend routes are intentionally absent: the proxy is
/// transparent about them and only documents what it serves itself.
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Prokat Proxy".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Reverse proxy in front of the rental backend.\n\n\
                Requests under the mount prefix are forwarded upstream with \
                only `Authorization` and `Content-Type` carried over; every \
                response, including errors, carries permissive CORS headers. \
                CORS preflight requests are answered locally and never reach \
                the backend."
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates the proxy application with shared configuration.
///
/// Used both by the binary and by integration tests.
pub fn create_proxy_app(
    config: ProxyConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()
        .expect("Failed to create HTTP client");

    App::new()
        .wrap(RequestIdMiddleware)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(web::Data::new(config))
        .app_data(web::Data::new(client))
        .service(web::resource("/health").route(web::get().to(health)))
        .service(web::resource("/version").route(web::get().to(version)))
        .with_json_spec_at("/spec/v2")
        .build()
        .default_service(actix_web::web::route().to(forward))
}
