//! Catch-all forwarding handler.
//!
//! Every request that does not match a local endpoint is forwarded to the
//! upstream backend: the mount prefix is stripped, the method, query string,
//! and body are carried over, and only an allowlisted set of request headers
//! crosses the boundary. Responses mirror the upstream status and body and
//! always carry permissive CORS headers so browser clients on another origin
//! can talk to the backend through this proxy.

use actix_web::{web, HttpRequest, HttpResponse, HttpResponseBuilder};
use serde_json::json;

use crate::config::ProxyConfig;

/// Request headers that are forwarded upstream. Everything else (cookies,
/// origin headers, hop-by-hop headers) stays on this side.
const FORWARDED_HEADERS: [&str; 2] = ["authorization", "content-type"];

fn with_cors(mut builder: HttpResponseBuilder) -> HttpResponseBuilder {
    builder
        .insert_header(("Access-Control-Allow-Origin", "*"))
        .insert_header(("Access-Control-Allow-Headers", "Content-Type, Authorization"))
        .insert_header((
            "Access-Control-Allow-Methods",
            "GET, POST, PUT, DELETE, OPTIONS",
        ))
        .insert_header(("Access-Control-Max-Age", "86400"));
    builder
}

/// Forward one request to the upstream backend.
pub async fn forward(
    req: HttpRequest,
    body: web::Bytes,
    config: web::Data<ProxyConfig>,
    client: web::Data<reqwest::Client>,
) -> HttpResponse {
    // Preflight never reaches the backend.
    if req.method() == actix_web::http::Method::OPTIONS {
        return with_cors(HttpResponse::Ok()).finish();
    }

    let path = req.path();
    let stripped = match path.strip_prefix(config.mount_prefix.as_str()) {
        Some(rest) => rest,
        None => {
            return with_cors(HttpResponse::NotFound())
                .json(json!({ "error": "Not found" }));
        }
    };

    let mut url = format!("{}{}", config.upstream, stripped);
    if !req.query_string().is_empty() {
        url.push('?');
        url.push_str(req.query_string());
    }

    // actix-web and reqwest sit on different `http` major versions, so the
    // method crosses over as its string form.
    let method = match reqwest::Method::from_bytes(req.method().as_str().as_bytes()) {
        Ok(method) => method,
        Err(_) => {
            return with_cors(HttpResponse::MethodNotAllowed()).finish();
        }
    };

    let mut upstream_req = client.request(method, &url);
    for name in FORWARDED_HEADERS {
        if let Some(value) = req.headers().get(name).and_then(|v| v.to_str().ok()) {
            upstream_req = upstream_req.header(name, value);
        }
    }
    if !body.is_empty() {
        upstream_req = upstream_req.body(body.to_vec());
    }

    match upstream_req.send().await {
        Ok(upstream_res) => {
            let status = actix_web::http::StatusCode::from_u16(upstream_res.status().as_u16())
                .unwrap_or(actix_web::http::StatusCode::BAD_GATEWAY);
            let content_type = upstream_res
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("application/json")
                .to_string();
            let bytes = upstream_res.bytes().await.unwrap_or_default();

            with_cors(HttpResponseBuilder::new(status))
                .content_type(content_type)
                .body(bytes.to_vec())
        }
        Err(err) => {
            tracing::warn!(target: "proxy", url = %url, error = %err, "Upstream request failed");
            with_cors(HttpResponse::BadGateway()).json(json!({
                "error": "Backend connection failed",
                "message": err.to_string(),
                "details": null,
                "url": url,
            }))
        }
    }
}
