//! Authentication resource: login, verification, and session teardown.

use serde_json::Value;

use crate::context::AppContext;
use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse};

/// Exchange a PIN for a bearer token. On success the token is persisted and
/// the cache is dropped wholesale: the application restarts its state from
/// scratch instead of patching it incrementally.
pub async fn login(ctx: &AppContext, pin_code: &str) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest {
        pin_code: pin_code.to_string(),
    };
    let response: LoginResponse = ctx.client.post_json("/auth/login", &request).await?;

    ctx.session.login(response.token.clone()).await;
    ctx.cache.clear().await;

    Ok(response)
}

/// Confirm the persisted token with the backend. The session descriptor is
/// returned as-is; an authentication rejection has already cleared the
/// session by the time the error surfaces.
pub async fn verify(ctx: &AppContext) -> Result<Value, ApiError> {
    let descriptor = ctx.client.get_json::<Value>("/auth/verify").await?;
    ctx.session.confirm();
    Ok(descriptor)
}

/// Local logout: clear the token and the cache. No backend call involved.
pub async fn logout(ctx: &AppContext) {
    ctx.session.logout().await;
    ctx.cache.clear().await;
}
