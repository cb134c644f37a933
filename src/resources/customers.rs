//! Customers resource (read-only, aggregated by the backend).

use crate::context::AppContext;
use crate::error::ApiError;
use crate::models::Customer;
use crate::services::cache::QueryKey;

pub async fn list(ctx: &AppContext) -> Result<Vec<Customer>, ApiError> {
    ctx.read(QueryKey::resource("customers"), "/customers").await
}
