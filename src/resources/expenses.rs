//! Operational expenses resource.
//!
//! Expenses feed the backend's financial summaries, so every write here
//! invalidates the cached analytics keys as well: a summary read after an
//! expense write must never be served stale.

use crate::context::AppContext;
use crate::error::ApiError;
use crate::models::{CreateExpenseDto, Expense};
use crate::services::cache::QueryKey;

const RESOURCE: &str = "expenses";

async fn invalidate_after_write(ctx: &AppContext) {
    ctx.cache.invalidate(RESOURCE).await;
    ctx.cache.invalidate("analytics").await;
}

pub async fn list(ctx: &AppContext) -> Result<Vec<Expense>, ApiError> {
    ctx.read(QueryKey::resource(RESOURCE), "/expenses").await
}

pub async fn create(ctx: &AppContext, dto: &CreateExpenseDto) -> Result<Expense, ApiError> {
    let expense = ctx.client.post_json("/expenses", dto).await?;
    invalidate_after_write(ctx).await;
    Ok(expense)
}

pub async fn update(
    ctx: &AppContext,
    id: i64,
    dto: &CreateExpenseDto,
) -> Result<Expense, ApiError> {
    let expense = ctx.client.put_json(&format!("/expenses/{id}"), dto).await?;
    invalidate_after_write(ctx).await;
    Ok(expense)
}

pub async fn delete(ctx: &AppContext, id: i64) -> Result<(), ApiError> {
    ctx.client.delete(&format!("/expenses/{id}")).await?;
    invalidate_after_write(ctx).await;
    Ok(())
}
