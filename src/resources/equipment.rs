//! Equipment inventory resource.

use crate::context::AppContext;
use crate::error::ApiError;
use crate::models::{CreateEquipmentDto, Equipment};
use crate::services::cache::QueryKey;

const RESOURCE: &str = "equipment";

pub async fn list(ctx: &AppContext) -> Result<Vec<Equipment>, ApiError> {
    ctx.read(QueryKey::resource(RESOURCE), "/equipment").await
}

pub async fn create(ctx: &AppContext, dto: &CreateEquipmentDto) -> Result<Equipment, ApiError> {
    let item = ctx.client.post_json("/equipment", dto).await?;
    ctx.cache.invalidate(RESOURCE).await;
    Ok(item)
}

pub async fn update(
    ctx: &AppContext,
    id: i64,
    dto: &CreateEquipmentDto,
) -> Result<Equipment, ApiError> {
    let item = ctx.client.put_json(&format!("/equipment/{id}"), dto).await?;
    ctx.cache.invalidate(RESOURCE).await;
    Ok(item)
}

pub async fn delete(ctx: &AppContext, id: i64) -> Result<(), ApiError> {
    ctx.client.delete(&format!("/equipment/{id}")).await?;
    ctx.cache.invalidate(RESOURCE).await;
    Ok(())
}
