//! Rental bookings resource.

use crate::context::AppContext;
use crate::error::ApiError;
use crate::models::{CreateRentalDto, Rental, RentalStatus, UpdateRentalDto};
use crate::services::cache::QueryKey;

const RESOURCE: &str = "rentals";

pub async fn list(ctx: &AppContext) -> Result<Vec<Rental>, ApiError> {
    ctx.read(QueryKey::resource(RESOURCE), "/rentals").await
}

pub async fn create(ctx: &AppContext, dto: &CreateRentalDto) -> Result<Rental, ApiError> {
    let rental = ctx.client.post_json("/rentals", dto).await?;
    ctx.cache.invalidate(RESOURCE).await;
    Ok(rental)
}

pub async fn update(
    ctx: &AppContext,
    id: i64,
    dto: &UpdateRentalDto,
) -> Result<Rental, ApiError> {
    let rental = ctx.client.put_json(&format!("/rentals/{id}"), dto).await?;
    ctx.cache.invalidate(RESOURCE).await;
    Ok(rental)
}

/// Mark a booking completed.
pub async fn complete(ctx: &AppContext, id: i64) -> Result<Rental, ApiError> {
    let dto = UpdateRentalDto {
        status: Some(RentalStatus::Completed),
        ..Default::default()
    };
    update(ctx, id, &dto).await
}

pub async fn delete(ctx: &AppContext, id: i64) -> Result<(), ApiError> {
    ctx.client.delete(&format!("/rentals/{id}")).await?;
    ctx.cache.invalidate(RESOURCE).await;
    Ok(())
}
