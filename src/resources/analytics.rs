//! Read-only analytics resource. Cache keys carry the period parameters so
//! different periods are cached independently.

use crate::context::AppContext;
use crate::error::ApiError;
use crate::models::{EquipmentUtilization, FinancialSummary, MonthlyRevenue};
use crate::services::cache::QueryKey;

const RESOURCE: &str = "analytics";

pub async fn financial_summary(
    ctx: &AppContext,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<FinancialSummary, ApiError> {
    let mut path = "/analytics/financial-summary".to_string();
    let mut key = QueryKey::resource(RESOURCE).with("financial-summary");

    match (year, month) {
        (Some(y), Some(m)) => {
            path.push_str(&format!("?year={y}&month={m}"));
            key = key.with(y).with(m);
        }
        (Some(y), None) => {
            path.push_str(&format!("?year={y}"));
            key = key.with(y).with("all");
        }
        _ => {
            key = key.with("all").with("all");
        }
    }

    ctx.read(key, &path).await
}

pub async fn monthly_revenue(ctx: &AppContext) -> Result<Vec<MonthlyRevenue>, ApiError> {
    ctx.read(
        QueryKey::resource(RESOURCE).with("monthly-revenue"),
        "/analytics/monthly-revenue",
    )
    .await
}

pub async fn equipment_utilization(
    ctx: &AppContext,
) -> Result<Vec<EquipmentUtilization>, ApiError> {
    ctx.read(
        QueryKey::resource(RESOURCE).with("equipment-utilization"),
        "/analytics/equipment-utilization",
    )
    .await
}
