//! Read-only analytics aggregates computed by the backend.

use serde::{Deserialize, Serialize};

/// Profit-and-loss style summary for a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_revenue: f64,
    pub rental_revenue: f64,
    pub delivery_revenue: f64,
    pub total_costs: f64,
    pub delivery_costs: f64,
    pub operational_expenses: f64,
    pub net_profit: f64,
    pub total_rentals: u32,
}

/// Revenue rolled up per calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub total_revenue: f64,
    pub rental_count: u32,
}

/// How heavily each equipment identity is rented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentUtilization {
    pub id: i64,
    pub name: String,
    pub quantity: u32,
    pub total_rentals: u32,
    pub total_revenue: f64,
}
