//! Rental booking models.

use serde::{Deserialize, Serialize};

/// Where a booking came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalSource {
    #[default]
    Avito,
    Website,
    Referral,
    Maps,
}

impl RentalSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalSource::Avito => "avito",
            RentalSource::Website => "website",
            RentalSource::Referral => "referral",
            RentalSource::Maps => "maps",
        }
    }
}

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    #[default]
    Pending,
    Active,
    Completed,
    Overdue,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Pending => "pending",
            RentalStatus::Active => "active",
            RentalStatus::Completed => "completed",
            RentalStatus::Overdue => "overdue",
        }
    }
}

/// A rental booking. `equipment_instance` is only meaningful together with
/// `equipment_id`; the backend guarantees `end_date` is strictly after
/// `start_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rental {
    pub id: i64,
    pub equipment_id: i64,
    #[serde(default)]
    pub equipment_instance: Option<u32>,
    pub start_date: String,
    pub end_date: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub needs_delivery: bool,
    #[serde(default)]
    pub delivery_address: Option<String>,
    pub rental_price: f64,
    pub delivery_price: f64,
    pub delivery_costs: f64,
    pub source: RentalSource,
    #[serde(default)]
    pub comment: Option<String>,
    pub status: RentalStatus,
    pub created_at: String,
    pub updated_at: String,
    /// Denormalized display name, filled in by the backend on list reads.
    #[serde(default)]
    pub equipment_name: Option<String>,
}

/// Payload for creating a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRentalDto {
    pub equipment_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_instance: Option<u32>,
    pub start_date: String,
    pub end_date: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub needs_delivery: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    pub rental_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_costs: Option<f64>,
    pub source: RentalSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Partial update for a booking. Only the fields present are changed; this
/// is also how a booking is completed (`status: Some(Completed)`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateRentalDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_instance: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_delivery: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rental_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_costs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<RentalSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RentalStatus>,
}
