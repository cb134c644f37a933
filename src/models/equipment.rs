//! Equipment inventory models.

use serde::{Deserialize, Serialize};

/// A piece of rentable equipment. `quantity` counts interchangeable physical
/// instances tracked under the same identity, numbered 1..=quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: i64,
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub description: Option<String>,
    pub base_price: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload for creating or replacing an equipment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEquipmentDto {
    pub name: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub base_price: f64,
}
