//! Customer models.

use serde::{Deserialize, Serialize};

/// A customer as aggregated by the backend from booking history. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_name: String,
    pub customer_phone: String,
    pub rental_count: u32,
}
