//! Authentication-related data models.

use serde::{Deserialize, Serialize};

/// Request model for the PIN-style login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "pinCode")]
    pub pin_code: String,
}

/// Response model for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
