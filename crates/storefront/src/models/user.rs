//! Per-user delivery data.

use serde::{Deserialize, Serialize};

use super::order::Coordinates;

/// The delivery address a caller saved on the location screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords: Option<Coordinates>,
}
