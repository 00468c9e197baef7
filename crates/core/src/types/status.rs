//! Order lifecycle status.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Order fulfillment status.
///
/// The wire encoding is kebab-case to stay compatible with the order
/// documents the mobile app already stores (`"on-the-way"` etc.). Status is
/// advanced by the admin panel; shoppers can only move an order to
/// `Cancelled`, and only while it is still `Placed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Placed,
    Preparing,
    OnTheWay,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether a shopper may still cancel an order in this state.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        matches!(self, Self::Placed)
    }

    /// Stable string form, matching the serde encoding.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Placed => "placed",
            Self::Preparing => "preparing",
            Self::OnTheWay => "on-the-way",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse the stable string form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "placed" => Some(Self::Placed),
            "preparing" => Some(Self::Preparing),
            "on-the-way" => Some(Self::OnTheWay),
            "delivered" => Some(Self::Delivered),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_encoding_is_kebab_case() {
        let json = serde_json::to_string(&OrderStatus::OnTheWay).expect("serialize");
        assert_eq!(json, "\"on-the-way\"");
        let parsed: OrderStatus = serde_json::from_str("\"cancelled\"").expect("deserialize");
        assert_eq!(parsed, OrderStatus::Cancelled);
    }

    #[test]
    fn only_placed_orders_are_cancellable() {
        assert!(OrderStatus::Placed.is_cancellable());
        assert!(!OrderStatus::Preparing.is_cancellable());
        assert!(!OrderStatus::OnTheWay.is_cancellable());
        assert!(!OrderStatus::Delivered.is_cancellable());
        assert!(!OrderStatus::Cancelled.is_cancellable());
    }

    #[test]
    fn parse_round_trips() {
        for status in [
            OrderStatus::Placed,
            OrderStatus::Preparing,
            OrderStatus::OnTheWay,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("shipped"), None);
    }
}
