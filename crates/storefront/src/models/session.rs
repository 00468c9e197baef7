//! Session data keys.
//!
//! All session reads/writes go through these constants so key typos can't
//! split state across two entries.

/// Session key constants.
pub mod session_keys {
    /// The shopper's cart ledger (`dessert_devs_core::Cart`).
    pub const CART: &str = "dd.cart";
}
