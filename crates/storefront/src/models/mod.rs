//! Domain models local to the storefront service.

pub mod order;
pub mod session;
pub mod user;

pub use order::{Coordinates, Order, OrderItem};
pub use user::DeliveryAddress;
