//! Request/response models local to the admin service.

pub mod order;
pub mod product;

pub use order::{Coordinates, Order, OrderItem};
pub use product::{NewProduct, ProductPatch};
