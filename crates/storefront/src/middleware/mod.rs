//! Request middleware: sessions and caller identity.

pub mod identity;
pub mod session;

pub use identity::CallerId;
pub use session::create_session_layer;
