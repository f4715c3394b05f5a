//! Endpoint table and authenticated dispatch.

mod dispatcher;
pub mod endpoints;

pub use dispatcher::Dispatcher;
pub use endpoints::{BodyKind, Endpoint};
