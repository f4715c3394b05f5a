//! Validated and domain types.

mod base_url;
mod order;

pub use base_url::{BaseUrl, DEFAULT_BASE_URL};
pub use order::{Order, TransactionType};
