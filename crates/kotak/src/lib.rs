//! kotak - Kotak Securities trade API client
//!
//! This library wraps the trade REST API behind a session-centric client.
//! A [`KotakClient`] is only handed out once the three-step session handshake
//! has completed, and every call after that carries the session headers.
//!
//! # Example
//!
//! ```no_run
//! use kotak::{Config, Credentials, KotakClient, Order, TransactionType};
//!
//! # async fn example() -> Result<(), kotak::Error> {
//! let credentials = Credentials::new(
//!     "AB1234", "password", "my-app", "consumer-key", "secret-key", "1234",
//! );
//! let client = KotakClient::connect(Config::new(credentials)).await?;
//!
//! let order = Order::new(727, TransactionType::Buy, 10)
//!     .with_price(101.5)
//!     .with_validity("GFD")
//!     .with_variety("REGULAR");
//! let placed = client.place_normal_order(&order).await?;
//! println!("{placed}");
//!
//! let ltp = client.quote_ltp("727").await?;
//! println!("{ltp}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{Credentials, SessionState, SessionToken};
pub use client::KotakClient;
pub use config::Config;
pub use error::Error;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Transport, Verb};
pub use types::{BaseUrl, Order, TransactionType};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
