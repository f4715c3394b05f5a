//! Authentication types and session management.
//!
//! A session is established by a three-step handshake (session init, login,
//! access-code exchange). Its result, a [`SessionState`], authorizes every
//! other call.

mod credentials;
mod session;
mod state;
mod tokens;

pub use credentials::Credentials;
pub use session::SessionManager;
pub use state::{CONSUMER_KEY_HEADER, SESSION_TOKEN_HEADER, SessionState};
pub use tokens::SessionToken;
