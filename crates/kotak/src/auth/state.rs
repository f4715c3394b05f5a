//! Established session state.

use super::tokens::SessionToken;

/// Header carrying the consumer key on authenticated requests.
pub const CONSUMER_KEY_HEADER: &str = "consumerKey";

/// Header carrying the session token on authenticated requests.
pub const SESSION_TOKEN_HEADER: &str = "sessionToken";

/// The result of a completed handshake.
///
/// A `SessionState` is immutable: re-authenticating produces a new value that
/// replaces the old one as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    consumer_key: String,
    session_token: SessionToken,
}

impl SessionState {
    pub(crate) fn new(consumer_key: impl Into<String>, session_token: SessionToken) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            session_token,
        }
    }

    /// Rebuild a session from values saved by [`SessionState::export_session_token`].
    ///
    /// The caller is responsible for the token still being valid server-side.
    pub fn from_persisted(
        consumer_key: impl Into<String>,
        session_token: impl Into<String>,
    ) -> Self {
        Self::new(consumer_key, SessionToken::new(session_token))
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn session_token(&self) -> &SessionToken {
        &self.session_token
    }

    /// Export the session token for persistence.
    ///
    /// # Security
    ///
    /// Handle the returned token securely. It grants access to the account.
    pub fn export_session_token(&self) -> String {
        self.session_token.as_str().to_string()
    }

    /// The exact header set sent with every authenticated request.
    pub fn headers(&self) -> [(&'static str, &str); 2] {
        [
            (CONSUMER_KEY_HEADER, self.consumer_key.as_str()),
            (SESSION_TOKEN_HEADER, self.session_token.as_str()),
        ]
    }
}
