//! Token types produced by the session handshake.

use std::fmt;

/// Token returned by the login step and consumed by the access-code step.
///
/// It lives only for the duration of one handshake.
pub(crate) struct OneTimeToken(String);

impl OneTimeToken {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for OneTimeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OneTimeToken").field(&"[REDACTED]").finish()
    }
}

/// Session token sent on every authenticated request.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in request headers.
    ///
    /// # Security
    ///
    /// Use only when constructing request headers or persisting a session.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_token_hides_value_in_debug() {
        let token = SessionToken::new("sess-abcdef");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("sess-abcdef"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn one_time_token_hides_value_in_debug() {
        let token = OneTimeToken::new("otp-123456");
        assert_eq!(token.as_str(), "otp-123456");
        assert!(!format!("{:?}", token).contains("otp-123456"));
    }
}
