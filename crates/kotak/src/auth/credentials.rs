//! Login credentials type.

use std::fmt;

/// Credentials for the trade API session handshake.
///
/// All six values are issued by the brokerage when API access is enabled.
/// They are fixed for the lifetime of a client.
///
/// # Security
///
/// The password, secret key and access code are never exposed in Debug output.
///
/// # Example
///
/// ```
/// use kotak::Credentials;
///
/// let creds = Credentials::new("AB1234", "pass", "app", "ck", "secret", "1234");
/// assert_eq!(creds.user_id(), "AB1234");
/// assert_eq!(creds.consumer_key(), "ck");
/// ```
#[derive(Clone)]
pub struct Credentials {
    user_id: String,
    password: String,
    app_id: String,
    consumer_key: String,
    secret_key: String,
    access_code: String,
}

impl Credentials {
    /// Create new credentials.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Trading account user id
    /// * `password` - Trading account password
    /// * `app_id` - Registered application id
    /// * `consumer_key` - API consumer key
    /// * `secret_key` - API consumer secret, sent as the bearer token during login
    /// * `access_code` - One-time second-factor access code
    pub fn new(
        user_id: impl Into<String>,
        password: impl Into<String>,
        app_id: impl Into<String>,
        consumer_key: impl Into<String>,
        secret_key: impl Into<String>,
        access_code: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
            app_id: app_id.into(),
            consumer_key: consumer_key.into(),
            secret_key: secret_key.into(),
            access_code: access_code.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    pub(crate) fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub(crate) fn access_code(&self) -> &str {
        &self.access_code
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("app_id", &self.app_id)
            .field("consumer_key", &self.consumer_key)
            .field("password", &"[REDACTED]")
            .field("secret_key", &"[REDACTED]")
            .field("access_code", &"[REDACTED]")
            .finish()
    }
}
