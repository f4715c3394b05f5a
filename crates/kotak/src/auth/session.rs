//! Session handshake and ownership of the session state.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, trace};

use crate::api::endpoints::{Endpoint, SESSION_2FA, SESSION_INIT, SESSION_LOGIN};
use crate::error::{AuthError, Error, HandshakeFailure, HandshakeStep};
use crate::transport::{HttpRequest, Transport};
use crate::types::BaseUrl;

use super::credentials::Credentials;
use super::state::SessionState;
use super::tokens::{OneTimeToken, SessionToken};

const ONE_TIME_TOKEN_FIELD: &str = "oneTimeToken";
const SESSION_TOKEN_FIELD: &str = "sessionToken";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    userid: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AccessCodeRequest<'a> {
    userid: &'a str,
    access_code: &'a str,
}

/// Runs the session handshake and owns the resulting [`SessionState`].
///
/// The manager is the only writer of the state. Each write replaces the whole
/// value, so readers see either no session, the previous one, or the new one.
pub struct SessionManager<T> {
    base_url: BaseUrl,
    transport: Arc<T>,
    credentials: Option<Credentials>,
    state: RwLock<Option<SessionState>>,
}

impl<T: Transport> SessionManager<T> {
    /// A manager with no session yet. No request is made.
    pub fn new(base_url: BaseUrl, credentials: Credentials, transport: Arc<T>) -> Self {
        Self {
            base_url,
            transport,
            credentials: Some(credentials),
            state: RwLock::new(None),
        }
    }

    /// A manager holding a previously persisted session and no credentials.
    ///
    /// Such a manager cannot re-authenticate.
    pub fn restored(base_url: BaseUrl, state: SessionState, transport: Arc<T>) -> Self {
        Self {
            base_url,
            transport,
            credentials: None,
            state: RwLock::new(Some(state)),
        }
    }

    /// Run the full handshake and store the resulting session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] naming the failing step. The stored session is
    /// left untouched on failure.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn initialize(&self) -> Result<SessionState, Error> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(AuthError::CredentialsUnavailable)?;

        info!(user_id = %credentials.user_id(), "Establishing session");
        let state = self.handshake(credentials).await?;

        *self.state.write().await = Some(state.clone());

        debug!("Session established");
        Ok(state)
    }

    /// Re-run the handshake with the retained credentials.
    ///
    /// The current session stays in place until the new one is established.
    pub async fn reauthenticate(&self) -> Result<SessionState, Error> {
        self.initialize().await
    }

    /// Snapshot of the current session, if one exists.
    pub async fn current(&self) -> Option<SessionState> {
        self.state.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_some()
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    async fn handshake(&self, credentials: &Credentials) -> Result<SessionState, AuthError> {
        let headers = handshake_headers(credentials);

        self.step(
            HandshakeStep::SessionInit,
            &SESSION_INIT,
            headers.clone(),
            None,
        )
        .await?;

        let login = LoginRequest {
            userid: credentials.user_id(),
            password: credentials.password(),
        };
        let login_data = self
            .step(
                HandshakeStep::Login,
                &SESSION_LOGIN,
                headers.clone(),
                Some(encode(HandshakeStep::Login, &login)?),
            )
            .await?;
        let one_time_token = OneTimeToken::new(token_field(
            HandshakeStep::Login,
            &login_data,
            ONE_TIME_TOKEN_FIELD,
        )?);

        let mut access_headers = headers;
        access_headers.push((
            ONE_TIME_TOKEN_FIELD.to_string(),
            one_time_token.as_str().to_string(),
        ));
        let access = AccessCodeRequest {
            userid: credentials.user_id(),
            access_code: credentials.access_code(),
        };
        let access_data = self
            .step(
                HandshakeStep::AccessCode,
                &SESSION_2FA,
                access_headers,
                Some(encode(HandshakeStep::AccessCode, &access)?),
            )
            .await?;
        let session_token = SessionToken::new(token_field(
            HandshakeStep::AccessCode,
            &access_data,
            SESSION_TOKEN_FIELD,
        )?);

        Ok(SessionState::new(credentials.consumer_key(), session_token))
    }

    #[instrument(skip(self, endpoint, headers, body), fields(endpoint = endpoint.name))]
    async fn step(
        &self,
        step: HandshakeStep,
        endpoint: &Endpoint,
        headers: Vec<(String, String)>,
        body: Option<String>,
    ) -> Result<Value, AuthError> {
        let url = self.base_url.endpoint_url(endpoint.path);
        debug!(%step, verb = %endpoint.verb, "Handshake request");

        let mut request = HttpRequest::new(endpoint.verb, url).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| AuthError::at(step, HandshakeFailure::Transport(e)))?;
        trace!(status = response.status, "Handshake response");

        if !response.is_success() {
            return Err(AuthError::at(
                step,
                HandshakeFailure::Status {
                    status: response.status,
                },
            ));
        }

        serde_json::from_str(&response.body).map_err(|e| {
            AuthError::at(
                step,
                HandshakeFailure::Decode {
                    message: e.to_string(),
                },
            )
        })
    }
}

impl<T> std::fmt::Debug for SessionManager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("state", &"[REDACTED]")
            .finish()
    }
}

/// Headers sent on every handshake step.
fn handshake_headers(credentials: &Credentials) -> Vec<(String, String)> {
    vec![
        ("Content-Type".to_string(), "application/json".to_string()),
        ("userid".to_string(), credentials.user_id().to_string()),
        ("appId".to_string(), credentials.app_id().to_string()),
        (
            "consumerKey".to_string(),
            credentials.consumer_key().to_string(),
        ),
        (
            "Authorization".to_string(),
            format!("Bearer {}", credentials.secret_key()),
        ),
    ]
}

fn encode<B: Serialize>(step: HandshakeStep, body: &B) -> Result<String, AuthError> {
    serde_json::to_string(body).map_err(|e| {
        AuthError::at(
            step,
            HandshakeFailure::Decode {
                message: e.to_string(),
            },
        )
    })
}

/// Extract a non-empty string token from a handshake response.
fn token_field(
    step: HandshakeStep,
    data: &Value,
    field: &'static str,
) -> Result<String, AuthError> {
    data.get(field)
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AuthError::at(step, HandshakeFailure::MissingField { field }))
}
