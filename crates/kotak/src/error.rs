//! Error types for the kotak client.
//!
//! This module provides a unified error type with explicit variants for
//! validation, authentication, transport, and response decoding failures.
//! No variant is recovered from internally; every error reaches the caller.

use std::fmt;
use thiserror::Error;

/// The unified error type for kotak operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied data failed a precondition. No request was sent.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// A step of the session handshake failed.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// An authenticated call was attempted before a session existed.
    #[error("not authenticated: no session has been established")]
    NotAuthenticated,

    /// Network or HTTP-level failure.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The response body was not valid JSON.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl Error {
    /// HTTP status attached to this error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport(TransportError::Status { status, .. }) => Some(*status),
            Error::Decode(err) => Some(err.status),
            Error::Auth(AuthError::Handshake {
                reason: HandshakeFailure::Status { status },
                ..
            }) => Some(*status),
            _ => None,
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Modify-order was given an order without an identifier.
    #[error("order id is required to modify an order")]
    MissingOrderId,

    /// A path template placeholder had no value.
    #[error("endpoint '{endpoint}' requires a value for '{{{parameter}}}'")]
    MissingPathParameter {
        endpoint: &'static str,
        parameter: &'static str,
    },

    /// A request body was missing, unexpected, or could not be serialized.
    #[error("invalid body for '{endpoint}': {reason}")]
    Body {
        endpoint: &'static str,
        reason: String,
    },

    /// Invalid base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// The server answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: String,
        status: u16,
        /// Response body, when it was valid JSON.
        body: Option<serde_json::Value>,
    },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

/// The step of the session handshake an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeStep {
    /// `GET /session/1.0/session/init`
    SessionInit,
    /// `POST /session/1.0/session/login/userid`
    Login,
    /// `POST /session/1.0/session/2FA/accesscode`
    AccessCode,
}

impl fmt::Display for HandshakeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandshakeStep::SessionInit => "session init",
            HandshakeStep::Login => "login",
            HandshakeStep::AccessCode => "access code exchange",
        };
        f.write_str(name)
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A handshake step failed.
    #[error("{step} failed: {reason}")]
    Handshake {
        step: HandshakeStep,
        reason: HandshakeFailure,
    },

    /// The session was restored without credentials and cannot be re-established.
    #[error("no credentials available to re-authenticate")]
    CredentialsUnavailable,
}

impl AuthError {
    pub(crate) fn at(step: HandshakeStep, reason: HandshakeFailure) -> Self {
        AuthError::Handshake { step, reason }
    }

    /// The failing handshake step, if any.
    pub fn step(&self) -> Option<HandshakeStep> {
        match self {
            AuthError::Handshake { step, .. } => Some(*step),
            AuthError::CredentialsUnavailable => None,
        }
    }
}

/// Why a handshake step failed.
#[derive(Debug, Error)]
pub enum HandshakeFailure {
    /// The HTTP call itself failed.
    #[error("{0}")]
    Transport(TransportError),

    /// The server answered with a non-success status.
    #[error("HTTP {status}")]
    Status { status: u16 },

    /// The body was not valid JSON.
    #[error("response is not valid JSON: {message}")]
    Decode { message: String },

    /// The body was JSON but lacked the expected token.
    #[error("response is missing '{field}'")]
    MissingField { field: &'static str },
}

/// A response body that could not be decoded as JSON.
#[derive(Debug)]
pub struct DecodeError {
    /// Endpoint the response came from.
    pub endpoint: String,
    /// HTTP status code of the response.
    pub status: u16,
    /// Parser message.
    pub message: String,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (HTTP {}): {}",
            self.endpoint, self.status, self.message
        )
    }
}

impl std::error::Error for DecodeError {}
