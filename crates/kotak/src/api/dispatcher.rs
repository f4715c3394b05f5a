//! Authenticated request dispatch.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, trace};

use crate::auth::SessionState;
use crate::error::{DecodeError, Error, TransportError, ValidationError};
use crate::transport::{HttpRequest, Transport};
use crate::types::BaseUrl;

use super::endpoints::{BodyKind, Endpoint};

/// Issues authenticated calls against the endpoint table.
///
/// Each call is one round trip: no retry, no pagination, no caching. The
/// decoded JSON is returned verbatim; interpreting it is the caller's job.
pub struct Dispatcher<T> {
    base_url: BaseUrl,
    transport: Arc<T>,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(base_url: BaseUrl, transport: Arc<T>) -> Self {
        Self {
            base_url,
            transport,
        }
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Send one authenticated request.
    ///
    /// The only headers sent are the session's `consumerKey` and
    /// `sessionToken`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotAuthenticated`] when `session` is `None`; nothing is sent
    /// - [`ValidationError`] for a missing path parameter or body; nothing is sent
    /// - [`TransportError`] for network failures and non-2xx statuses
    /// - [`DecodeError`] when a 2xx body is not JSON
    #[instrument(skip(self, endpoint, session, body), fields(endpoint = endpoint.name))]
    pub async fn dispatch(
        &self,
        session: Option<&SessionState>,
        endpoint: &Endpoint,
        param: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Value, Error> {
        let session = session.ok_or(Error::NotAuthenticated)?;
        let path = endpoint.resolve(param)?;

        let body = match (endpoint.body, body) {
            (BodyKind::Json, Some(body)) => Some(body.to_string()),
            (BodyKind::Json, None) => {
                return Err(ValidationError::Body {
                    endpoint: endpoint.name,
                    reason: "a JSON body is required".to_string(),
                }
                .into());
            }
            (BodyKind::None, Some(_)) => {
                return Err(ValidationError::Body {
                    endpoint: endpoint.name,
                    reason: "this endpoint takes no body".to_string(),
                }
                .into());
            }
            (BodyKind::None, None) => None,
        };

        let url = self.base_url.endpoint_url(&path);
        debug!(verb = %endpoint.verb, %path, "Authenticated request");

        let mut request = HttpRequest::new(endpoint.verb, url).headers(session.headers());
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = self.transport.send(request).await?;
        trace!(status = response.status, "Authenticated response");

        if !response.is_success() {
            return Err(TransportError::Status {
                endpoint: path,
                status: response.status,
                body: serde_json::from_str(&response.body).ok(),
            }
            .into());
        }

        serde_json::from_str(&response.body).map_err(|e| {
            DecodeError {
                endpoint: path,
                status: response.status,
                message: e.to_string(),
            }
            .into()
        })
    }
}

impl<T> std::fmt::Debug for Dispatcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints::{CANCEL_ORDER, MODIFY_ORDER, ORDERS, QUOTE};
    use crate::transport::Verb;
    use crate::transport::mock::RecordingTransport;
    use serde_json::json;

    fn dispatcher(
        transport: RecordingTransport,
    ) -> (Dispatcher<RecordingTransport>, Arc<RecordingTransport>) {
        let transport = Arc::new(transport);
        let base = BaseUrl::new("https://api.test/apim").unwrap();
        (Dispatcher::new(base, Arc::clone(&transport)), transport)
    }

    fn session() -> SessionState {
        SessionState::from_persisted("ck-1", "S1")
    }

    #[tokio::test]
    async fn no_session_means_no_request() {
        let (dispatcher, transport) = dispatcher(RecordingTransport::new());

        let err = dispatcher
            .dispatch(None, &ORDERS, None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NotAuthenticated));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn attaches_only_session_headers() {
        let (dispatcher, transport) =
            dispatcher(RecordingTransport::new().respond(200, r#"{"foo":"bar"}"#));

        let value = dispatcher
            .dispatch(Some(&session()), &QUOTE, Some("2523"), None)
            .await
            .unwrap();
        assert_eq!(value, json!({"foo": "bar"}));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.verb, Verb::Get);
        assert_eq!(request.url, "https://api.test/apim/quotes/v1.0/instruments/2523");
        assert_eq!(
            request.headers,
            vec![
                ("consumerKey".to_string(), "ck-1".to_string()),
                ("sessionToken".to_string(), "S1".to_string()),
            ]
        );
        assert_eq!(request.body, None);
    }

    #[tokio::test]
    async fn serializes_body_as_json_text() {
        let (dispatcher, transport) = dispatcher(RecordingTransport::new());
        let body = json!({"orderId": "ORD1", "quantity": 3});

        dispatcher
            .dispatch(Some(&session()), &MODIFY_ORDER, None, Some(&body))
            .await
            .unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.verb, Verb::Put);
        let sent: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent, body);
    }

    #[tokio::test]
    async fn delete_sends_no_body() {
        let (dispatcher, transport) = dispatcher(RecordingTransport::new());

        dispatcher
            .dispatch(Some(&session()), &CANCEL_ORDER, Some("ORD123"), None)
            .await
            .unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.verb, Verb::Delete);
        assert!(request.url.ends_with("/orders/1.0/order/ORD123"));
        assert_eq!(request.body, None);
    }

    #[tokio::test]
    async fn missing_path_parameter_sends_nothing() {
        let (dispatcher, transport) = dispatcher(RecordingTransport::new());

        let err = dispatcher
            .dispatch(Some(&session()), &CANCEL_ORDER, None, None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingPathParameter { .. })
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn body_mismatch_sends_nothing() {
        let (dispatcher, transport) = dispatcher(RecordingTransport::new());

        let missing = dispatcher
            .dispatch(Some(&session()), &MODIFY_ORDER, None, None)
            .await
            .unwrap_err();
        let unexpected = dispatcher
            .dispatch(Some(&session()), &ORDERS, None, Some(&json!({})))
            .await
            .unwrap_err();

        assert!(matches!(missing, Error::Validation(ValidationError::Body { .. })));
        assert!(matches!(unexpected, Error::Validation(ValidationError::Body { .. })));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn non_success_status_carries_endpoint_and_body() {
        let (dispatcher, _transport) =
            dispatcher(RecordingTransport::new().respond(401, r#"{"fault":"invalid session"}"#));

        let err = dispatcher
            .dispatch(Some(&session()), &ORDERS, None, None)
            .await
            .unwrap_err();

        match err {
            Error::Transport(TransportError::Status {
                endpoint,
                status,
                body,
            }) => {
                assert_eq!(endpoint, "/reports/1.0/orders");
                assert_eq!(status, 401);
                assert_eq!(body, Some(json!({"fault": "invalid session"})));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_success_is_a_decode_error() {
        let (dispatcher, _transport) =
            dispatcher(RecordingTransport::new().respond(200, "not json"));

        let err = dispatcher
            .dispatch(Some(&session()), &ORDERS, None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Decode(DecodeError { status: 200, .. })));
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let (dispatcher, _transport) = dispatcher(RecordingTransport::new().fail(
            TransportError::Connection {
                message: "refused".to_string(),
            },
        ));

        let err = dispatcher
            .dispatch(Some(&session()), &ORDERS, None, None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Transport(TransportError::Connection { .. })
        ));
    }
}
