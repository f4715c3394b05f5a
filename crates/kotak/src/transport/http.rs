//! reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use tracing::{instrument, trace};

use crate::error::TransportError;

use super::{HttpRequest, HttpResponse, Transport, Verb};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport over a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, TransportError> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                TransportError::Http {
                    message: format!("invalid header name '{}': {}", name, e),
                }
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| TransportError::Http {
                message: format!("invalid value for header '{}': {}", name, e),
            })?;
            map.append(name, value);
        }
        Ok(map)
    }
}

fn method(verb: Verb) -> Method {
    match verb {
        Verb::Get => Method::GET,
        Verb::Post => Method::POST,
        Verb::Put => Method::PUT,
        Verb::Delete => Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(verb = %request.verb, url = %request.url))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let headers = Self::header_map(&request.headers)?;

        let mut builder = self
            .client
            .request(method(request.verb), &request.url)
            .headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        trace!(status, bytes = body.len(), "HTTP response");

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_names_keep_api_spelling_case_insensitively() {
        let map = HttpTransport::header_map(&[
            ("consumerKey".to_string(), "ck".to_string()),
            ("sessionToken".to_string(), "st".to_string()),
        ])
        .unwrap();
        assert_eq!(map.get("consumerkey").unwrap(), "ck");
        assert_eq!(map.get("sessiontoken").unwrap(), "st");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn rejects_bad_header_value() {
        let err = HttpTransport::header_map(&[("userid".to_string(), "a\nb".to_string())])
            .unwrap_err();
        assert!(err.to_string().contains("userid"));
    }

    #[test]
    fn transport_creation() {
        assert!(HttpTransport::new(DEFAULT_TIMEOUT).is_ok());
    }
}
