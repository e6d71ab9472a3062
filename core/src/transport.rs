//! Transport implementations.
//!
//! `UreqTransport` is the default blocking HTTP transport. `LoggingTransport`
//! wraps any transport and logs full requests and responses; the client
//! installs it when debug mode is on.

use tracing::{debug, warn};

use crate::http::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Logs every request and response passing through the inner transport.
pub struct LoggingTransport {
    inner: Box<dyn HttpTransport>,
}

impl LoggingTransport {
    pub fn new(inner: Box<dyn HttpTransport>) -> Self {
        Self { inner }
    }
}

impl HttpTransport for LoggingTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = request.method;
        let url = request.url.clone();
        debug!(
            %method,
            %url,
            headers = %format_headers(&request.headers),
            body = request.body_str().unwrap_or(""),
            "sending API request"
        );

        match self.inner.send(request) {
            Ok(response) => {
                debug!(
                    %method,
                    %url,
                    status = response.status,
                    headers = %format_headers(&response.headers),
                    body = %response.body,
                    "received API response"
                );
                Ok(response)
            }
            Err(err) => {
                warn!(%method, %url, error = %err, code = ?err.code(), "API request failed");
                Err(err)
            }
        }
    }
}

/// Renders headers one per line, masking the bearer token.
fn format_headers(headers: &[(String, String)]) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            if name.eq_ignore_ascii_case("authorization") {
                format!("{name}: Bearer ***")
            } else {
                format!("{name}: {value}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(feature = "ureq-transport")]
pub use self::ureq_transport::UreqTransport;

#[cfg(feature = "ureq-transport")]
mod ureq_transport {
    use std::time::Duration;

    use ureq::http::Response;
    use ureq::{Agent, Body, RequestBuilder};

    use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

    /// Blocking transport backed by a `ureq` agent.
    ///
    /// Status codes are never turned into errors here; 4xx and 5xx responses
    /// come back as ordinary `HttpResponse` values.
    #[derive(Debug, Clone)]
    pub struct UreqTransport {
        agent: Agent,
    }

    impl UreqTransport {
        pub fn new() -> Self {
            let agent = Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self { agent }
        }

        /// Transport whose requests fail after `timeout` in total.
        pub fn with_timeout(timeout: Duration) -> Self {
            let agent = Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(Some(timeout))
                .build()
                .new_agent();
            Self { agent }
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl HttpTransport for UreqTransport {
        fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let HttpRequest {
                method,
                url,
                headers,
                body,
            } = request;

            let result = match method {
                HttpMethod::Get => with_headers(self.agent.get(&url), &headers).call(),
                HttpMethod::Head => with_headers(self.agent.head(&url), &headers).call(),
                HttpMethod::Delete => with_headers(self.agent.delete(&url), &headers).call(),
                HttpMethod::Post => send_body(with_headers(self.agent.post(&url), &headers), body),
                HttpMethod::Put => send_body(with_headers(self.agent.put(&url), &headers), body),
                HttpMethod::Patch => {
                    send_body(with_headers(self.agent.patch(&url), &headers), body)
                }
            };

            let response = result.map_err(from_ureq)?;
            read_response(response)
        }
    }

    fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }

    fn send_body(
        builder: RequestBuilder<ureq::typestate::WithBody>,
        body: Option<Vec<u8>>,
    ) -> Result<Response<Body>, ureq::Error> {
        match body {
            Some(body) => builder.send(&body[..]),
            None => builder.send_empty(),
        }
    }

    fn read_response(mut response: Response<Body>) -> Result<HttpResponse, TransportError> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string().map_err(from_ureq)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    fn from_ureq(err: ureq::Error) -> TransportError {
        let transport = TransportError::new(err.to_string());
        match &err {
            ureq::Error::Io(io) => match io.raw_os_error() {
                Some(code) => transport.with_code(code),
                None => transport,
            },
            _ => transport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    struct Fixed(Result<HttpResponse, TransportError>);

    impl HttpTransport for Fixed {
        fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.0.clone()
        }
    }

    #[test]
    fn logging_transport_passes_response_through() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: "{}".to_string(),
        };
        let transport = LoggingTransport::new(Box::new(Fixed(Ok(response.clone()))));
        let request = HttpRequest::new(HttpMethod::Get, "https://example.test/");
        assert_eq!(transport.send(request).unwrap(), response);
    }

    #[test]
    fn logging_transport_passes_error_through() {
        let err = TransportError::new("refused").with_code(111);
        let transport = LoggingTransport::new(Box::new(Fixed(Err(err.clone()))));
        let request = HttpRequest::new(HttpMethod::Get, "https://example.test/");
        assert_eq!(transport.send(request).unwrap_err(), err);
    }

    #[test]
    fn headers_mask_bearer_token() {
        let rendered = format_headers(&[
            ("Authorization".to_string(), "Bearer secret".to_string()),
            ("User-Agent".to_string(), "sdk".to_string()),
        ]);
        assert_eq!(rendered, "Authorization: Bearer ***\nUser-Agent: sdk");
        assert!(!rendered.contains("secret"));
    }
}
