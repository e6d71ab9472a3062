//! The Upmind API client.
//!
//! # Design
//! `Api` owns the immutable [`Config`] and the three injected capabilities
//! (transport, request factory, body factory). Every verb helper funnels into
//! [`Api::send_request`], which fills the configured defaults, builds and
//! authenticates the request, dispatches it, and optionally turns non-2xx
//! responses into [`ApiError`]s. Nothing is cached or retried between calls.

use crate::config::Config;
use crate::error::ApiError;
use crate::http::{
    BodyFactory, DefaultBodyFactory, DefaultRequestFactory, HttpMethod, HttpTransport,
    RequestFactory,
};
use crate::params::{BodyParams, Params, QueryParams};
use crate::response::ApiResponse;
use crate::services::{AddressService, ClientService, CompanyService, EmailService, PhoneService};
use crate::transport::LoggingTransport;

/// Synchronous client for the Upmind API.
pub struct Api {
    config: Config,
    transport: Box<dyn HttpTransport>,
    request_factory: Box<dyn RequestFactory>,
    body_factory: Box<dyn BodyFactory>,
}

impl std::fmt::Debug for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api")
            .field("protocol", &self.config.protocol())
            .field("hostname", &self.config.hostname())
            .finish_non_exhaustive()
    }
}

impl Api {
    /// Creates a client that sends through `transport`, using the default
    /// request and body factories.
    pub fn new(config: Config, transport: impl HttpTransport + 'static) -> Self {
        Self::assemble(
            config,
            Box::new(transport),
            Box::new(DefaultRequestFactory),
            Box::new(DefaultBodyFactory),
            false,
        )
    }

    pub fn builder(config: Config) -> ApiBuilder {
        ApiBuilder::new(config)
    }

    fn assemble(
        config: Config,
        transport: Box<dyn HttpTransport>,
        request_factory: Box<dyn RequestFactory>,
        body_factory: Box<dyn BodyFactory>,
        logging: bool,
    ) -> Self {
        let transport: Box<dyn HttpTransport> = if logging || config.is_debug() {
            Box::new(LoggingTransport::new(transport))
        } else {
            transport
        };
        Self {
            config,
            transport,
            request_factory,
            body_factory,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Service for managing clients (customers).
    pub fn client_service(&self) -> ClientService<'_> {
        ClientService::new(self)
    }

    /// Service for managing client addresses.
    pub fn address_service(&self) -> AddressService<'_> {
        AddressService::new(self)
    }

    /// Service for managing client phone numbers.
    pub fn phone_service(&self) -> PhoneService<'_> {
        PhoneService::new(self)
    }

    /// Service for managing client email addresses.
    pub fn email_service(&self) -> EmailService<'_> {
        EmailService::new(self)
    }

    /// Service for managing client companies.
    pub fn company_service(&self) -> CompanyService<'_> {
        CompanyService::new(self)
    }

    pub fn get(&self, uri: &str, query: Option<QueryParams>) -> Result<ApiResponse, ApiError> {
        self.send_request(HttpMethod::Get, uri, None, query)
    }

    pub fn post(
        &self,
        uri: &str,
        body: Option<BodyParams>,
        query: Option<QueryParams>,
    ) -> Result<ApiResponse, ApiError> {
        self.send_request(HttpMethod::Post, uri, body, query)
    }

    pub fn put(
        &self,
        uri: &str,
        body: Option<BodyParams>,
        query: Option<QueryParams>,
    ) -> Result<ApiResponse, ApiError> {
        self.send_request(HttpMethod::Put, uri, body, query)
    }

    pub fn patch(
        &self,
        uri: &str,
        body: Option<BodyParams>,
        query: Option<QueryParams>,
    ) -> Result<ApiResponse, ApiError> {
        self.send_request(HttpMethod::Patch, uri, body, query)
    }

    pub fn delete(&self, uri: &str, query: Option<QueryParams>) -> Result<ApiResponse, ApiError> {
        self.send_request(HttpMethod::Delete, uri, None, query)
    }

    /// Sends one request to the API.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if a non-empty body is given for GET, HEAD or DELETE.
    /// - `Connection` if the transport fails.
    /// - `Auth`, `Validation`, `Client`, `Server` or `Http` for non-2xx
    ///   responses, only when restful exceptions are enabled in the config.
    pub fn send_request(
        &self,
        method: HttpMethod,
        uri: &str,
        body: Option<BodyParams>,
        query: Option<QueryParams>,
    ) -> Result<ApiResponse, ApiError> {
        let mut query = query.unwrap_or_default();
        let mut body = body.filter(|b| !b.is_empty());

        match body.as_mut() {
            Some(body) => self.fill_defaults(body),
            None => self.fill_defaults(&mut query),
        }

        let url = format!(
            "{}://{}/{}",
            self.config.protocol(),
            self.config.hostname(),
            query.append_to(uri.trim_start_matches('/'))
        );

        let mut request = self
            .request_factory
            .create_request(method, &url)
            .with_header("User-Agent", user_agent())
            .with_header("Authorization", format!("Bearer {}", self.config.token()));

        if let Some(body) = body {
            if method.forbids_body() {
                return Err(ApiError::InvalidArgument(
                    "Request body is not allowed for this method".to_string(),
                ));
            }
            let json = body.to_json()?;
            request = request
                .with_header("Content-Type", "application/json")
                .with_body(self.body_factory.create_body(&json));
        }

        let response = ApiResponse::new(self.transport.send(request)?);

        if self.config.restful_exceptions() && !response.is_successful() {
            return Err(ApiError::from_response(response));
        }

        Ok(response)
    }

    /// Defaults go into whichever container the server will read: the body
    /// when there is one, the query string otherwise.
    fn fill_defaults<P: Params>(&self, params: &mut P) {
        if let Some(brand_id) = self.config.brand_id() {
            params.fill_brand_id(brand_id);
        }
        params.fill_without_notifications(self.config.is_without_notifications());
    }
}

fn user_agent() -> String {
    format!(
        "Upmind-Sdk/{} Rust ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Builder for [`Api`] when the request or body factory needs replacing.
pub struct ApiBuilder {
    config: Config,
    transport: Option<Box<dyn HttpTransport>>,
    request_factory: Option<Box<dyn RequestFactory>>,
    body_factory: Option<Box<dyn BodyFactory>>,
    logging: bool,
}

impl ApiBuilder {
    fn new(config: Config) -> Self {
        Self {
            config,
            transport: None,
            request_factory: None,
            body_factory: None,
            logging: false,
        }
    }

    #[must_use]
    pub fn transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    #[must_use]
    pub fn request_factory(mut self, factory: impl RequestFactory + 'static) -> Self {
        self.request_factory = Some(Box::new(factory));
        self
    }

    #[must_use]
    pub fn body_factory(mut self, factory: impl BodyFactory + 'static) -> Self {
        self.body_factory = Some(Box::new(factory));
        self
    }

    /// Logs every request and response through `tracing`. Debug mode in the
    /// config turns this on regardless.
    #[must_use]
    pub fn logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }

    /// Builds the client. Without an explicit transport this falls back to
    /// [`crate::UreqTransport`] when the `ureq-transport` feature is on.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if no transport was given and no default is
    /// compiled in.
    pub fn build(self) -> Result<Api, ApiError> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => default_transport()?,
        };
        Ok(Api::assemble(
            self.config,
            transport,
            self.request_factory
                .unwrap_or_else(|| Box::new(DefaultRequestFactory)),
            self.body_factory.unwrap_or_else(|| Box::new(DefaultBodyFactory)),
            self.logging,
        ))
    }
}

#[cfg(feature = "ureq-transport")]
fn default_transport() -> Result<Box<dyn HttpTransport>, ApiError> {
    Ok(Box::new(crate::transport::UreqTransport::new()))
}

#[cfg(not(feature = "ureq-transport"))]
fn default_transport() -> Result<Box<dyn HttpTransport>, ApiError> {
    Err(ApiError::InvalidConfig(
        "no HTTP transport supplied and the ureq-transport feature is disabled".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;
    use crate::http::{HttpRequest, HttpResponse, TransportError};

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<HttpRequest>>,
        status: u16,
    }

    impl HttpTransport for Recorder {
        fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.sent.lock().unwrap().push(request);
            Ok(HttpResponse {
                status: self.status,
                headers: Vec::new(),
                body: r#"{"status":"ok","data":[]}"#.to_string(),
            })
        }
    }

    fn api(config: Config) -> (Api, Arc<Recorder>) {
        let recorder = Arc::new(Recorder {
            status: 200,
            ..Default::default()
        });
        (Api::new(config, recorder.clone()), recorder)
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn api_is_send_and_sync() {
        assert_send_sync::<Api>();
        assert_send_sync::<ApiBuilder>();
    }

    fn last(recorder: &Recorder) -> HttpRequest {
        recorder.sent.lock().unwrap().last().cloned().unwrap()
    }

    #[test]
    fn builds_url_from_protocol_host_and_path() {
        let (api, recorder) = api(Config::new("api.example.test", "t"));
        api.get("/api/clients", None).unwrap();
        assert_eq!(
            last(&recorder).url,
            "https://api.example.test/api/clients?without_notifications=0"
        );
    }

    #[test]
    fn attaches_auth_and_user_agent() {
        let (api, recorder) = api(Config::new("h", "tok"));
        api.get("x", None).unwrap();
        let req = last(&recorder);
        assert_eq!(req.header("Authorization"), Some("Bearer tok"));
        assert!(req.header("User-Agent").unwrap().starts_with("Upmind-Sdk/"));
        assert!(req.header("Content-Type").is_none());
        assert!(req.body.is_none());
    }

    #[test]
    fn defaults_go_into_body_when_present() {
        let (api, recorder) = api(Config::new("h", "t").with_brand_id("B1"));
        let mut body = BodyParams::new();
        body.set_param("amount", 5);
        api.post("x", Some(body), None).unwrap();

        let req = last(&recorder);
        assert_eq!(req.url, "https://h/x");
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        let sent: serde_json::Value = serde_json::from_str(req.body_str().unwrap()).unwrap();
        assert_eq!(
            sent,
            json!({"amount": 5, "brand_id": "B1", "without_notifications": false})
        );
    }

    #[test]
    fn empty_body_counts_as_no_body() {
        let (api, recorder) = api(Config::new("h", "t").with_brand_id("B1"));
        api.delete("x", None).unwrap();
        api.send_request(HttpMethod::Get, "y", Some(BodyParams::new()), None)
            .unwrap();
        let req = last(&recorder);
        assert_eq!(req.url, "https://h/y?brand_id=B1&without_notifications=0");
        assert!(req.body.is_none());
    }

    #[test]
    fn body_on_get_is_rejected_before_sending() {
        let (api, recorder) = api(Config::new("h", "t"));
        let mut body = BodyParams::new();
        body.set_param("a", 1);
        let err = api
            .send_request(HttpMethod::Get, "x", Some(body), None)
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
        assert!(recorder.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn builder_uses_supplied_transport() {
        let recorder = Arc::new(Recorder {
            status: 204,
            ..Default::default()
        });
        let api = Api::builder(Config::new("h", "t").with_debug(true))
            .transport(recorder.clone())
            .build()
            .unwrap();
        let response = api.get("x", None).unwrap();
        assert_eq!(response.status(), 204);
        assert_eq!(recorder.sent.lock().unwrap().len(), 1);
    }
}
