//! Client configuration.
//!
//! Values are checked only by type. The hostname and token are passed through
//! to the wire as given.

use serde::Deserialize;

/// Default protocol for API requests.
pub const DEFAULT_PROTOCOL: &str = "https";

/// Default API hostname.
pub const DEFAULT_HOSTNAME: &str = "api.upmind.io";

/// Immutable SDK configuration, owned by [`crate::Api`] once the client is
/// built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default = "default_protocol")]
    protocol: String,
    #[serde(default = "default_hostname")]
    hostname: String,
    token: String,
    #[serde(default)]
    brand_id: Option<String>,
    #[serde(default)]
    without_notifications: bool,
    #[serde(default)]
    debug: bool,
    #[serde(default)]
    restful_exceptions: bool,
}

fn default_protocol() -> String {
    DEFAULT_PROTOCOL.to_string()
}

fn default_hostname() -> String {
    DEFAULT_HOSTNAME.to_string()
}

impl Config {
    /// Creates a configuration for the given hostname and bearer token.
    #[must_use]
    pub fn new(hostname: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            protocol: default_protocol(),
            hostname: hostname.into(),
            token: token.into(),
            brand_id: None,
            without_notifications: false,
            debug: false,
            restful_exceptions: false,
        }
    }

    /// Sets the protocol (`http` or `https`).
    #[must_use]
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Sets the brand id injected into every request.
    #[must_use]
    pub fn with_brand_id(mut self, brand_id: impl Into<String>) -> Self {
        self.brand_id = Some(brand_id.into());
        self
    }

    /// Asks the API to suppress notifications for every request.
    #[must_use]
    pub fn with_without_notifications(mut self, without_notifications: bool) -> Self {
        self.without_notifications = without_notifications;
        self
    }

    /// Enables debug logging of full requests and responses.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Turns non-2xx responses into [`crate::ApiError`] values.
    #[must_use]
    pub fn with_restful_exceptions(mut self, restful_exceptions: bool) -> Self {
        self.restful_exceptions = restful_exceptions;
        self
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn brand_id(&self) -> Option<&str> {
        self.brand_id.as_deref()
    }

    pub fn is_without_notifications(&self) -> bool {
        self.without_notifications
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn restful_exceptions(&self) -> bool {
        self.restful_exceptions
    }
}
