//! Synchronous client SDK for the Upmind customer-management API.
//!
//! # Overview
//! [`Api`] builds authenticated requests from [`QueryParams`] and
//! [`BodyParams`], sends them through an injected [`HttpTransport`], and wraps
//! the result in an [`ApiResponse`]. With restful exceptions enabled in the
//! [`Config`], non-2xx responses come back as a classified [`ApiError`].
//!
//! The domain services ([`ClientService`], [`AddressService`],
//! [`PhoneService`], [`EmailService`], [`CompanyService`]) are thin wrappers
//! that pick the resource path and verb.
//!
//! # Example
//!
//! ```rust,no_run
//! use upmind_sdk::{Api, Config, UpdateEmailParams};
//!
//! # fn main() -> Result<(), upmind_sdk::ApiError> {
//! let config = Config::new("api.upmind.io", "token")
//!     .with_brand_id("brand")
//!     .with_restful_exceptions(true);
//! let api = Api::builder(config).build()?;
//!
//! let params = UpdateEmailParams::new().with_email("new@example.com").with_verified(true);
//! let response = api.email_service().update_email("client-id", "email-id", params)?;
//! assert!(response.is_successful());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod params;
pub mod response;
pub mod services;
pub mod transport;
pub mod types;

pub use client::{Api, ApiBuilder};
pub use config::Config;
pub use error::{ApiError, ErrorKind};
pub use http::{
    BodyFactory, DefaultBodyFactory, DefaultRequestFactory, HttpMethod, HttpRequest, HttpResponse,
    HttpTransport, RequestFactory, TransportError,
};
pub use params::{BodyParams, Params, QueryParams};
pub use response::ApiResponse;
pub use services::{
    AddressService, ClientService, CompanyService, CreateAddressParams, CreateClientParams,
    CreateCompanyParams, CreateEmailParams, CreatePhoneParams, EmailService, PhoneService,
    UpdateAddressParams, UpdateClientParams, UpdateCompanyParams, UpdateEmailParams,
    UpdatePhoneParams,
};
pub use transport::LoggingTransport;
#[cfg(feature = "ureq-transport")]
pub use transport::UreqTransport;
pub use types::{Client, ClientAddress, ClientCompany, ClientEmail, ClientPhone};
