//! Domain services, one per resource type.
//!
//! Each service borrows the [`crate::Api`] and maps a business operation to a
//! single verb call on a resource path. Responses are returned unchanged.

/// Declares a typed body-parameter builder backed by [`crate::BodyParams`].
macro_rules! body_params {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name($crate::params::BodyParams);

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            /// Sets a field this type has no dedicated setter for.
            #[must_use]
            pub fn with_param(
                mut self,
                key: impl Into<String>,
                value: impl Into<serde_json::Value>,
            ) -> Self {
                $crate::params::Params::set_param(&mut self.0, key, value);
                self
            }

            pub fn params(&self) -> &$crate::params::BodyParams {
                &self.0
            }
        }

        impl From<$name> for $crate::params::BodyParams {
            fn from(params: $name) -> Self {
                params.0
            }
        }
    };
}

/// Generates consuming `with_*` setters on one or more body-parameter types.
///
/// Field kinds: `str` takes `impl Into<String>`, `bool` is sent as a JSON
/// boolean, `flag` is sent as `0`/`1`.
macro_rules! param_setters {
    ([$($name:ident),+ $(,)?] $fields:tt) => {
        $( param_setters!(@impl $name $fields); )+
    };
    (@impl $name:ident { $( $(#[$doc:meta])* $method:ident($key:literal: $kind:ident) ),* $(,)? }) => {
        impl $name {
            $( param_setters!(@setter $(#[$doc])* $method $key $kind); )*
        }
    };
    (@setter $(#[$doc:meta])* $method:ident $key:literal str) => {
        $(#[$doc])*
        #[must_use]
        pub fn $method(self, value: impl Into<String>) -> Self {
            self.with_param($key, value.into())
        }
    };
    (@setter $(#[$doc:meta])* $method:ident $key:literal bool) => {
        $(#[$doc])*
        #[must_use]
        pub fn $method(self, value: bool) -> Self {
            self.with_param($key, value)
        }
    };
    (@setter $(#[$doc:meta])* $method:ident $key:literal flag) => {
        $(#[$doc])*
        #[must_use]
        pub fn $method(self, value: bool) -> Self {
            self.with_param($key, u8::from(value))
        }
    };
}

mod addresses;
mod clients;
mod companies;
mod emails;
mod phones;

pub use addresses::{AddressService, CreateAddressParams, UpdateAddressParams};
pub use clients::{ClientService, CreateClientParams, UpdateClientParams};
pub use companies::{CompanyService, CreateCompanyParams, UpdateCompanyParams};
pub use emails::{CreateEmailParams, EmailService, UpdateEmailParams};
pub use phones::{CreatePhoneParams, PhoneService, UpdatePhoneParams};

use url::form_urlencoded;

/// Root path of the clients resource.
pub(crate) const CLIENTS_PATH: &str = "api/clients";

/// Percent-encodes an id so it stays a single path segment.
fn segment(id: &str) -> String {
    // byte_serialize writes spaces as `+` and a literal `+` as `%2B`.
    form_urlencoded::byte_serialize(id.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// `api/clients/{client_id}`.
pub(crate) fn client_path(client_id: &str) -> String {
    format!("{CLIENTS_PATH}/{}", segment(client_id))
}

/// A collection nested under one client, e.g. `api/clients/{id}/emails`.
pub(crate) fn collection_path(client_id: &str, resource: &str) -> String {
    format!("{}/{resource}", client_path(client_id))
}

/// One item of a nested collection.
pub(crate) fn item_path(client_id: &str, resource: &str, id: &str) -> String {
    format!("{}/{}", collection_path(client_id, resource), segment(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_encoded_as_single_segments() {
        assert_eq!(client_path("c1"), "api/clients/c1");
        assert_eq!(
            client_path("c1/emails?x=1"),
            "api/clients/c1%2Femails%3Fx%3D1"
        );
        assert_eq!(
            item_path("a b", "phones", "p+1#"),
            "api/clients/a%20b/phones/p%2B1%23"
        );
    }

    #[test]
    fn unreserved_characters_pass_through() {
        assert_eq!(segment("Ab-9_x.y"), "Ab-9_x.y");
    }
}
