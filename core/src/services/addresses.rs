use super::{collection_path, item_path};
use crate::client::Api;
use crate::error::ApiError;
use crate::params::QueryParams;
use crate::response::ApiResponse;

body_params! {
    /// Parameters for adding a postal address to a client.
    CreateAddressParams
}

body_params! {
    /// Parameters for updating an existing client address.
    UpdateAddressParams
}

param_setters!([CreateAddressParams, UpdateAddressParams] {
    /// Label for the address, e.g. `Head office`.
    with_name("name": str),
    with_address_1("address_1": str),
    with_address_2("address_2": str),
    with_city("city": str),
    with_postcode("postcode": str),
    with_state("state": str),
    /// ISO 3166-1 alpha-2 code.
    with_country_code("country_code": str),
    with_default("default": bool),
    with_billing("billing": bool),
});

/// Service for managing client addresses.
#[derive(Debug, Clone, Copy)]
pub struct AddressService<'a> {
    api: &'a Api,
}

impl<'a> AddressService<'a> {
    pub fn new(api: &'a Api) -> Self {
        Self { api }
    }

    pub fn list_addresses(
        &self,
        client_id: &str,
        query: Option<QueryParams>,
    ) -> Result<ApiResponse, ApiError> {
        self.api.get(&collection_path(client_id, "addresses"), query)
    }

    pub fn get_address(
        &self,
        client_id: &str,
        address_id: &str,
        query: Option<QueryParams>,
    ) -> Result<ApiResponse, ApiError> {
        let path = item_path(client_id, "addresses", address_id);
        self.api.get(&path, query)
    }

    pub fn create_address(
        &self,
        client_id: &str,
        params: CreateAddressParams,
    ) -> Result<ApiResponse, ApiError> {
        self.api
            .post(&collection_path(client_id, "addresses"), Some(params.into()), None)
    }

    pub fn update_address(
        &self,
        client_id: &str,
        address_id: &str,
        params: UpdateAddressParams,
    ) -> Result<ApiResponse, ApiError> {
        let path = item_path(client_id, "addresses", address_id);
        self.api.put(&path, Some(params.into()), None)
    }

    pub fn delete_address(
        &self,
        client_id: &str,
        address_id: &str,
    ) -> Result<ApiResponse, ApiError> {
        let path = item_path(client_id, "addresses", address_id);
        self.api.delete(&path, None)
    }
}
