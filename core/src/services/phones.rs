use super::{collection_path, item_path};
use crate::client::Api;
use crate::error::ApiError;
use crate::params::QueryParams;
use crate::response::ApiResponse;

body_params! {
    /// Parameters for adding a phone number to a client.
    CreatePhoneParams
}

body_params! {
    /// Parameters for updating an existing client phone number.
    UpdatePhoneParams
}

param_setters!([CreatePhoneParams, UpdatePhoneParams] {
    /// The subscriber number without the dialling code.
    with_phone("phone": str),
    /// International dialling code, e.g. `44`.
    with_phone_code("phone_code": str),
    with_country_code("country_code": str),
    with_default("default": bool),
});

/// Service for managing client phone numbers.
#[derive(Debug, Clone, Copy)]
pub struct PhoneService<'a> {
    api: &'a Api,
}

impl<'a> PhoneService<'a> {
    pub fn new(api: &'a Api) -> Self {
        Self { api }
    }

    pub fn list_phones(
        &self,
        client_id: &str,
        query: Option<QueryParams>,
    ) -> Result<ApiResponse, ApiError> {
        self.api.get(&collection_path(client_id, "phones"), query)
    }

    pub fn get_phone(
        &self,
        client_id: &str,
        phone_id: &str,
        query: Option<QueryParams>,
    ) -> Result<ApiResponse, ApiError> {
        let path = item_path(client_id, "phones", phone_id);
        self.api.get(&path, query)
    }

    pub fn create_phone(
        &self,
        client_id: &str,
        params: CreatePhoneParams,
    ) -> Result<ApiResponse, ApiError> {
        self.api
            .post(&collection_path(client_id, "phones"), Some(params.into()), None)
    }

    pub fn update_phone(
        &self,
        client_id: &str,
        phone_id: &str,
        params: UpdatePhoneParams,
    ) -> Result<ApiResponse, ApiError> {
        let path = item_path(client_id, "phones", phone_id);
        self.api.put(&path, Some(params.into()), None)
    }

    pub fn delete_phone(&self, client_id: &str, phone_id: &str) -> Result<ApiResponse, ApiError> {
        let path = item_path(client_id, "phones", phone_id);
        self.api.delete(&path, None)
    }
}
