use super::{client_path, CLIENTS_PATH};
use crate::client::Api;
use crate::error::ApiError;
use crate::params::QueryParams;
use crate::response::ApiResponse;

body_params! {
    /// Parameters for creating a client (customer).
    CreateClientParams
}

body_params! {
    /// Parameters for updating an existing client.
    UpdateClientParams
}

param_setters!([CreateClientParams, UpdateClientParams] {
    with_firstname("firstname": str),
    with_lastname("lastname": str),
    with_email("email": str),
    with_password("password": str),
    with_phone("phone": str),
    /// ISO 4217 code, e.g. `USD`.
    with_currency_code("currency_code": str),
    with_language_code("language_code": str),
});

param_setters!([CreateClientParams] {
    with_send_welcome_email("send_welcome_email": bool),
});

/// Service for managing clients (customers).
#[derive(Debug, Clone, Copy)]
pub struct ClientService<'a> {
    api: &'a Api,
}

impl<'a> ClientService<'a> {
    pub fn new(api: &'a Api) -> Self {
        Self { api }
    }

    pub fn list_clients(&self, query: Option<QueryParams>) -> Result<ApiResponse, ApiError> {
        self.api.get(CLIENTS_PATH, query)
    }

    pub fn get_client(
        &self,
        client_id: &str,
        query: Option<QueryParams>,
    ) -> Result<ApiResponse, ApiError> {
        self.api.get(&client_path(client_id), query)
    }

    pub fn create_client(&self, params: CreateClientParams) -> Result<ApiResponse, ApiError> {
        self.api.post(CLIENTS_PATH, Some(params.into()), None)
    }

    pub fn update_client(
        &self,
        client_id: &str,
        params: UpdateClientParams,
    ) -> Result<ApiResponse, ApiError> {
        self.api.put(&client_path(client_id), Some(params.into()), None)
    }

    pub fn delete_client(&self, client_id: &str) -> Result<ApiResponse, ApiError> {
        self.api.delete(&client_path(client_id), None)
    }
}
