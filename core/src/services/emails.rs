use super::{collection_path, item_path};
use crate::client::Api;
use crate::error::ApiError;
use crate::params::QueryParams;
use crate::response::ApiResponse;

body_params! {
    /// Parameters for adding an email address to a client.
    CreateEmailParams
}

body_params! {
    /// Parameters for updating an existing client email address.
    UpdateEmailParams
}

param_setters!([CreateEmailParams, UpdateEmailParams] {
    with_email("email": str),
    /// Makes this the address notifications are sent to.
    with_default("default": bool),
    /// Sent as `0`/`1`.
    with_verified("verified": flag),
});

/// Service for managing client email addresses.
#[derive(Debug, Clone, Copy)]
pub struct EmailService<'a> {
    api: &'a Api,
}

impl<'a> EmailService<'a> {
    pub fn new(api: &'a Api) -> Self {
        Self { api }
    }

    pub fn list_emails(
        &self,
        client_id: &str,
        query: Option<QueryParams>,
    ) -> Result<ApiResponse, ApiError> {
        self.api.get(&collection_path(client_id, "emails"), query)
    }

    pub fn get_email(
        &self,
        client_id: &str,
        email_id: &str,
        query: Option<QueryParams>,
    ) -> Result<ApiResponse, ApiError> {
        let path = item_path(client_id, "emails", email_id);
        self.api.get(&path, query)
    }

    pub fn create_email(
        &self,
        client_id: &str,
        params: CreateEmailParams,
    ) -> Result<ApiResponse, ApiError> {
        self.api
            .post(&collection_path(client_id, "emails"), Some(params.into()), None)
    }

    pub fn update_email(
        &self,
        client_id: &str,
        email_id: &str,
        params: UpdateEmailParams,
    ) -> Result<ApiResponse, ApiError> {
        let path = item_path(client_id, "emails", email_id);
        self.api.put(&path, Some(params.into()), None)
    }

    pub fn delete_email(&self, client_id: &str, email_id: &str) -> Result<ApiResponse, ApiError> {
        let path = item_path(client_id, "emails", email_id);
        self.api.delete(&path, None)
    }
}
