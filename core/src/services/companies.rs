use super::{collection_path, item_path};
use crate::client::Api;
use crate::error::ApiError;
use crate::params::QueryParams;
use crate::response::ApiResponse;

body_params! {
    /// Parameters for attaching a company to a client.
    CreateCompanyParams
}

body_params! {
    /// Parameters for updating a client's company.
    UpdateCompanyParams
}

param_setters!([CreateCompanyParams, UpdateCompanyParams] {
    with_name("name": str),
    /// Company registration number.
    with_reg_number("reg_number": str),
    /// VAT or other tax identifier.
    with_tax_number("tax_number": str),
    with_default("default": bool),
});

/// Service for managing client companies.
#[derive(Debug, Clone, Copy)]
pub struct CompanyService<'a> {
    api: &'a Api,
}

impl<'a> CompanyService<'a> {
    pub fn new(api: &'a Api) -> Self {
        Self { api }
    }

    pub fn list_companies(
        &self,
        client_id: &str,
        query: Option<QueryParams>,
    ) -> Result<ApiResponse, ApiError> {
        self.api.get(&collection_path(client_id, "companies"), query)
    }

    pub fn get_company(
        &self,
        client_id: &str,
        company_id: &str,
        query: Option<QueryParams>,
    ) -> Result<ApiResponse, ApiError> {
        let path = item_path(client_id, "companies", company_id);
        self.api.get(&path, query)
    }

    pub fn create_company(
        &self,
        client_id: &str,
        params: CreateCompanyParams,
    ) -> Result<ApiResponse, ApiError> {
        self.api
            .post(&collection_path(client_id, "companies"), Some(params.into()), None)
    }

    pub fn update_company(
        &self,
        client_id: &str,
        company_id: &str,
        params: UpdateCompanyParams,
    ) -> Result<ApiResponse, ApiError> {
        let path = item_path(client_id, "companies", company_id);
        self.api.put(&path, Some(params.into()), None)
    }

    pub fn delete_company(
        &self,
        client_id: &str,
        company_id: &str,
    ) -> Result<ApiResponse, ApiError> {
        let path = item_path(client_id, "companies", company_id);
        self.api.delete(&path, None)
    }
}
