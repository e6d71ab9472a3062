//! Resource DTOs read from the `data` member of API responses.
//!
//! # Design
//! Only the commonly used fields are typed; everything else the API returns
//! is kept in `extra` so nothing is lost when a caller re-serializes a value.
//! Read them with [`crate::ApiResponse::data_as`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A client (customer) account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: String,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub brand_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A postal address belonging to a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientAddress {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address_1: Option<String>,
    #[serde(default)]
    pub address_2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub default: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A phone number belonging to a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientPhone {
    pub id: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub phone_code: Option<String>,
    #[serde(default)]
    pub default: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An email address belonging to a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientEmail {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub default: bool,
    /// The API reports this as `0`/`1` or a boolean depending on endpoint.
    #[serde(default, deserialize_with = "flag")]
    pub verified: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A company attached to a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientCompany {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub reg_number: Option<String>,
    #[serde(default)]
    pub tax_number: Option<String>,
    #[serde(default)]
    pub default: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_i64().is_some_and(|n| n != 0)),
        Value::String(s) => Ok(s == "1" || s.eq_ignore_ascii_case("true")),
        _ => Ok(false),
    }
}
