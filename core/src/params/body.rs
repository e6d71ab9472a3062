use serde_json::{Map, Value};

use super::Params;
use crate::error::ApiError;

/// Parameters sent as a JSON request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyParams {
    params: Map<String, Value>,
}

impl BodyParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON-encodes the parameters, keeping insertion order.
    pub fn to_json(&self) -> Result<String, ApiError> {
        serde_json::to_string(&self.params).map_err(|e| ApiError::Serialization(e.to_string()))
    }
}

impl Params for BodyParams {
    fn map(&self) -> &Map<String, Value> {
        &self.params
    }

    fn map_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.params
    }
}

impl From<Map<String, Value>> for BodyParams {
    fn from(params: Map<String, Value>) -> Self {
        Self { params }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn to_json_keeps_insertion_order() {
        let mut params = BodyParams::new();
        params
            .set_param("zeta", 1)
            .set_param("alpha", "a")
            .set_param("tags", json!(["x", "y"]));
        assert_eq!(
            params.to_json().unwrap(),
            r#"{"zeta":1,"alpha":"a","tags":["x","y"]}"#
        );
    }

    #[test]
    fn empty_body_encodes_as_empty_object() {
        let params = BodyParams::new();
        assert!(params.is_empty());
        assert_eq!(params.to_json().unwrap(), "{}");
    }
}
