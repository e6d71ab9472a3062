use serde_json::{Map, Value};
use url::form_urlencoded;

use super::Params;

/// Parameters sent in the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    params: Map<String, Value>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relations to eager-load, joined with commas (`with=a,b`).
    pub fn set_with<I, S>(&mut self, relations: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = relations
            .into_iter()
            .map(|r| r.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.set_param("with", joined)
    }

    pub fn set_limit(&mut self, limit: u32) -> &mut Self {
        self.set_param("limit", limit)
    }

    pub fn set_offset(&mut self, offset: u32) -> &mut Self {
        self.set_param("offset", offset)
    }

    /// Sort order, e.g. `created_at` or `-created_at` for descending.
    pub fn set_order_by(&mut self, order: impl Into<String>) -> &mut Self {
        self.set_param("order", order.into())
    }

    /// Adds `filter[field]=value`.
    pub fn set_filter(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        let filters = self
            .params
            .entry("filter")
            .or_insert_with(|| Value::Object(Map::new()));
        if !filters.is_object() {
            *filters = Value::Object(Map::new());
        }
        if let Value::Object(filters) = filters {
            filters.insert(field.to_string(), value.into());
        }
        self
    }

    /// Form-encodes the parameters. Booleans become `1`/`0`, nulls are
    /// skipped, and nested values are flattened to `key[sub]=value`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            append_pair(&mut serializer, key, value);
        }
        serializer.finish()
    }

    /// Appends the query string to `uri`, using `&` when `uri` already has a
    /// query component.
    pub fn append_to(&self, uri: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            return uri.to_string();
        }
        let join = if uri.contains('?') { '&' } else { '?' };
        format!("{uri}{join}{query}")
    }
}

impl Params for QueryParams {
    fn map(&self) -> &Map<String, Value> {
        &self.params
    }

    fn map_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.params
    }
}

impl From<Map<String, Value>> for QueryParams {
    fn from(params: Map<String, Value>) -> Self {
        Self { params }
    }
}

fn append_pair(serializer: &mut form_urlencoded::Serializer<'_, String>, key: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => {
            serializer.append_pair(key, if *b { "1" } else { "0" });
        }
        Value::Number(n) => {
            serializer.append_pair(key, &n.to_string());
        }
        Value::String(s) => {
            serializer.append_pair(key, s);
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                append_pair(serializer, &format!("{key}[{index}]"), item);
            }
        }
        Value::Object(entries) => {
            for (sub, item) in entries {
                append_pair(serializer, &format!("{key}[{sub}]"), item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_params_can_be_overwritten() {
        let mut initial = Map::new();
        initial.insert("with".to_string(), json!("something"));

        let mut params = QueryParams::from(initial);
        params.set_param("with", "something-else");

        assert_eq!(Value::Object(params.to_map()), json!({"with": "something-else"}));
    }

    #[test]
    fn appends_with_question_mark() {
        let mut params = QueryParams::new();
        params.set_param("page", 2);
        assert_eq!(params.append_to("clients"), "clients?page=2");
    }

    #[test]
    fn appends_with_ampersand_when_query_present() {
        let mut params = QueryParams::new();
        params.set_param("page", 2);
        assert_eq!(params.append_to("clients?x=1"), "clients?x=1&page=2");
    }

    #[test]
    fn empty_params_leave_uri_untouched() {
        assert_eq!(QueryParams::new().append_to("clients"), "clients");

        let mut only_null = QueryParams::new();
        only_null.set_param("skip", Value::Null);
        assert_eq!(only_null.append_to("clients"), "clients");
    }

    #[test]
    fn encodes_scalars_like_a_form() {
        let mut params = QueryParams::new();
        params
            .set_param("q", "john smith")
            .set_param("active", true)
            .set_param("archived", false)
            .set_param("ratio", 1.5);
        assert_eq!(
            params.to_query_string(),
            "q=john+smith&active=1&archived=0&ratio=1.5"
        );
    }

    #[test]
    fn flattens_arrays_and_objects() {
        let mut params = QueryParams::new();
        params.set_param("ids", json!(["a", "b"]));
        params.set_filter("email", "x@example.test");
        assert_eq!(
            params.to_query_string(),
            "ids%5B0%5D=a&ids%5B1%5D=b&filter%5Bemail%5D=x%40example.test"
        );
    }

    #[test]
    fn list_helpers_set_expected_keys() {
        let mut params = QueryParams::new();
        params
            .set_with(["emails", "phones"])
            .set_limit(10)
            .set_offset(20)
            .set_order_by("-created_at");
        assert_eq!(
            params.to_query_string(),
            "with=emails%2Cphones&limit=10&offset=20&order=-created_at"
        );
    }
}
