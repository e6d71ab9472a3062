//! Query-string and body parameter containers.
//!
//! Both containers keep their entries in insertion order; setting a key that
//! already exists overwrites the value in place. The client injects the
//! configured defaults through [`Params::fill_brand_id`] and
//! [`Params::fill_without_notifications`], which never replace a value the
//! caller set.

mod body;
mod query;

pub use body::BodyParams;
pub use query::QueryParams;

use serde_json::{Map, Value};

/// Key of the brand id default.
pub const BRAND_ID: &str = "brand_id";

/// Key of the notification-suppression default.
pub const WITHOUT_NOTIFICATIONS: &str = "without_notifications";

/// Operations shared by every parameter container.
pub trait Params {
    fn map(&self) -> &Map<String, Value>;

    fn map_mut(&mut self) -> &mut Map<String, Value>;

    /// Sets `key`, overwriting any previous value.
    fn set_param(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self
    where
        Self: Sized,
    {
        self.map_mut().insert(key.into(), value.into());
        self
    }

    fn get_param(&self, key: &str) -> Option<&Value> {
        self.map().get(key)
    }

    /// A key holding `null` counts as unset.
    fn has_param(&self, key: &str) -> bool {
        self.map().get(key).is_some_and(|v| !v.is_null())
    }

    fn is_empty(&self) -> bool {
        self.map().is_empty()
    }

    /// The current entries, in insertion order.
    fn to_map(&self) -> Map<String, Value> {
        self.map().clone()
    }

    fn set_brand_id(&mut self, brand_id: impl Into<String>) -> &mut Self
    where
        Self: Sized,
    {
        self.set_param(BRAND_ID, brand_id.into())
    }

    fn set_without_notifications(&mut self, without_notifications: bool) -> &mut Self
    where
        Self: Sized,
    {
        self.set_param(WITHOUT_NOTIFICATIONS, without_notifications)
    }

    /// Sets `brand_id` unless it is already set or `brand_id` is empty.
    fn fill_brand_id(&mut self, brand_id: &str) -> &mut Self
    where
        Self: Sized,
    {
        if !brand_id.is_empty() && !self.has_param(BRAND_ID) {
            self.set_brand_id(brand_id);
        }
        self
    }

    /// Sets `without_notifications` unless it is already set.
    fn fill_without_notifications(&mut self, without_notifications: bool) -> &mut Self
    where
        Self: Sized,
    {
        if !self.has_param(WITHOUT_NOTIFICATIONS) {
            self.set_without_notifications(without_notifications);
        }
        self
    }
}
