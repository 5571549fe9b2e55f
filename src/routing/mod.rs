//! Routing metadata consumed by dispatch
//!
//! Route matching itself belongs to the host router. These types only carry what
//! matching produced: the matched values, per-request data tokens, and the static
//! route definition that matched.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Token under which the area name is looked up by default
pub const AREA_TOKEN: &str = "area";

/// String-keyed bag of route data tokens.
///
/// Values are arbitrary JSON; only string values are meaningful as area names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataTokens(HashMap<String, Value>);

impl DataTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

/// A route that declares its area explicitly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaRoute {
    pub pattern: String,
    pub area: String,
}

impl AreaRoute {
    pub fn new(pattern: impl Into<String>, area: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            area: area.into(),
        }
    }
}

/// A generic route, optionally carrying data tokens
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_tokens: Option<DataTokens>,
}

impl Route {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            data_tokens: None,
        }
    }

    pub fn with_tokens(mut self, data_tokens: DataTokens) -> Self {
        self.data_tokens = Some(data_tokens);
        self
    }
}

/// The static route definition that matched a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteBase {
    Area(AreaRoute),
    Route(Route),
}

impl RouteBase {
    pub fn pattern(&self) -> &str {
        match self {
            RouteBase::Area(route) => &route.pattern,
            RouteBase::Route(route) => &route.pattern,
        }
    }

    /// Area declared by this route.
    ///
    /// An [`AreaRoute`] answers with its own area; a [`Route`] answers with its
    /// `token` data token when that token holds a string.
    pub fn area_name(&self, token: &str) -> Option<&str> {
        match self {
            RouteBase::Area(route) => Some(&route.area),
            RouteBase::Route(route) => route.data_tokens.as_ref()?.get(token)?.as_str(),
        }
    }
}

impl From<AreaRoute> for RouteBase {
    fn from(route: AreaRoute) -> Self {
        Self::Area(route)
    }
}

impl From<Route> for RouteBase {
    fn from(route: Route) -> Self {
        Self::Route(route)
    }
}

/// Everything routing produced for one request
#[derive(Debug, Clone, Default)]
pub struct RouteData {
    pub values: HashMap<String, String>,
    pub data_tokens: DataTokens,
    pub route: Option<Arc<RouteBase>>,
}

impl RouteData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn with_tokens(mut self, data_tokens: DataTokens) -> Self {
        self.data_tokens = data_tokens;
        self
    }

    pub fn with_route(mut self, route: impl Into<RouteBase>) -> Self {
        self.route = Some(Arc::new(route.into()));
        self
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Area name using the default [`AREA_TOKEN`]
    pub fn area_name(&self) -> Option<&str> {
        self.area_name_by(AREA_TOKEN)
    }

    /// Area name for this request.
    ///
    /// Per-request data tokens win over the matched route. A token that is present
    /// but not a string yields `None` without consulting the route.
    pub fn area_name_by(&self, token: &str) -> Option<&str> {
        if let Some(area) = self.data_tokens.get(token) {
            return area.as_str();
        }
        self.route.as_deref()?.area_name(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_area_route_declares_area() {
        let route = RouteBase::from(AreaRoute::new("admin/{controller}", "Admin"));
        assert_eq!(route.area_name(AREA_TOKEN), Some("Admin"));
    }

    #[test]
    fn test_generic_route_reads_string_token() {
        let route = RouteBase::from(
            Route::new("{controller}").with_tokens(DataTokens::new().with("area", "Blog")),
        );
        assert_eq!(route.area_name(AREA_TOKEN), Some("Blog"));
    }

    #[test]
    fn test_generic_route_without_tokens() {
        let route = RouteBase::from(Route::new("{controller}"));
        assert_eq!(route.area_name(AREA_TOKEN), None);
    }

    #[test]
    fn test_non_string_token_is_absent() {
        let route =
            RouteBase::from(Route::new("{controller}").with_tokens(DataTokens::new().with("area", 5)));
        assert_eq!(route.area_name(AREA_TOKEN), None);
    }

    #[test]
    fn test_request_tokens_take_precedence() {
        let route_data = RouteData::new()
            .with_tokens(DataTokens::new().with("area", "Users"))
            .with_route(AreaRoute::new("other/{controller}", "Other"));
        assert_eq!(route_data.area_name(), Some("Users"));
    }

    #[test]
    fn test_falls_back_to_route() {
        let route_data = RouteData::new().with_route(AreaRoute::new("other/{controller}", "Other"));
        assert_eq!(route_data.area_name(), Some("Other"));
    }

    #[test]
    fn test_non_string_request_token_does_not_fall_back() {
        let route_data = RouteData::new()
            .with_tokens(DataTokens::new().with("area", json!(null)))
            .with_route(AreaRoute::new("other/{controller}", "Other"));
        assert_eq!(route_data.area_name(), None);
    }

    #[test]
    fn test_no_route_no_tokens() {
        assert_eq!(RouteData::new().area_name(), None);
    }

    #[test]
    fn test_custom_token_name() {
        let route_data = RouteData::new().with_tokens(DataTokens::new().with("module", "Shop"));
        assert_eq!(route_data.area_name_by("module"), Some("Shop"));
        assert_eq!(route_data.area_name(), None);
    }

    #[test]
    fn test_route_definitions_from_json() {
        let route: RouteBase = serde_json::from_value(json!({
            "kind": "route",
            "pattern": "{controller}",
            "data_tokens": { "area": "Blog" }
        }))
        .unwrap();
        assert_eq!(route.area_name(AREA_TOKEN), Some("Blog"));
        assert_eq!(route.pattern(), "{controller}");
    }
}
