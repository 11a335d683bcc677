//! Route parameter handling
//!
//! Parameters extracted from path segments (like `:id`) travel with the
//! route object handed to guards. They feed prop resolution (a `Params`
//! resolver forwards them as component props) and named-route substitution.

use std::collections::HashMap;

use serde_json::Value;

use crate::props::PropsObject;

/// Route parameters extracted from path segments
///
/// # Example
///
/// ```
/// use navguard::RouteParams;
///
/// // Route pattern: /users/:id
/// // Matched path: /users/123
/// let mut params = RouteParams::new();
/// params.insert("id".to_string(), "123".to_string());
///
/// assert_eq!(params.get("id"), Some(&"123".to_string()));
/// assert_eq!(params.get_as::<i32>("id"), Some(123));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: HashMap<String, String>,
}

impl RouteParams {
    /// Create new empty route params
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from hashmap
    pub fn from_map(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Get a parameter value as a string
    pub fn get(&self, key: &str) -> Option<&String> {
        self.params.get(key)
    }

    /// Get a parameter and parse it as a specific type
    ///
    /// Returns `None` if the parameter doesn't exist or cannot be parsed.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.params.get(key)?.parse().ok()
    }

    /// Insert a parameter
    pub fn insert(&mut self, key: String, value: String) {
        self.params.insert(key, value);
    }

    /// Check if parameter exists
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Get all parameters as a reference to the HashMap
    pub fn all(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Iterate over all parameters
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.params.iter()
    }

    /// Check if parameters are empty
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get number of parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Convert into a props object
    ///
    /// Every parameter becomes a string-valued entry. This is how a
    /// `PropResolver::Params` slot turns the matched parameters into
    /// component props.
    pub fn to_props(&self) -> PropsObject {
        self.params
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
