//! Route shapes consumed by the guard engine
//!
//! The crate does not match or resolve routes itself. The host router hands
//! a resolved [`Route`] (with its matched record chain) to every guard; the
//! guard engine reads params, stamps a status into the shared meta, and
//! replaces per-slot prop resolvers on the shared records. Records and meta
//! are shared handles so those mutations stay visible to the host's
//! rendering pipeline after the guard returns.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::params::RouteParams;
use crate::props::PropResolver;

// ============================================================================
// ComponentRef
// ============================================================================

/// Opaque component identifier
///
/// A route record maps slot names to components. The guard engine only uses
/// the slot names; the ref itself is whatever the host's rendering layer
/// resolves into a view.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComponentRef(String);

impl ComponentRef {
    /// Create a component ref from an identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ComponentRef {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

// ============================================================================
// RouteMeta
// ============================================================================

#[derive(Debug, Default)]
struct MetaInner {
    status: Option<u16>,
    entries: HashMap<String, String>,
}

/// Shared mutable route metadata
///
/// Cloning produces another handle to the same storage, so a status stamped
/// through the guard engine's route handle is visible to the host that keeps
/// its own clone. The server environment uses [`RouteMeta::status`] to pick
/// the HTTP status of an otherwise successful render.
#[derive(Clone, Debug, Default)]
pub struct RouteMeta {
    inner: Arc<RwLock<MetaInner>>,
}

impl RouteMeta {
    /// Create empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// The stamped HTTP status, if any
    pub fn status(&self) -> Option<u16> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .status
    }

    /// Stamp an HTTP status
    pub fn set_status(&self, status: u16) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .status = Some(status);
    }

    /// Look up a string entry
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .get(key)
            .cloned()
    }

    /// Set a string entry
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .insert(key.into(), value.into());
    }
}

// ============================================================================
// RouteRecord
// ============================================================================

/// One entry in a route's matched chain
///
/// Represents one nested component along the matched path: a mapping from
/// slot names to components, and a per-slot prop resolver map that the guard
/// engine rewrites when a guard supplies prop overrides.
///
/// Records are shared (`Arc<RouteRecord>`) between the route handed to
/// guards and the host's rendering pipeline; the prop map sits behind a lock
/// so a resolver is always observable in a consistent, directly resolvable
/// state.
#[derive(Debug)]
pub struct RouteRecord {
    /// Path pattern this record was matched from
    pub path: String,
    /// Record name (optional)
    pub name: Option<String>,
    pub(crate) components: HashMap<String, ComponentRef>,
    pub(crate) props: RwLock<HashMap<String, PropResolver>>,
}

impl RouteRecord {
    /// Create a record for a path pattern
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
            components: HashMap::new(),
            props: RwLock::new(HashMap::new()),
        }
    }

    /// Set the record name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Register a component under a slot name
    pub fn component(mut self, slot: impl Into<String>, component: impl Into<ComponentRef>) -> Self {
        self.components.insert(slot.into(), component.into());
        self
    }

    /// Set the prop resolver for a slot
    pub fn props(self, slot: impl Into<String>, resolver: PropResolver) -> Self {
        self.props
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(slot.into(), resolver);
        self
    }

    /// Slot names this record renders into
    ///
    /// Records with no named components map fall back to the single
    /// implicit `"default"` slot.
    pub fn slot_keys(&self) -> Vec<String> {
        if self.components.is_empty() {
            vec!["default".to_string()]
        } else {
            self.components.keys().cloned().collect()
        }
    }

    /// Number of registered components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

// ============================================================================
// Route
// ============================================================================

/// A resolved navigation target or origin
///
/// Supplied by the host router. `Clone` is a cheap handle: the matched
/// records and the meta storage are shared, so the guard engine's clone and
/// the host's clone observe the same prop resolvers and status.
#[derive(Clone, Debug, Default)]
pub struct Route {
    /// The resolved path
    pub path: String,
    /// Path parameters extracted by the host's matcher
    pub params: RouteParams,
    /// Shared metadata (HTTP status stamp, host flags)
    pub meta: RouteMeta,
    /// Matched record chain, outermost first
    pub matched: Vec<Arc<RouteRecord>>,
}

impl Route {
    /// Create a route for a resolved path
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: RouteParams::new(),
            meta: RouteMeta::new(),
            matched: Vec::new(),
        }
    }

    /// Add a path parameter
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Replace the parameter set
    #[must_use]
    pub fn with_params(mut self, params: RouteParams) -> Self {
        self.params = params;
        self
    }

    /// Append a matched record
    #[must_use]
    pub fn with_record(mut self, record: RouteRecord) -> Self {
        self.matched.push(Arc::new(record));
        self
    }

    /// Append an already shared record
    #[must_use]
    pub fn with_shared_record(mut self, record: Arc<RouteRecord>) -> Self {
        self.matched.push(record);
        self
    }
}

// ============================================================================
// Redirect targets
// ============================================================================

/// Structured navigation location
///
/// The object form of a redirect target: either a route name to resolve
/// through a [`NamedRouteRegistry`], or a literal path, with parameters and
/// query entries to carry along.
///
/// # Example
///
/// ```
/// use navguard::RouteLocation;
///
/// let location = RouteLocation::named("user")
///     .with_param("id", "5")
///     .with_query("tab", "posts");
///
/// assert_eq!(location.name.as_deref(), Some("user"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteLocation {
    /// Target route name
    pub name: Option<String>,
    /// Target literal path
    pub path: Option<String>,
    /// Parameters substituted into the target pattern
    pub params: RouteParams,
    /// Query entries appended to the resolved href
    pub query: HashMap<String, String>,
}

impl RouteLocation {
    /// Location targeting a named route
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Location targeting a literal path
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Add a parameter
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add a query entry
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for RouteLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, &self.path) {
            (Some(name), _) => write!(f, "{{ name: {} }}", name),
            (None, Some(path)) => write!(f, "{{ path: {} }}", path),
            (None, None) => f.write_str("{ }"),
        }
    }
}

/// Where a redirect points
///
/// Guards may redirect with a plain path string or a structured location,
/// matching the two value shapes the proceed callback accepts natively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RedirectTarget {
    /// A literal path such as `/login`
    Path(String),
    /// A structured location, typically a named route
    Location(RouteLocation),
}

impl fmt::Display for RedirectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedirectTarget::Path(path) => f.write_str(path),
            RedirectTarget::Location(location) => fmt::Display::fmt(location, f),
        }
    }
}

impl From<&str> for RedirectTarget {
    fn from(path: &str) -> Self {
        RedirectTarget::Path(path.to_string())
    }
}

impl From<String> for RedirectTarget {
    fn from(path: String) -> Self {
        RedirectTarget::Path(path)
    }
}

impl From<RouteLocation> for RedirectTarget {
    fn from(location: RouteLocation) -> Self {
        RedirectTarget::Location(location)
    }
}

// ============================================================================
// NamedRouteRegistry
// ============================================================================

/// Registry for named routes
///
/// A hosting server translating a redirect signal needs an href for its
/// `Location` header. The registry resolves structured locations the way
/// the host router itself would: pattern lookup by name, parameter
/// substitution, query string.
#[derive(Clone, Debug, Default)]
pub struct NamedRouteRegistry {
    /// Map of route names to path patterns
    routes: HashMap<String, String>,
}

impl NamedRouteRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Register a named route
    pub fn register(&mut self, name: impl Into<String>, path: impl Into<String>) {
        self.routes.insert(name.into(), path.into());
    }

    /// Get path pattern for a named route
    pub fn get(&self, name: &str) -> Option<&str> {
        self.routes.get(name).map(|s| s.as_str())
    }

    /// Check if a route name exists
    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    /// Number of registered routes
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Generate URL for a named route with parameters
    ///
    /// # Example
    ///
    /// ```
    /// use navguard::{NamedRouteRegistry, RouteParams};
    ///
    /// let mut registry = NamedRouteRegistry::new();
    /// registry.register("user.detail", "/users/:id");
    ///
    /// let mut params = RouteParams::new();
    /// params.insert("id".to_string(), "123".to_string());
    ///
    /// let url = registry.url_for("user.detail", &params).unwrap();
    /// assert_eq!(url, "/users/123");
    /// ```
    pub fn url_for(&self, name: &str, params: &RouteParams) -> Option<String> {
        let pattern = self.get(name)?;
        Some(substitute_params(pattern, params))
    }

    /// Resolve a redirect target into an href
    ///
    /// Path targets pass through. Location targets resolve by name (with
    /// parameter substitution) or literal path, then carry their query
    /// string. Returns `None` for a named location the registry doesn't
    /// know.
    pub fn resolve(&self, target: &RedirectTarget) -> Option<String> {
        match target {
            RedirectTarget::Path(path) => Some(path.clone()),
            RedirectTarget::Location(location) => {
                let mut href = match (&location.name, &location.path) {
                    (Some(name), _) => self.url_for(name, &location.params)?,
                    (None, Some(path)) => substitute_params(path, &location.params),
                    (None, None) => return None,
                };

                if !location.query.is_empty() {
                    let mut pairs: Vec<String> = location
                        .query
                        .iter()
                        .map(|(key, value)| {
                            format!("{}={}", encode_query_component(key), encode_query_component(value))
                        })
                        .collect();
                    pairs.sort();
                    href.push('?');
                    href.push_str(&pairs.join("&"));
                }

                Some(href)
            }
        }
    }
}

/// Substitute route parameters in a path pattern
///
/// Replaces `:param` with actual values from RouteParams
fn substitute_params(pattern: &str, params: &RouteParams) -> String {
    let mut result = pattern.to_string();

    for (key, value) in params.iter() {
        let placeholder = format!(":{}", key);
        result = result.replace(&placeholder, value);
    }

    result
}

/// Minimal percent-encoding for query components
fn encode_query_component(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => c.to_string(),
            ' ' => "%20".to_string(),
            _ => format!("%{:02X}", c as u8),
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
