//! # navguard
//!
//! SSR-aware navigation guards for client/server-rendered applications:
//!
//! - **Guard adaptation** - Write one guard, register it for enter and
//!   update lifecycles in the host router
//! - **Chainable control surface** - Stage an HTTP status and prop
//!   overrides, then cancel, redirect, or continue with one terminal call
//! - **Server signals** - Cancel/redirect become a structured, inspectable
//!   [`NavigationSignal`] the hosting server translates into an HTTP
//!   response, since a server render has no browser history to drive
//! - **Prop overrides** - Extra props merged into every matched record's
//!   per-slot resolver, consumed by exactly one resolution and restored
//!
//! # Quick Start
//!
//! ```
//! use navguard::{wrap_guard, NextOutcome, ProceedFn, RenderMode, Route};
//!
//! let guard = wrap_guard(RenderMode::Server, |to: &Route, _from: &Route, next| {
//!     if to.path.starts_with("/admin") {
//!         next.redirect("/login", None);
//!     } else {
//!         next.resolve();
//!     }
//! });
//!
//! let to = Route::new("/admin/users");
//! let from = Route::new("/");
//! let proceed: ProceedFn = Box::new(|outcome| {
//!     let signal = outcome.signal().expect("admin navigation redirects");
//!     assert_eq!(signal.status, 302);
//! });
//!
//! guard(&to, &from, proceed);
//! ```
//!
//! # Client vs Server
//!
//! The same guard runs in both environments; only the [`RenderMode`] handed
//! to the adapter differs. Client mode forwards terminal values to the
//! proceed callback untouched (the host router performs real navigation
//! natively); server mode turns cancel/redirect into a
//! [`NavigationSignal`] and stamps a staged status onto the route's shared
//! meta for the renderer to pick up.
//!
//! # Feature Flags
//!
//! - `log` (default) - Uses the standard `log` crate for logging
//! - `tracing` - Uses the `tracing` crate for structured logging (mutually
//!   exclusive with `log`)

#![doc(html_root_url = "https://docs.rs/navguard/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
// Lints are configured in Cargo.toml [lints] section

// Logging abstraction
pub mod logging;

// Core modules
pub mod guard;
pub mod next;
pub mod params;
pub mod props;
pub mod route;
pub mod signal;

// Re-export main types for convenient access
pub use guard::{before_route, wrap_guard, HostGuard, RouteGuards};
pub use next::{Next, NextOutcome, NextValue, ProceedFn};
pub use params::RouteParams;
pub use props::{merge_props, PropResolver, PropsFn, PropsObject};
pub use route::{
    ComponentRef, NamedRouteRegistry, RedirectTarget, Route, RouteLocation, RouteMeta, RouteRecord,
};
pub use signal::{
    NavigationSignal, SignalKind, DEFAULT_CANCEL_STATUS, DEFAULT_REDIRECT_STATUS, SIGNAL_NAME,
};

/// Crate version, substituted at packaging time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable consulted by [`RenderMode::from_env`]
pub const RENDER_MODE_ENV: &str = "NAVGUARD_ENV";

/// Execution environment the guard engine adapts to
///
/// Passed explicitly into the adapter entry points rather than read from
/// process-global state, so one process can serve both modes (e.g. a server
/// that also pre-renders for hydration tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Browser environment; the host router performs real navigation
    Client,
    /// Server-side rendering; outcomes surface as navigation signals
    Server,
}

impl RenderMode {
    /// Read the mode from the `NAVGUARD_ENV` environment variable
    ///
    /// `"server"` (case-insensitive) selects [`RenderMode::Server`]; any
    /// other value, or an unset variable, selects [`RenderMode::Client`].
    pub fn from_env() -> Self {
        match std::env::var(RENDER_MODE_ENV) {
            Ok(value) if value.eq_ignore_ascii_case("server") => RenderMode::Server,
            _ => RenderMode::Client,
        }
    }

    /// Check if this is the server environment
    pub fn is_server(self) -> bool {
        self == RenderMode::Server
    }

    /// Check if this is the client environment
    pub fn is_client(self) -> bool {
        self == RenderMode::Client
    }
}
