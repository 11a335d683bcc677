//! The wrapped proceed callback
//!
//! The host router resolves a navigation by handing each guard a proceed
//! callback that must be invoked exactly once. [`Next`] wraps that callback
//! with the richer control surface guards actually want: chain
//! [`Next::status`] and [`Next::props`] to stage a pending HTTP status and
//! prop overrides, then finish with one terminal call - [`Next::resolve`],
//! [`Next::call`], [`Next::cancel`], or [`Next::redirect`].
//!
//! The terminal call applies pending prop overrides to the matched records
//! first, then forwards to the real proceed callback. In client mode the
//! value passes through untouched, preserving the arity of the call; in
//! server mode cancel/redirect values become a [`NavigationSignal`] and a
//! pending status is stamped onto the route's meta before the value branch.
//!
//! `Next` is a consuming builder: every terminal takes `self`, so the
//! router's single-invocation contract holds by construction.

use crate::props::PropsObject;
use crate::route::{RedirectTarget, Route};
use crate::signal::{NavigationSignal, DEFAULT_CANCEL_STATUS, DEFAULT_REDIRECT_STATUS};
use crate::{debug_log, trace_log, RenderMode};

/// The host router's proceed callback
///
/// `FnOnce`: the guard engine calls it at most once per guard invocation.
pub type ProceedFn = Box<dyn FnOnce(NextOutcome) + Send>;

/// A value passed to the wrapped callback's one-argument form
///
/// The typed rendition of the two proceed values that carry meaning:
/// `Cancel` blocks the navigation, `Redirect` sends it elsewhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NextValue {
    /// Block the navigation
    Cancel,
    /// Send the navigation to another target
    Redirect(RedirectTarget),
}

impl From<RedirectTarget> for NextValue {
    fn from(target: RedirectTarget) -> Self {
        NextValue::Redirect(target)
    }
}

impl From<&str> for NextValue {
    fn from(path: &str) -> Self {
        NextValue::Redirect(path.into())
    }
}

impl From<String> for NextValue {
    fn from(path: String) -> Self {
        NextValue::Redirect(path.into())
    }
}

impl From<crate::route::RouteLocation> for NextValue {
    fn from(location: crate::route::RouteLocation) -> Self {
        NextValue::Redirect(location.into())
    }
}

/// What the real proceed callback receives
///
/// `Continue` is the zero-argument call; the other variants carry one
/// argument. `Signal` only occurs in server mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NextOutcome {
    /// Continue unchanged (zero-argument call)
    Continue,
    /// Client-side cancel, handled natively by the host router
    Cancel,
    /// Client-side redirect, handled natively by the host router
    Redirect(RedirectTarget),
    /// Server-side structured outcome for the hosting process
    Signal(NavigationSignal),
}

impl NextOutcome {
    /// Check if the navigation continues unchanged
    pub fn is_continue(&self) -> bool {
        matches!(self, NextOutcome::Continue)
    }

    /// Check if this is a server-side signal
    pub fn is_signal(&self) -> bool {
        matches!(self, NextOutcome::Signal(_))
    }

    /// The carried signal, if any
    pub fn signal(&self) -> Option<&NavigationSignal> {
        match self {
            NextOutcome::Signal(signal) => Some(signal),
            _ => None,
        }
    }
}

/// The enhanced proceed callback handed to user guards
///
/// # Example
///
/// ```
/// use navguard::{Next, ProceedFn, RenderMode, Route};
///
/// let proceed: ProceedFn = Box::new(|outcome| {
///     assert!(outcome.is_signal());
/// });
///
/// let route = Route::new("/admin");
/// let next = Next::new(proceed, route, RenderMode::Server);
///
/// next.status(403).cancel(None);
/// ```
pub struct Next {
    proceed: ProceedFn,
    route: Route,
    mode: RenderMode,
    last_props: Option<PropsObject>,
    last_status: Option<u16>,
}

impl Next {
    /// Wrap a proceed callback for one guard invocation
    ///
    /// `route` is the navigation target; the handle shares its matched
    /// records and meta with the host, so prop and status effects land
    /// where the rendering pipeline reads them.
    pub fn new(proceed: ProceedFn, route: Route, mode: RenderMode) -> Self {
        Self {
            proceed,
            route,
            mode,
            last_props: None,
            last_status: None,
        }
    }

    /// Stage prop overrides for every matched record
    ///
    /// Applied on the terminal call. Staging again replaces the previous
    /// pending object (last write wins).
    #[must_use]
    pub fn props(mut self, overrides: PropsObject) -> Self {
        self.last_props = Some(overrides);
        self
    }

    /// Stage an HTTP status
    ///
    /// Server mode stamps it onto the route meta and uses it for any
    /// produced signal. Client mode ignores it. Last write wins.
    #[must_use]
    pub fn status(mut self, code: u16) -> Self {
        self.last_status = Some(code);
        self
    }

    /// Terminal: continue unchanged (the zero-argument call)
    pub fn resolve(self) {
        self.finish(None);
    }

    /// Terminal: invoke with a value (the one-argument call)
    pub fn call(self, value: impl Into<NextValue>) {
        self.finish(Some(value.into()));
    }

    /// Terminal: block the navigation
    ///
    /// A supplied status overrides any previously staged one; without it
    /// the signal falls back to a staged status, then to 500. Staged prop
    /// overrides are discarded - a cancelled navigation renders nothing.
    pub fn cancel(mut self, status: impl Into<Option<u16>>) {
        self.last_props = None;
        if let Some(status) = status.into() {
            self.last_status = Some(status);
        }
        self.finish(Some(NextValue::Cancel));
    }

    /// Terminal: send the navigation to another target
    ///
    /// A supplied status overrides any previously staged one; without it
    /// the signal falls back to a staged status, then to 302. Staged prop
    /// overrides are discarded.
    pub fn redirect(mut self, target: impl Into<RedirectTarget>, status: impl Into<Option<u16>>) {
        self.last_props = None;
        if let Some(status) = status.into() {
            self.last_status = Some(status);
        }
        self.finish(Some(NextValue::Redirect(target.into())));
    }

    fn finish(mut self, value: Option<NextValue>) {
        if let Some(overrides) = self.last_props.take() {
            trace_log!(
                "applying prop overrides to {} matched record(s) of {}",
                self.route.matched.len(),
                self.route.path
            );
            for record in &self.route.matched {
                record.apply_props_override(&overrides);
            }
        }

        let proceed = self.proceed;

        let outcome = match self.mode {
            RenderMode::Client => match value {
                None => NextOutcome::Continue,
                Some(NextValue::Cancel) => NextOutcome::Cancel,
                Some(NextValue::Redirect(target)) => NextOutcome::Redirect(target),
            },
            RenderMode::Server => {
                // Stamp before branching: even a pass-through navigation
                // carries a staged status to the renderer.
                if let Some(status) = self.last_status {
                    self.route.meta.set_status(status);
                }

                match value {
                    None => NextOutcome::Continue,
                    Some(NextValue::Cancel) => {
                        let signal = NavigationSignal::cancel(
                            self.last_status.unwrap_or(DEFAULT_CANCEL_STATUS),
                        );
                        debug_log!("navigation to {} cancelled: {}", self.route.path, signal);
                        NextOutcome::Signal(signal)
                    }
                    Some(NextValue::Redirect(target)) => {
                        let signal = NavigationSignal::redirect(
                            target,
                            self.last_status.unwrap_or(DEFAULT_REDIRECT_STATUS),
                        );
                        debug_log!("navigation to {} redirected: {}", self.route.path, signal);
                        NextOutcome::Signal(signal)
                    }
                }
            }
        };

        proceed(outcome);
    }
}

// ============================================================================
// Tests
// ============================================================================
