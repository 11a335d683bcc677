//! Guard adaptation entry points
//!
//! A user guard is written once against the enhanced [`Next`] surface and
//! adapted here into the `(to, from, proceed)` shape the host router
//! registers. The adapter builds a fresh [`Next`] per invocation, so every
//! guard run owns its own pending state.

use std::sync::Arc;

use crate::next::{Next, ProceedFn};
use crate::route::Route;
use crate::RenderMode;

/// An adapted guard in the host router's registration shape
pub type HostGuard = Box<dyn Fn(&Route, &Route, ProceedFn) + Send + Sync>;

/// Adapt a user guard to the host router's signature
///
/// The returned guard calls `callback` with the same `to`/`from` routes and
/// a [`Next`] wrapping the proceed callback; the callback's return value
/// passes through unchanged.
///
/// # Example
///
/// ```
/// use navguard::{wrap_guard, ProceedFn, RenderMode, Route};
///
/// let guard = wrap_guard(RenderMode::Server, |to: &Route, _from: &Route, next| {
///     if to.meta.get("requires_auth").is_some() {
///         next.redirect("/login", None);
///     } else {
///         next.resolve();
///     }
/// });
///
/// let to = Route::new("/");
/// let from = Route::new("/");
/// let proceed: ProceedFn = Box::new(|outcome| assert!(outcome.is_continue()));
/// guard(&to, &from, proceed);
/// ```
pub fn wrap_guard<C, R>(mode: RenderMode, callback: C) -> impl Fn(&Route, &Route, ProceedFn) -> R
where
    C: Fn(&Route, &Route, Next) -> R,
{
    move |to, from, proceed| callback(to, from, Next::new(proceed, to.clone(), mode))
}

/// The enter/update guard pair produced by [`before_route`]
///
/// Two distinct function identities over one shared callback: the host
/// router registers enter and update lifecycle guards separately and must
/// not treat them as the same registration.
pub struct RouteGuards {
    /// Guard for entering the route
    pub before_enter: HostGuard,
    /// Guard for in-place updates of the route (e.g. a param change)
    pub before_update: HostGuard,
}

/// Adapt one user guard into an enter/update pair
///
/// # Example
///
/// ```
/// use navguard::{before_route, RenderMode, Route};
///
/// let guards = before_route(RenderMode::Client, |_to: &Route, _from: &Route, next| {
///     next.resolve();
/// });
///
/// let to = Route::new("/");
/// let from = Route::new("/");
/// (guards.before_enter)(&to, &from, Box::new(|_| {}));
/// (guards.before_update)(&to, &from, Box::new(|_| {}));
/// ```
pub fn before_route<C>(mode: RenderMode, callback: C) -> RouteGuards
where
    C: Fn(&Route, &Route, Next) + Send + Sync + 'static,
{
    let callback = Arc::new(callback);

    RouteGuards {
        before_enter: adapted(mode, Arc::clone(&callback)),
        before_update: adapted(mode, callback),
    }
}

fn adapted<C>(mode: RenderMode, callback: Arc<C>) -> HostGuard
where
    C: Fn(&Route, &Route, Next) + Send + Sync + 'static,
{
    Box::new(move |to, from, proceed| callback(to, from, Next::new(proceed, to.clone(), mode)))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::next::NextOutcome;
    use crate::signal::NavigationSignal;
    use std::sync::{Arc, Mutex};

    fn capture() -> (ProceedFn, Arc<Mutex<Vec<NextOutcome>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let proceed: ProceedFn = Box::new(move |outcome| {
            sink.lock().unwrap().push(outcome);
        });
        (proceed, seen)
    }

    #[test]
    fn test_wrap_guard_passes_routes_and_return_value() {
        let to = Route::new("/users/5").with_param("id", "5");
        let from = Route::new("/");
        let (proceed, seen) = capture();

        let guard = wrap_guard(RenderMode::Client, |to: &Route, from: &Route, next| {
            assert_eq!(to.path, "/users/5");
            assert_eq!(from.path, "/");
            next.resolve();
            "handled"
        });

        assert_eq!(guard(&to, &from, proceed), "handled");
        assert_eq!(seen.lock().unwrap().as_slice(), &[NextOutcome::Continue]);
    }

    #[test]
    fn test_guard_without_terminal_never_proceeds() {
        let to = Route::new("/");
        let from = Route::new("/");
        let (proceed, seen) = capture();

        let guard = wrap_guard(RenderMode::Server, |_: &Route, _: &Route, _next| {
            // Guard drops its Next without calling a terminal.
        });
        guard(&to, &from, proceed);

        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_before_route_identities_are_distinct() {
        let guards = before_route(RenderMode::Client, |_: &Route, _: &Route, next| {
            next.resolve();
        });

        let enter = std::ptr::addr_of!(*guards.before_enter).cast::<()>();
        let update = std::ptr::addr_of!(*guards.before_update).cast::<()>();
        assert_ne!(enter, update);
    }

    #[test]
    fn test_before_route_pair_behaves_identically() {
        let to = Route::new("/admin");
        let from = Route::new("/");
        let guards = before_route(RenderMode::Server, |_: &Route, _: &Route, next| {
            next.status(403).call(crate::NextValue::Cancel);
        });

        for guard in [&guards.before_enter, &guards.before_update] {
            let (proceed, seen) = capture();
            guard(&to, &from, proceed);
            assert_eq!(
                seen.lock().unwrap().as_slice(),
                &[NextOutcome::Signal(NavigationSignal::cancel(403))]
            );
        }
    }

    #[test]
    fn test_each_invocation_gets_fresh_state() {
        let to = Route::new("/");
        let from = Route::new("/");
        let guards = before_route(RenderMode::Server, |_: &Route, _: &Route, next| {
            // No staged status: relies on the 500 default each time.
            next.cancel(None);
        });

        for _ in 0..2 {
            let (proceed, seen) = capture();
            (guards.before_enter)(&to, &from, proceed);
            assert_eq!(
                seen.lock().unwrap().as_slice(),
                &[NextOutcome::Signal(NavigationSignal::cancel(500))]
            );
        }
    }
}
