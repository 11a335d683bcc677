//! Navigation signals for the server environment
//!
//! A server render has no browser history: "cancel this navigation" or
//! "redirect elsewhere" cannot happen as a navigation side effect. Instead
//! the guard engine hands the host's proceed callback a [`NavigationSignal`]
//! describing the intended outcome, and the hosting server translates it
//! into an HTTP response (a redirect with `Location`, or a status page).
//!
//! The signal is error-like on purpose: it implements [`std::error::Error`]
//! so hosts that funnel render failures through one error channel can carry
//! it unchanged, and it exposes the fixed [`SIGNAL_NAME`] marker so such a
//! host can tell guard outcomes apart from arbitrary errors.

use std::fmt;

use crate::route::RedirectTarget;

/// Fixed marker identifying signals produced by this crate
pub const SIGNAL_NAME: &str = "navguard";

/// HTTP status used for a cancel signal with no explicit status
pub const DEFAULT_CANCEL_STATUS: u16 = 500;

/// HTTP status used for a redirect signal with no explicit status
pub const DEFAULT_REDIRECT_STATUS: u16 = 302;

/// What outcome a guard intends
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalKind {
    /// Block the navigation
    Cancel,
    /// Send the navigation elsewhere
    Redirect,
}

impl SignalKind {
    fn as_str(self) -> &'static str {
        match self {
            SignalKind::Cancel => "cancel",
            SignalKind::Redirect => "redirect",
        }
    }
}

/// Structured guard outcome for the hosting server process
///
/// # Example
///
/// ```
/// use navguard::{NavigationSignal, SignalKind};
///
/// let signal = NavigationSignal::redirect("/login", 302);
///
/// assert_eq!(signal.kind, SignalKind::Redirect);
/// assert_eq!(signal.status, 302);
/// assert_eq!(signal.to_string(), "[navguard] redirect: /login");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationSignal {
    /// Whether the guard cancelled or redirected
    pub kind: SignalKind,
    /// Redirect target; always `None` for cancel
    pub value: Option<RedirectTarget>,
    /// HTTP status the host should respond with
    pub status: u16,
}

impl NavigationSignal {
    /// Build a cancel signal
    pub fn cancel(status: u16) -> Self {
        Self {
            kind: SignalKind::Cancel,
            value: None,
            status,
        }
    }

    /// Build a redirect signal
    pub fn redirect(target: impl Into<RedirectTarget>, status: u16) -> Self {
        Self {
            kind: SignalKind::Redirect,
            value: Some(target.into()),
            status,
        }
    }

    /// The fixed marker distinguishing guard signals from arbitrary errors
    pub fn name(&self) -> &'static str {
        SIGNAL_NAME
    }

    /// Check if this signal cancels the navigation
    pub fn is_cancel(&self) -> bool {
        self.kind == SignalKind::Cancel
    }

    /// Check if this signal redirects the navigation
    pub fn is_redirect(&self) -> bool {
        self.kind == SignalKind::Redirect
    }

    /// The redirect target, if this is a redirect signal
    pub fn redirect_target(&self) -> Option<&RedirectTarget> {
        self.value.as_ref()
    }
}

impl fmt::Display for NavigationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}:", SIGNAL_NAME, self.kind.as_str())?;
        match &self.value {
            Some(target) => write!(f, " {}", target),
            None => write!(f, " {}", self.status),
        }
    }
}

impl std::error::Error for NavigationSignal {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteLocation;

    #[test]
    fn test_cancel_signal() {
        let signal = NavigationSignal::cancel(500);

        assert!(signal.is_cancel());
        assert!(!signal.is_redirect());
        assert_eq!(signal.value, None);
        assert_eq!(signal.status, 500);
        assert_eq!(signal.redirect_target(), None);
        assert_eq!(signal.name(), SIGNAL_NAME);
    }

    #[test]
    fn test_redirect_signal_path() {
        let signal = NavigationSignal::redirect("/login", 302);

        assert!(signal.is_redirect());
        assert_eq!(
            signal.redirect_target(),
            Some(&RedirectTarget::Path("/login".to_string()))
        );
        assert_eq!(signal.status, 302);
    }

    #[test]
    fn test_redirect_signal_location() {
        let signal = NavigationSignal::redirect(RouteLocation::named("login"), 307);

        match signal.redirect_target() {
            Some(RedirectTarget::Location(location)) => {
                assert_eq!(location.name.as_deref(), Some("login"));
            }
            other => panic!("expected location target, got {:?}", other),
        }
        assert_eq!(signal.status, 307);
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(
            NavigationSignal::cancel(404).to_string(),
            "[navguard] cancel: 404"
        );
        assert_eq!(
            NavigationSignal::redirect("/login", 302).to_string(),
            "[navguard] redirect: /login"
        );
        assert_eq!(
            NavigationSignal::redirect(RouteLocation::named("login"), 302).to_string(),
            "[navguard] redirect: { name: login }"
        );
    }

    #[test]
    fn test_error_trait() {
        let signal = NavigationSignal::cancel(500);
        let err: &(dyn std::error::Error + 'static) = &signal;

        assert!(err.downcast_ref::<NavigationSignal>().is_some());
    }
}
