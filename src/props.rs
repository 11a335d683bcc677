//! Per-slot prop resolution and the override mechanism
//!
//! A route record carries one prop resolver per component slot. A guard that
//! calls `.props(...)` asks for an extra object to be merged into whatever
//! each slot would have resolved to on its own. The override is installed as
//! a [`PropResolver::Wrapped`] layer over the original resolver and is
//! consumed by exactly one resolution, after which the slot reverts to its
//! pre-wrap state.
//!
//! Installing an override over an already wrapped slot replaces the previous
//! override instead of stacking: the original is taken out of the old layer
//! first, so repeated `.props(...)` calls and repeated guard runs against
//! the same record never nest.

use std::sync::{Arc, PoisonError};

use crate::route::{Route, RouteRecord};
use crate::trace_log;

/// An arbitrary props object handed to a component slot
pub type PropsObject = serde_json::Map<String, serde_json::Value>;

/// A computed prop resolver: route in, props object out
pub type PropsFn = Arc<dyn Fn(&Route) -> PropsObject + Send + Sync>;

/// How a component slot turns the route into props
///
/// The first three variants are the standing resolver kinds a host route
/// configuration declares; an absent slot entry means "no props". `Wrapped`
/// is the guard engine's pending-override layer and never appears nested
/// inside itself.
#[derive(Clone)]
pub enum PropResolver {
    /// Forward the route's path parameters as props
    Params,
    /// A static props object
    Object(PropsObject),
    /// Compute props from the route
    Resolver(PropsFn),
    /// A pending guard override composed over the pre-wrap resolver
    ///
    /// `original` is `None` when the slot had no resolver before wrapping;
    /// restoring such a slot removes the entry again.
    Wrapped {
        /// The resolver to revert to, never itself `Wrapped`
        original: Option<Box<PropResolver>>,
        /// The override merged over the original's value, winning collisions
        overrides: PropsObject,
    },
}

impl PropResolver {
    /// Static-object resolver
    pub fn object(props: PropsObject) -> Self {
        PropResolver::Object(props)
    }

    /// Computed resolver from a function or closure
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Route) -> PropsObject + Send + Sync + 'static,
    {
        PropResolver::Resolver(Arc::new(f))
    }

    /// Check if this is a pending override layer
    pub fn is_wrapped(&self) -> bool {
        matches!(self, PropResolver::Wrapped { .. })
    }
}

impl std::fmt::Debug for PropResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropResolver::Params => f.write_str("Params"),
            PropResolver::Object(props) => f.debug_tuple("Object").field(props).finish(),
            PropResolver::Resolver(_) => f.write_str("Resolver(..)"),
            PropResolver::Wrapped { original, overrides } => f
                .debug_struct("Wrapped")
                .field("original", original)
                .field("overrides", overrides)
                .finish(),
        }
    }
}

/// Shallow-merge `overrides` over `base`; override wins on key collision
pub fn merge_props(mut base: PropsObject, overrides: &PropsObject) -> PropsObject {
    for (key, value) in overrides {
        base.insert(key.clone(), value.clone());
    }
    base
}

/// Resolve a slot's standing value, ignoring wrap state
///
/// An absent resolver yields an empty object. A `Wrapped` resolver yields
/// its original's value merged with its override, which keeps this total
/// even though extracted originals are never wrapped.
fn resolve_base(resolver: Option<&PropResolver>, route: &Route) -> PropsObject {
    match resolver {
        None => PropsObject::new(),
        Some(PropResolver::Params) => route.params.to_props(),
        Some(PropResolver::Object(props)) => props.clone(),
        Some(PropResolver::Resolver(f)) => f(route),
        Some(PropResolver::Wrapped { original, overrides }) => {
            let base = resolve_base(original.as_deref(), route);
            merge_props(base, overrides)
        }
    }
}

impl RouteRecord {
    /// Install a prop override on every component slot of this record
    ///
    /// A slot that already carries an override is unwrapped first, so the
    /// new layer always composes over the pre-wrap resolver.
    pub fn apply_props_override(&self, overrides: &PropsObject) {
        let slots = self.slot_keys();

        trace_log!(
            "wrapping {} slot(s) of record {} with prop overrides",
            slots.len(),
            self.path
        );

        let mut map = self.props.write().unwrap_or_else(PoisonError::into_inner);

        for slot in slots {
            let original = match map.remove(&slot) {
                Some(PropResolver::Wrapped { original, .. }) => original,
                Some(other) => Some(Box::new(other)),
                None => None,
            };

            map.insert(
                slot,
                PropResolver::Wrapped {
                    original,
                    overrides: overrides.clone(),
                },
            );
        }
    }

    /// Resolve the props for one component slot
    ///
    /// A wrapped slot is consumed by this call: the entry reverts to its
    /// original (or is removed if the slot had none) before the value is
    /// computed, and the returned object is the original's value merged
    /// with the override. Other resolver kinds resolve without touching the
    /// slot state. User resolver functions run with the slot lock released.
    pub fn resolve_props(&self, slot: &str, route: &Route) -> PropsObject {
        let (resolver, overrides) = {
            let mut map = self.props.write().unwrap_or_else(PoisonError::into_inner);

            match map.remove(slot) {
                Some(PropResolver::Wrapped { original, overrides }) => {
                    let original = original.map(|boxed| *boxed);
                    if let Some(restored) = original.clone() {
                        map.insert(slot.to_string(), restored);
                    }
                    (original, Some(overrides))
                }
                Some(standing) => {
                    map.insert(slot.to_string(), standing.clone());
                    (Some(standing), None)
                }
                None => (None, None),
            }
        };

        let base = resolve_base(resolver.as_ref(), route);

        match overrides {
            Some(overrides) => merge_props(base, &overrides),
            None => base,
        }
    }

    /// Check whether a slot currently carries a pending override
    pub fn has_pending_override(&self, slot: &str) -> bool {
        self.props
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(slot)
            .is_some_and(PropResolver::is_wrapped)
    }
}

// ============================================================================
// Tests
// ============================================================================
