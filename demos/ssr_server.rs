//! Host-side demo: translating guard outcomes into HTTP responses.
//!
//! A hosting server owns transport and rendering; this crate only decides
//! what a navigation is allowed to do. The demo simulates a few incoming
//! requests, runs an adapted guard in server mode, and shows how the host
//! turns each outcome into a response: pass-through renders (with a meta
//! status when one was stamped), redirect signals into `Location` headers
//! resolved through the named-route registry, and cancel signals into
//! status pages.
//!
//! Run with `RUST_LOG=trace cargo run --example ssr_server` to see the
//! guard engine's own logging.

use std::sync::{Arc, Mutex};

use navguard::{
    wrap_guard, NamedRouteRegistry, NextOutcome, ProceedFn, PropResolver, RenderMode, Route,
    RouteLocation, RouteRecord,
};
use serde_json::json;

/// A request the fake server answers.
struct Request {
    path: &'static str,
    authenticated: bool,
}

/// Build the resolved route the host router would hand to guards.
fn resolve_route(path: &str) -> Route {
    match path {
        "/" => Route::new("/").with_record(RouteRecord::new("/").component("default", "HomePage")),
        p if p.starts_with("/users/") => {
            let id = p.trim_start_matches("/users/").to_string();
            Route::new(p)
                .with_param("id", id)
                .with_record(
                    RouteRecord::new("/users/:id")
                        .component("default", "UserPage")
                        .props("default", PropResolver::Params),
                )
        }
        p => {
            let route = Route::new(p)
                .with_record(RouteRecord::new("*").component("default", "NotFoundPage"));
            route.meta.insert("requires_auth", "true");
            route
        }
    }
}

fn main() {
    env_logger::init();

    let mut registry = NamedRouteRegistry::new();
    registry.register("login", "/login");
    registry.register("user", "/users/:id");

    let requests = [
        Request { path: "/", authenticated: false },
        Request { path: "/users/5", authenticated: true },
        Request { path: "/users/5", authenticated: false },
        Request { path: "/admin", authenticated: true },
    ];

    for request in requests {
        let to = resolve_route(request.path);
        let from = Route::new("/");
        let authenticated = request.authenticated;

        // One guard, SSR mode: user pages need a session, unknown pages
        // render the not-found component with extra props and a 404.
        let guard = wrap_guard(RenderMode::Server, move |to: &Route, _from: &Route, next| {
            if to.path.starts_with("/users/") && !authenticated {
                next.redirect(
                    RouteLocation::named("login").with_query("then", to.path.clone()),
                    None,
                );
            } else if to.meta.get("requires_auth").is_some() {
                next.status(404)
                    .props(json!({"attempted": to.path}).as_object().cloned().unwrap_or_default())
                    .resolve();
            } else {
                next.resolve();
            }
        });

        let outcome = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&outcome);
        let proceed: ProceedFn = Box::new(move |o| {
            *sink.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = Some(o);
        });

        guard(&to, &from, proceed);

        let outcome = outcome
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take();
        respond(&registry, &to, request.path, outcome);
    }
}

/// The host's equivalent of an error-handling render callback.
fn respond(registry: &NamedRouteRegistry, to: &Route, path: &str, outcome: Option<NextOutcome>) {
    println!("GET {}", path);

    match outcome {
        Some(NextOutcome::Signal(signal)) if signal.is_redirect() => {
            let location = signal
                .redirect_target()
                .and_then(|target| registry.resolve(target))
                .unwrap_or_else(|| "/".to_string());
            println!("  HTTP {} -> Location: {}", signal.status, location);
        }
        Some(NextOutcome::Signal(signal)) => {
            println!("  HTTP {} - navigation cancelled", signal.status);
        }
        Some(NextOutcome::Continue) => {
            let status = to.meta.status().unwrap_or(200);
            println!("  HTTP {}", status);
            for record in &to.matched {
                for slot in record.slot_keys() {
                    let props = record.resolve_props(&slot, to);
                    println!(
                        "  render {} [{}] props: {}",
                        record.path,
                        slot,
                        serde_json::Value::Object(props)
                    );
                }
            }
        }
        Some(other) => println!("  unexpected client-mode outcome: {:?}", other),
        None => println!("  guard never resolved - request stalls"),
    }

    println!();
}
