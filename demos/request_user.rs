//! Carries an authenticated user and a request id through a handler chain.
//!
//! Each layer only knows the types it produces or consumes - there is no
//! shared key registry, and no layer can clobber another layer's values.
//!
//! Run with: RUST_LOG=trace cargo run --example request_user

use sovran_typecontext::{Context, ContextError, TypedContext};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq)]
struct RequestId(u64);

#[derive(Debug)]
struct User {
    id: String,
    name: String,
}

#[derive(Debug, Clone, Copy)]
enum Role {
    Admin,
    Member,
}

fn main() -> Result<(), ContextError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    for (id, token) in [(1, "admin-token"), (2, "member-token"), (3, "bogus")] {
        let ctx = Context::background().with_typed(RequestId(id));
        let ctx = authenticate(&ctx, token);

        match handle(&ctx) {
            Ok(body) => println!("{}", body),
            Err(e) => println!("request {} rejected: {}", id, e),
        }
    }

    Ok(())
}

// ============================================================================
// Layers
// ============================================================================

fn authenticate(ctx: &Context, token: &str) -> Context {
    let (user, role) = match token {
        "admin-token" => (
            User {
                id: "1".to_string(),
                name: "Ada".to_string(),
            },
            Role::Admin,
        ),
        "member-token" => (
            User {
                id: "2".to_string(),
                name: "Grace".to_string(),
            },
            Role::Member,
        ),
        _ => return ctx.clone(),
    };

    ctx.with_typed(Arc::new(user)).with_typed(role)
}

fn handle(ctx: &Context) -> Result<String, ContextError> {
    let request = ctx.require_typed::<RequestId>()?;
    let user = ctx.require_typed::<Arc<User>>()?;
    let fallback = Role::Member;
    let role = ctx.get_typed_or(&fallback);

    Ok(format!(
        "request {}: {} (user {}) as {:?}",
        request.0, user.name, user.id, role
    ))
}
