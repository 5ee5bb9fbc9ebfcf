//! Shows shadowing and branch independence across a small middleware stack.
//!
//! Run with: cargo run --example middleware

use sovran_typecontext::{Context, TypedContext};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
struct Timeout(Duration);

#[derive(Debug, Clone, Copy)]
struct Attempt(u32);

type Audit = Box<dyn Fn(&str) -> String + Send + Sync>;

fn main() {
    // Server-wide defaults
    let server = Context::background()
        .with_typed(Timeout(Duration::from_secs(30)))
        .with_typed::<Audit>(Box::new(|msg: &str| format!("[audit] {}", msg)));

    // A route that needs a tighter timeout shadows the default
    let route = server.with_typed(Timeout(Duration::from_millis(500)));

    println!("server timeout: {:?}", server.get_typed::<Timeout>().map(|t| t.0));
    println!("route timeout:  {:?}", route.get_typed::<Timeout>().map(|t| t.0));
    println!("route context:  {:?}", route);

    // Retries fan out from the same parent; no branch sees another's attempt
    let handles: Vec<_> = (1..=3)
        .map(|n| {
            let ctx = route.with_typed(Attempt(n));
            thread::spawn(move || run(&ctx))
        })
        .collect();

    for handle in handles {
        if let Ok(line) = handle.join() {
            println!("{}", line);
        }
    }

    assert!(route.get_typed::<Attempt>().is_none());
}

fn run(ctx: &Context) -> String {
    let first = Attempt(0);
    let attempt = ctx.get_typed_or(&first);
    let timeout = ctx.get_typed::<Timeout>().map(|t| t.0).unwrap_or_default();
    let line = format!("attempt {} with timeout {:?}", attempt.0, timeout);

    match ctx.get_typed::<Audit>() {
        Some(audit) => audit(&line),
        None => line,
    }
}
