//! # sovran-typecontext
//!
//! Request-scoped values keyed by their type.
//!
//! `sovran-typecontext` lets any participant in a call chain attach a value to
//! a shared, immutable [`Context`] and lets any later participant get it back
//! by naming its type. There are no string keys to agree on and no global
//! registry: the context is passed explicitly, and the type of the value is
//! the key.
//!
//! ## Key Features
//!
//! - **Type as key**: `TypeKey::of::<T>()` is unique per type, so values of
//!   different types never collide
//! - **Immutable**: attaching returns a new context and never touches the parent
//! - **Shadowing**: the most recently attached value of a type wins along a lineage
//! - **Unconstrained**: any `T: Any + Send + Sync`, including closures and other
//!   types without `PartialEq`
//! - **Thread-safe**: contexts are `Send + Sync` and cheap to clone
//! - **Pluggable**: bring your own carrier by implementing [`ValueContext`]
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use sovran_typecontext::{Context, TypedContext};
//!
//! let ctx0 = Context::background();
//! let ctx1 = ctx0.with_typed("hello".to_string());
//! let ctx2 = ctx1.with_typed(42i32);
//!
//! assert_eq!(ctx2.get_typed::<String>().map(String::as_str), Some("hello"));
//! assert_eq!(ctx2.get_typed::<i32>(), Some(&42));
//! assert_eq!(ctx2.get_typed::<bool>(), None);
//!
//! // The parents are untouched
//! assert_eq!(ctx1.get_typed::<i32>(), None);
//! assert!(ctx0.is_background());
//! ```
//!
//! ### Carrying a User Through a Request
//!
//! ```rust
//! use sovran_typecontext::{from_context, context_with, Context};
//! use std::sync::Arc;
//!
//! #[derive(Debug)]
//! struct User {
//!     id: String,
//!     name: String,
//! }
//!
//! fn authenticate(ctx: &Context) -> Context {
//!     context_with(ctx, Arc::new(User {
//!         id: "42".to_string(),
//!         name: "John Doe".to_string(),
//!     }))
//! }
//!
//! fn handle(ctx: &Context) -> String {
//!     match from_context::<_, Arc<User>>(ctx) {
//!         Some(user) => format!("hello {} ({})", user.name, user.id),
//!         None => "hello stranger".to_string(),
//!     }
//! }
//!
//! let ctx = Context::background();
//! assert_eq!(handle(&ctx), "hello stranger");
//! assert_eq!(handle(&authenticate(&ctx)), "hello John Doe (42)");
//! ```
//!
//! ### Storing Closures
//!
//! ```rust
//! use sovran_typecontext::{Context, TypedContext};
//!
//! type Clock = Box<dyn Fn() -> u64 + Send + Sync>;
//!
//! let frozen: Clock = Box::new(|| 1_700_000_000u64);
//! let ctx = Context::background().with_typed(frozen);
//!
//! let now = ctx.get_typed::<Clock>().map(|clock| clock()).unwrap_or(0);
//! assert_eq!(now, 1_700_000_000);
//! ```
//!
//! ### Defaults and Errors
//!
//! ```rust
//! use sovran_typecontext::{Context, ContextError, TypedContext};
//!
//! #[derive(Debug, PartialEq)]
//! struct Locale(&'static str);
//!
//! fn greeting(ctx: &Context) -> Result<String, ContextError> {
//!     let fallback = Locale("en");
//!     let locale = ctx.get_typed_or(&fallback);
//!     let name = ctx.require_typed::<String>()?;
//!     Ok(format!("[{}] hi {}", locale.0, name))
//! }
//!
//! let ctx = Context::background().with_typed(Locale("fr"));
//! assert!(matches!(greeting(&ctx), Err(ContextError::NotFound { .. })));
//!
//! let ctx = ctx.with_typed("Ana".to_string());
//! assert_eq!(greeting(&ctx).unwrap(), "[fr] hi Ana");
//! ```
//!
//! ## Logging
//!
//! Attachments and misses are reported through [`tracing`] at `trace` level,
//! with the type name as a structured field. A value found under a type's key
//! that fails to downcast is reported at `debug`. The crate never installs a
//! subscriber.

mod any_value;
mod context;
mod error;
mod key;
mod typed;

pub use context::{Context, ValueContext};
pub use error::ContextError;
pub use key::TypeKey;
pub use typed::{context_with, from_context, from_context_or, require, TypedContext};

// Re-export std::any for convenience
pub use std::any::{Any, TypeId};
