use thiserror::Error;

/// Errors produced when a caller insists on a value being present.
///
/// Plain lookups never fail; they return `None`. This error only comes out
/// of [`TypedContext::require_typed`](crate::TypedContext::require_typed) and
/// [`require`](crate::require), so absence can be propagated with `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    /// No usable value of the requested type was found. A value stored
    /// under the type's key that fails to downcast is reported the same way.
    #[error("no value of type `{type_name}` in context")]
    NotFound { type_name: &'static str },
}
