use crate::context::ValueContext;
use crate::error::ContextError;
use crate::key::TypeKey;
use std::any::Any;
use std::borrow::Cow;
use tracing::{debug, trace};

/// Typed storage on top of any [`ValueContext`].
///
/// Values are keyed by their own type: attaching a `T` stores it under
/// `TypeKey::of::<T>()` and a later lookup for `T` finds the nearest one.
/// The only bounds on `T` are `Any + Send + Sync`, so closures, trait
/// objects and other types without `PartialEq` can be stored as well.
///
/// Wrap values in a newtype when two unrelated parts of a program want to
/// store the same underlying type; otherwise they will shadow each other.
///
/// # Examples
///
/// ```
/// use sovran_typecontext::{Context, TypedContext};
///
/// #[derive(Debug, PartialEq)]
/// struct RequestId(u64);
///
/// let ctx = Context::background().with_typed(RequestId(7));
/// assert_eq!(ctx.get_typed::<RequestId>(), Some(&RequestId(7)));
/// assert_eq!(ctx.get_typed::<u64>(), None);
/// ```
pub trait TypedContext: ValueContext {
    /// Returns a child context carrying `value` under the key for `T`.
    ///
    /// `self` is not modified. A value of the same type attached earlier in
    /// this lineage is shadowed, not replaced, and stays visible from
    /// contexts that were derived before this call.
    fn with_typed<T: Any + Send + Sync>(&self, value: T) -> Self {
        let key = TypeKey::of::<T>();
        trace!(type_name = key.type_name(), "attaching typed value");
        self.with_value(key, Box::new(value))
    }

    /// Returns the nearest value of type `T`, or `None` if there is none.
    ///
    /// A value stored under `T`'s key that is not actually a `T` is
    /// indistinguishable from no value at all.
    fn get_typed<T: Any + Send + Sync>(&self) -> Option<&T> {
        let key = TypeKey::of::<T>();
        let Some(value) = self.value(&key) else {
            trace!(type_name = key.type_name(), "no typed value in context");
            return None;
        };

        let narrowed = value.downcast_ref::<T>();
        if narrowed.is_none() {
            debug!(
                type_name = key.type_name(),
                "value stored under type key has a different type"
            );
        }
        narrowed
    }

    /// Returns the nearest value of type `T`, or `default` if there is none.
    fn get_typed_or<'a, T: Any + Send + Sync>(&'a self, default: &'a T) -> &'a T {
        self.get_typed::<T>().unwrap_or(default)
    }

    /// Borrows the nearest value of type `T`, or computes an owned fallback.
    ///
    /// ```
    /// use sovran_typecontext::{Context, TypedContext};
    /// use std::borrow::Cow;
    ///
    /// let ctx = Context::background();
    /// let name: Cow<'_, String> = ctx.get_typed_or_else(|| "anonymous".to_string());
    /// assert!(matches!(name, Cow::Owned(_)));
    /// assert_eq!(name.as_str(), "anonymous");
    /// ```
    fn get_typed_or_else<T, F>(&self, f: F) -> Cow<'_, T>
    where
        T: Any + Send + Sync + Clone,
        F: FnOnce() -> T,
    {
        match self.get_typed::<T>() {
            Some(value) => Cow::Borrowed(value),
            None => Cow::Owned(f()),
        }
    }

    /// Returns true if a usable value of type `T` is reachable.
    fn contains_typed<T: Any + Send + Sync>(&self) -> bool {
        self.get_typed::<T>().is_some()
    }

    /// Like [`get_typed`](TypedContext::get_typed), but reports absence as
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::NotFound` if no usable value of type `T` is
    /// reachable from this context.
    fn require_typed<T: Any + Send + Sync>(&self) -> Result<&T, ContextError> {
        self.get_typed::<T>().ok_or(ContextError::NotFound {
            type_name: std::any::type_name::<T>(),
        })
    }
}

impl<C: ValueContext> TypedContext for C {}

/// Returns a new context with `value` attached by type.
///
/// Function-style spelling of [`TypedContext::with_typed`].
pub fn context_with<C, T>(ctx: &C, value: T) -> C
where
    C: ValueContext,
    T: Any + Send + Sync,
{
    ctx.with_typed(value)
}

/// Returns the entry in `ctx` keyed by the type `T`.
///
/// Function-style spelling of [`TypedContext::get_typed`].
pub fn from_context<C, T>(ctx: &C) -> Option<&T>
where
    C: ValueContext,
    T: Any + Send + Sync,
{
    ctx.get_typed::<T>()
}

/// Returns the entry in `ctx` keyed by the type `T`, otherwise `default`.
///
/// Function-style spelling of [`TypedContext::get_typed_or`].
pub fn from_context_or<'a, C, T>(ctx: &'a C, default: &'a T) -> &'a T
where
    C: ValueContext,
    T: Any + Send + Sync,
{
    ctx.get_typed_or(default)
}

/// Returns the entry in `ctx` keyed by the type `T`, or an error naming `T`.
///
/// # Errors
///
/// Returns `ContextError::NotFound` if no usable value of type `T` is
/// reachable from `ctx`.
pub fn require<C, T>(ctx: &C) -> Result<&T, ContextError>
where
    C: ValueContext,
    T: Any + Send + Sync,
{
    ctx.require_typed::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Context;
    use std::collections::HashMap;

    /// A carrier that hands back whatever it holds for every key, the way a
    /// context keyed by something coarser than a type might collide.
    struct Colliding {
        value: Option<Box<dyn Any + Send + Sync>>,
    }

    impl ValueContext for Colliding {
        fn with_value(&self, _key: TypeKey, value: Box<dyn Any + Send + Sync>) -> Self {
            Colliding { value: Some(value) }
        }

        fn value(&self, _key: &TypeKey) -> Option<&(dyn Any + Send + Sync)> {
            self.value.as_deref()
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct User {
        id: String,
        name: String,
    }

    #[test]
    fn test_attach_and_get() {
        let ctx = Context::background().with_typed("some string".to_string());
        assert_eq!(
            ctx.get_typed::<String>().map(String::as_str),
            Some("some string")
        );
    }

    #[test]
    fn test_scenario_string_int_bool() {
        let ctx0 = Context::background();
        let ctx1 = ctx0.with_typed("hello");
        let ctx2 = ctx1.with_typed(42i64);

        assert_eq!(ctx2.get_typed::<&str>(), Some(&"hello"));
        assert_eq!(ctx2.get_typed::<i64>(), Some(&42));
        assert_eq!(ctx2.get_typed::<bool>(), None);
    }

    #[test]
    fn test_struct_value_is_stored_by_value() {
        let mut expected = User {
            id: "42".to_string(),
            name: "John Doe".to_string(),
        };
        let ctx = Context::background().with_typed(expected.clone());

        expected.name = "Jane Doe".to_string();
        let stored = ctx.get_typed::<User>().unwrap();
        assert_eq!(stored.name, "John Doe");
        assert_ne!(stored, &expected);
    }

    #[test]
    fn test_non_comparable_values() {
        type Greeting = Box<dyn Fn() -> String + Send + Sync>;
        let greeting: Greeting = Box::new(|| "ok".to_string());

        let ctx = Context::background()
            .with_typed(greeting)
            .with_typed(HashMap::from([("k".to_string(), vec![1u8, 2])]));

        let f = ctx.get_typed::<Greeting>().unwrap();
        assert_eq!(f(), "ok");
        assert_eq!(
            ctx.get_typed::<HashMap<String, Vec<u8>>>()
                .and_then(|m| m.get("k")),
            Some(&vec![1u8, 2])
        );
    }

    #[test]
    fn test_type_mismatch_reads_as_absent() {
        let ctx = Colliding { value: None }.with_typed(7i32);

        assert_eq!(ctx.get_typed::<i32>(), Some(&7));
        assert_eq!(ctx.get_typed::<String>(), None);
        assert!(!ctx.contains_typed::<String>());
        assert_eq!(
            ctx.require_typed::<String>(),
            Err(ContextError::NotFound {
                type_name: std::any::type_name::<String>()
            })
        );
        assert_eq!(ctx.get_typed_or(&"fallback".to_string()), "fallback");
    }

    #[test]
    fn test_get_typed_or() {
        let ctx = Context::background().with_typed(3u32);
        assert_eq!(*ctx.get_typed_or(&9u32), 3);
        assert_eq!(*ctx.get_typed_or(&9u16), 9);
    }

    #[test]
    fn test_get_typed_or_else_borrows_on_hit() {
        let ctx = Context::background().with_typed(vec![1, 2, 3]);
        let mut called = false;
        let value: Cow<'_, Vec<i32>> = ctx.get_typed_or_else(|| {
            called = true;
            Vec::new()
        });
        assert!(matches!(value, Cow::Borrowed(_)));
        assert_eq!(*value, vec![1, 2, 3]);
        assert!(!called);
    }

    #[test]
    fn test_require_typed() {
        let ctx = Context::background().with_typed(1.5f64);
        assert_eq!(ctx.require_typed::<f64>(), Ok(&1.5));

        let err = ctx.require_typed::<f32>().unwrap_err();
        assert_eq!(err.to_string(), "no value of type `f32` in context");
    }

    #[test]
    fn test_free_functions() {
        let ctx = context_with(&Context::background(), 'x');
        assert_eq!(from_context::<_, char>(&ctx), Some(&'x'));
        assert_eq!(from_context::<_, u8>(&ctx), None);
        assert_eq!(*from_context_or(&ctx, &'y'), 'x');
        assert_eq!(*from_context_or(&ctx, &0u8), 0);
        assert_eq!(require::<_, char>(&ctx), Ok(&'x'));
        assert!(require::<_, u8>(&ctx).is_err());
    }
}
