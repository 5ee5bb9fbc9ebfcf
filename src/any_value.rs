use crate::key::TypeKey;
use std::any::Any;
use std::fmt;

/// A type-erased value together with the key it was attached under
pub(crate) struct AnyValue {
    key: TypeKey,
    value: Box<dyn Any + Send + Sync>,
}

impl AnyValue {
    /// Pairs an already-boxed value with its key.
    ///
    /// The key is taken as given: nothing checks that it was derived from
    /// the boxed value's type, which is why reads always go through a
    /// checked downcast.
    pub(crate) fn new(key: TypeKey, value: Box<dyn Any + Send + Sync>) -> Self {
        Self { key, value }
    }

    pub(crate) fn key(&self) -> &TypeKey {
        &self.key
    }

    /// Check if this value was attached under `key`
    pub(crate) fn matches(&self, key: &TypeKey) -> bool {
        self.key == *key
    }

    pub(crate) fn value(&self) -> &(dyn Any + Send + Sync) {
        self.value.as_ref()
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyValue")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
