use crate::any_value::AnyValue;
use crate::key::TypeKey;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// The two primitives a request context must offer for typed storage.
///
/// Implement this to layer typed values over a context type of your own;
/// every implementor gets [`TypedContext`](crate::TypedContext) for free.
/// Implementations must treat `self` as immutable: `with_value` returns a
/// new context and leaves the receiver exactly as it was.
pub trait ValueContext: Sized {
    /// Returns a child of `self` carrying `value` under `key`.
    fn with_value(&self, key: TypeKey, value: Box<dyn Any + Send + Sync>) -> Self;

    /// Looks `key` up, nearest attachment first.
    fn value(&self, key: &TypeKey) -> Option<&(dyn Any + Send + Sync)>;
}

struct Node {
    parent: Option<Arc<Node>>,
    entry: AnyValue,
}

impl Drop for Node {
    // Unlink the chain iteratively so that dropping a deep lineage does not
    // recurse once per node.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut node) => next = node.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// An immutable, persistent chain of request-scoped values.
///
/// A `Context` starts out as [`Context::background`] and grows one node per
/// attachment. Attaching never modifies an existing context; it returns a
/// new one that shares every node of its parent. Cloning is a reference
/// count bump, and contexts are `Send + Sync`, so a single parent can be
/// handed to any number of threads, each extending it independently.
///
/// # Examples
///
/// ```
/// use sovran_typecontext::{Context, TypeKey, ValueContext};
///
/// let root = Context::background();
/// let child = root.with_value(TypeKey::of::<u16>(), Box::new(8080u16));
///
/// assert!(root.value(&TypeKey::of::<u16>()).is_none());
/// let port = child.value(&TypeKey::of::<u16>()).and_then(|v| v.downcast_ref::<u16>());
/// assert_eq!(port, Some(&8080));
/// assert_eq!(child.depth(), 1);
/// ```
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

impl Context {
    /// The empty root context.
    pub fn background() -> Self {
        Self { head: None }
    }

    /// Same as [`Context::background`].
    pub fn new() -> Self {
        Self::background()
    }

    /// Returns true if nothing has been attached along this lineage.
    pub fn is_background(&self) -> bool {
        self.head.is_none()
    }

    /// Number of attachments between this context and the root, shadowed
    /// ones included.
    pub fn depth(&self) -> usize {
        self.nodes().count()
    }

    /// Keys along this lineage, newest first. A key appears once per
    /// attachment, so shadowed keys show up more than once.
    pub fn keys(&self) -> impl Iterator<Item = TypeKey> + '_ {
        self.nodes().map(|node| *node.entry.key())
    }

    /// Returns true if `self` and `other` are the same node, or both are
    /// the root.
    pub fn ptr_eq(&self, other: &Context) -> bool {
        match (&self.head, &other.head) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        std::iter::successors(self.head.as_deref(), |node| node.parent.as_deref())
    }
}

impl ValueContext for Context {
    fn with_value(&self, key: TypeKey, value: Box<dyn Any + Send + Sync>) -> Self {
        Self {
            head: Some(Arc::new(Node {
                parent: self.head.clone(),
                entry: AnyValue::new(key, value),
            })),
        }
    }

    fn value(&self, key: &TypeKey) -> Option<&(dyn Any + Send + Sync)> {
        self.nodes()
            .find(|node| node.entry.matches(key))
            .map(|node| node.entry.value())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&'static str> = self.keys().map(|key| key.type_name()).collect();
        f.debug_struct("Context")
            .field("depth", &keys.len())
            .field("keys", &keys)
            .finish()
    }
}
