//! Request-scoped context and logger binding.
//!
//! # Responsibilities
//! - Carry values down a call chain without threading extra parameters
//! - Bind a logger to a context and look it up again
//!
//! # Design Decisions
//! - A context is an immutable chain; deriving a child never touches the parent
//! - Lookup is by type and returns the nearest value, so a child binding
//!   shadows one made on an ancestor
//! - `from_context` never fails: without a binding it returns `Logger::default()`

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::logger::Logger;

struct Node {
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Node>>,
}

/// An immutable, cheaply cloneable chain of type-keyed values.
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

impl Context {
    /// The empty root context.
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a child context carrying `value`.
    pub fn with_value<T: Any + Send + Sync>(&self, value: T) -> Context {
        Context {
            head: Some(Arc::new(Node {
                value: Arc::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// Nearest value of type `T`, if any.
    pub fn value<T: Any + Send + Sync>(&self) -> Option<&T> {
        let mut node = self.head.as_deref();
        while let Some(current) = node {
            if let Some(value) = current.value.downcast_ref::<T>() {
                return Some(value);
            }
            node = current.parent.as_deref();
        }
        None
    }

    /// Number of values bound along the chain.
    pub fn depth(&self) -> usize {
        std::iter::successors(self.head.as_deref(), |n| n.parent.as_deref()).count()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context").field("depth", &self.depth()).finish()
    }
}

/// Private key type so a bound logger never collides with user values.
struct BoundLogger(Logger);

/// Derive a context carrying `logger`.
pub fn to_context(ctx: &Context, logger: Logger) -> Context {
    ctx.with_value(BoundLogger(logger))
}

/// The nearest bound logger, or the default logger when none is bound.
pub fn from_context(ctx: &Context) -> Logger {
    ctx.value::<BoundLogger>()
        .map(|bound| bound.0.clone())
        .unwrap_or_default()
}
