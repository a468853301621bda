//! Callback type invoked by a fire pass.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::context::EventContext;

type HandlerFn = dyn Fn(&EventContext) -> Value + Send + Sync;

/// A subscribed callback.
///
/// Callbacks are compared by identity: clones of one `Callback` are equal,
/// while two `Callback::new` calls never are, even for identical closures.
/// Keep a clone around to filter or unsubscribe by callback later.
#[derive(Clone)]
pub struct Callback {
    inner: Arc<HandlerFn>,
}

impl Callback {
    /// Wraps a closure.
    ///
    /// Anything convertible into a JSON value can be returned; `()` becomes
    /// `null`. Returning exactly `false` cancels the rest of the fire pass.
    pub fn new<F, R>(handler: F) -> Self
    where
        F: Fn(&EventContext) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        Self {
            inner: Arc::new(move |ctx: &EventContext| handler(ctx).into()),
        }
    }

    /// Invokes the callback.
    pub fn call(&self, ctx: &EventContext) -> Value {
        (self.inner)(ctx)
    }

    /// Whether both values are the same callback.
    pub fn same(&self, other: &Callback) -> bool {
        std::ptr::eq(self.addr(), other.addr())
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.inner) as *const ()
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for Callback {}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback").field(&self.addr()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let a = Callback::new(|_: &EventContext| ());
        let b = Callback::new(|_: &EventContext| ());
        let a2 = a.clone();

        assert_eq!(a, a2);
        assert_ne!(a, b);
        assert!(a.same(&a2));
        assert!(!a.same(&b));
    }

    #[test]
    fn test_return_conversion() {
        let ctx = EventContext::new("evt", Value::Null);

        assert_eq!(Callback::new(|_: &EventContext| ()).call(&ctx), Value::Null);
        assert_eq!(Callback::new(|_: &EventContext| false).call(&ctx), Value::Bool(false));
        assert_eq!(Callback::new(|_: &EventContext| 5).call(&ctx), serde_json::json!(5));
        assert_eq!(
            Callback::new(|ctx: &EventContext| ctx.target.clone()).call(&ctx),
            serde_json::json!("evt")
        );
    }
}
