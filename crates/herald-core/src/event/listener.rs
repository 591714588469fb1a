// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Listener handles and their identity semantics.

use std::fmt;
use std::rc::Rc;

/// The untyped, variable-length argument list delivered by a
/// [`DynamicEmitter`](crate::event::DynamicEmitter).
pub type Args = [serde_json::Value];

/// A shared handle to a listener callback.
///
/// Listeners are compared by identity: two handles are equal only when one is
/// a clone of the other. Keep a clone of the handle you register if you intend
/// to remove it later with [`off`](crate::event::EventEmitter::off).
///
/// # Example
///
/// ```rust
/// use herald_core::event::Listener;
///
/// let a: Listener<str> = Listener::from_fn(|_msg: &str| {});
/// let b: Listener<str> = Listener::from_fn(|_msg: &str| {});
/// assert_eq!(a, a.clone());
/// assert_ne!(a, b);
/// ```
pub struct Listener<A: ?Sized> {
    callback: Rc<dyn Fn(&A) -> anyhow::Result<()>>,
}

impl<A: ?Sized> Listener<A> {
    /// Wraps a fallible callback. An error returned by the callback aborts the
    /// emission that invoked it and is handed back to the emitter's caller.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&A) -> anyhow::Result<()> + 'static,
    {
        Self {
            callback: Rc::new(callback),
        }
    }

    /// Wraps a callback that cannot fail.
    pub fn from_fn<F>(callback: F) -> Self
    where
        F: Fn(&A) + 'static,
    {
        Self::new(move |args| {
            callback(args);
            Ok(())
        })
    }

    /// Invokes the callback with the given arguments.
    pub fn call(&self, args: &A) -> anyhow::Result<()> {
        (self.callback)(args)
    }

    /// Returns `true` if both handles refer to the same registered callable.
    pub fn same_as(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.callback), Rc::as_ptr(&other.callback))
    }
}

impl<A: ?Sized> Clone for Listener<A> {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<A: ?Sized> PartialEq for Listener<A> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<A: ?Sized> Eq for Listener<A> {}

impl<A: ?Sized> fmt::Debug for Listener<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener")
            .field(&Rc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_clone_shares_identity() {
        let listener: Listener<i32> = Listener::from_fn(|_| {});
        let clone = listener.clone();
        assert!(listener.same_as(&clone));
        assert_eq!(listener, clone);
    }

    #[test]
    fn test_same_closure_wrapped_twice_is_distinct() {
        fn noop(_: &i32) {}
        let a: Listener<i32> = Listener::from_fn(noop);
        let b: Listener<i32> = Listener::from_fn(noop);
        assert_ne!(a, b);
    }

    #[test]
    fn test_call_forwards_arguments() {
        let seen = Rc::new(Cell::new(0));
        let seen_clone = Rc::clone(&seen);
        let listener: Listener<i32> = Listener::from_fn(move |v: &i32| seen_clone.set(*v));

        listener.call(&42).unwrap();
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn test_call_returns_callback_error() {
        let listener: Listener<str> = Listener::new(|msg: &str| anyhow::bail!("rejected {msg}"));
        let err = listener.call("payload").unwrap_err();
        assert_eq!(err.to_string(), "rejected payload");
    }
}
