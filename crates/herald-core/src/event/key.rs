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

//! Identifiers for event channels.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// A unique, opaque event token.
///
/// Every call to [`Symbol::new`] produces a token that is distinct from every
/// other symbol, even one created with the same description. Clones of a
/// symbol compare equal to the original.
///
/// # Example
///
/// ```rust
/// use herald_core::event::Symbol;
///
/// let a = Symbol::new("ready");
/// let b = Symbol::new("ready");
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
/// ```
#[derive(Clone)]
pub struct Symbol {
    id: Uuid,
    description: Option<Arc<str>>,
}

impl Symbol {
    /// Creates a new symbol with a human-readable description.
    pub fn new(description: impl Into<String>) -> Self {
        let description: String = description.into();
        Self {
            id: Uuid::new_v4(),
            description: Some(Arc::from(description)),
        }
    }

    /// Creates a new symbol without a description.
    pub fn anonymous() -> Self {
        Self {
            id: Uuid::new_v4(),
            description: None,
        }
    }

    /// Returns the description given at creation, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the unique identifier backing this symbol.
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl std::hash::Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(desc) => write!(f, "Symbol({desc:?}, {})", self.id),
            None => write!(f, "Symbol({})", self.id),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or(""))
    }
}

/// The key naming an event channel: either a plain name or a [`Symbol`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKey {
    /// A string event name, such as `"data"` or `"close"`.
    Name(Cow<'static, str>),
    /// A unique token that cannot collide with any name.
    Symbol(Symbol),
}

impl EventKey {
    /// Returns the event name, or `None` for symbol keys.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            EventKey::Name(name) => Some(name),
            EventKey::Symbol(_) => None,
        }
    }
}

impl From<&'static str> for EventKey {
    fn from(name: &'static str) -> Self {
        EventKey::Name(Cow::Borrowed(name))
    }
}

impl From<String> for EventKey {
    fn from(name: String) -> Self {
        EventKey::Name(Cow::Owned(name))
    }
}

impl From<Symbol> for EventKey {
    fn from(symbol: Symbol) -> Self {
        EventKey::Symbol(symbol)
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKey::Name(name) => f.write_str(name),
            EventKey::Symbol(symbol) => write!(f, "{symbol}"),
        }
    }
}
