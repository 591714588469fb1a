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

use super::error::{ListenerKind, ListenerLimitExceeded};
use super::key::EventKey;
use super::listener::{Args, Listener};
use crate::config::EmitterConfig;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// An emitter keyed by [`EventKey`] that delivers untyped JSON argument lists.
pub type DynamicEmitter = EventEmitter<EventKey, Args>;

/// The entries registered for one event, plus the position of the event in
/// registration order.
struct ListenerList<A: ?Sized> {
    order: u64,
    entries: Vec<Listener<A>>,
}

#[derive(Clone, Copy)]
enum Placement {
    Append,
    Prepend,
}

struct Registry<K, A: ?Sized> {
    persistent: HashMap<K, ListenerList<A>>,
    once: HashMap<K, ListenerList<A>>,
    next_order: u64,
}

impl<K: Eq + Hash + Clone, A: ?Sized> Registry<K, A> {
    fn new() -> Self {
        Self {
            persistent: HashMap::new(),
            once: HashMap::new(),
            next_order: 0,
        }
    }

    fn map(&self, kind: ListenerKind) -> &HashMap<K, ListenerList<A>> {
        match kind {
            ListenerKind::Persistent => &self.persistent,
            ListenerKind::Once => &self.once,
        }
    }

    /// Inserts `listener` and returns the new length of the list.
    fn insert(
        &mut self,
        kind: ListenerKind,
        event: K,
        listener: Listener<A>,
        placement: Placement,
    ) -> usize {
        let next_order = &mut self.next_order;
        let map = match kind {
            ListenerKind::Persistent => &mut self.persistent,
            ListenerKind::Once => &mut self.once,
        };
        let list = map.entry(event).or_insert_with(|| {
            let order = *next_order;
            *next_order += 1;
            ListenerList {
                order,
                entries: Vec::new(),
            }
        });
        match placement {
            Placement::Append => list.entries.push(listener),
            Placement::Prepend => list.entries.insert(0, listener),
        }
        list.entries.len()
    }

    /// Removes the first entry identical to `listener`, dropping the event
    /// from the map once its list is empty.
    fn remove_first(&mut self, kind: ListenerKind, event: &K, listener: &Listener<A>) -> bool {
        let map = match kind {
            ListenerKind::Persistent => &mut self.persistent,
            ListenerKind::Once => &mut self.once,
        };
        let Some(list) = map.get_mut(event) else {
            return false;
        };
        let Some(index) = list.entries.iter().position(|l| l.same_as(listener)) else {
            return false;
        };
        list.entries.remove(index);
        if list.entries.is_empty() {
            map.remove(event);
        }
        true
    }

    fn snapshot(&self, kind: ListenerKind, event: &K) -> Vec<Listener<A>> {
        self.map(kind)
            .get(event)
            .map(|list| list.entries.clone())
            .unwrap_or_default()
    }

    fn len(&self, kind: ListenerKind, event: &K) -> usize {
        self.map(kind).get(event).map_or(0, |list| list.entries.len())
    }

    /// Non-empty event keys of one map, in registration order.
    fn ordered_keys(&self, kind: ListenerKind) -> Vec<K> {
        let mut keyed: Vec<(u64, &K)> = self
            .map(kind)
            .iter()
            .filter(|(_, list)| !list.entries.is_empty())
            .map(|(key, list)| (list.order, key))
            .collect();
        keyed.sort_by_key(|(order, _)| *order);
        keyed.into_iter().map(|(_, key)| key.clone()).collect()
    }
}

/// A synchronous, single-threaded listener registry.
///
/// Each event has two ordered lists: persistent listeners, invoked on every
/// emission until removed, and one-shot listeners, invoked on the next
/// emission and then dropped. All operations take `&self`, so a listener may
/// hold a handle to its emitter (typically a [`Weak`](std::rc::Weak)) and
/// register, remove, or re-emit while it is being invoked.
///
/// # Emission order
///
/// [`emit`](Self::emit) invokes the persistent listeners first and the one-shot
/// listeners after them. If an event has no persistent listener, `emit`
/// returns `false` without touching its one-shot listeners; they stay
/// registered until an emission finds a persistent listener.
///
/// # Example
///
/// ```rust
/// use herald_core::event::{EventEmitter, Listener};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let emitter: EventEmitter<&str, str> = EventEmitter::new();
/// let received = Rc::new(RefCell::new(Vec::new()));
///
/// let sink = Rc::clone(&received);
/// emitter
///     .on("x", Listener::from_fn(move |arg: &str| sink.borrow_mut().push(arg.to_owned())))
///     .unwrap();
///
/// assert!(emitter.emit(&"x", "payload").unwrap());
/// assert_eq!(*received.borrow(), vec!["payload".to_string()]);
/// ```
pub struct EventEmitter<K = EventKey, A: ?Sized = Args> {
    registry: RefCell<Registry<K, A>>,
    max_listeners: Cell<usize>,
}

impl<K, A> EventEmitter<K, A>
where
    K: Eq + Hash + Clone + fmt::Debug,
    A: ?Sized,
{
    /// Creates an empty registry whose threshold is the current process-wide
    /// default.
    pub fn new() -> Self {
        Self::with_config(EmitterConfig::default())
    }

    /// Creates an empty registry from an explicit configuration.
    ///
    /// ## Arguments
    /// * `config` - Settings copied into the new registry, such as its
    ///   max-listeners threshold.
    pub fn with_config(config: EmitterConfig) -> Self {
        log::trace!(
            "EventEmitter created (max listeners: {}).",
            config.max_listeners
        );
        Self {
            registry: RefCell::new(Registry::new()),
            max_listeners: Cell::new(config.max_listeners),
        }
    }

    fn register(
        &self,
        kind: ListenerKind,
        event: K,
        listener: Listener<A>,
        placement: Placement,
    ) -> Result<&Self, ListenerLimitExceeded<K>> {
        let count = self
            .registry
            .borrow_mut()
            .insert(kind, event.clone(), listener, placement);
        log::trace!("Registered {kind} listener for {event:?} ({count} in list).");

        let max = self.max_listeners.get();
        if count > max {
            log::warn!(
                "Possible listener leak: {count} {kind} listeners registered for {event:?} (max {max})."
            );
            return Err(ListenerLimitExceeded {
                event,
                count,
                max,
                kind,
            });
        }
        Ok(self)
    }

    /// Appends `listener` to the persistent list of `event`.
    ///
    /// ## Arguments
    /// * `event` - The event to listen to.
    /// * `listener` - The handle to register. Keep a clone to remove it later.
    ///
    /// ## Returns
    /// The registry itself, for chaining. If the list now holds more entries
    /// than [`max_listeners`](Self::max_listeners), the listener stays
    /// registered and [`ListenerLimitExceeded`] is returned instead.
    pub fn on(&self, event: K, listener: Listener<A>) -> Result<&Self, ListenerLimitExceeded<K>> {
        self.register(ListenerKind::Persistent, event, listener, Placement::Append)
    }

    /// Alias of [`on`](Self::on).
    pub fn add_listener(
        &self,
        event: K,
        listener: Listener<A>,
    ) -> Result<&Self, ListenerLimitExceeded<K>> {
        self.on(event, listener)
    }

    /// Appends `listener` to the one-shot list of `event`.
    ///
    /// The threshold is checked against the one-shot list alone.
    pub fn once(&self, event: K, listener: Listener<A>) -> Result<&Self, ListenerLimitExceeded<K>> {
        self.register(ListenerKind::Once, event, listener, Placement::Append)
    }

    /// Inserts `listener` at the head of the persistent list of `event`.
    pub fn prepend_listener(
        &self,
        event: K,
        listener: Listener<A>,
    ) -> Result<&Self, ListenerLimitExceeded<K>> {
        self.register(ListenerKind::Persistent, event, listener, Placement::Prepend)
    }

    /// Inserts `listener` at the head of the one-shot list of `event`.
    pub fn prepend_once_listener(
        &self,
        event: K,
        listener: Listener<A>,
    ) -> Result<&Self, ListenerLimitExceeded<K>> {
        self.register(ListenerKind::Once, event, listener, Placement::Prepend)
    }

    /// Removes the first entry identical to `listener`, looking in the
    /// one-shot list before the persistent list. Does nothing if neither
    /// list holds it.
    pub fn off(&self, event: &K, listener: &Listener<A>) -> &Self {
        let removed = {
            let mut registry = self.registry.borrow_mut();
            if registry.remove_first(ListenerKind::Once, event, listener) {
                Some(ListenerKind::Once)
            } else if registry.remove_first(ListenerKind::Persistent, event, listener) {
                Some(ListenerKind::Persistent)
            } else {
                None
            }
        };
        match removed {
            Some(kind) => log::trace!("Removed {kind} listener from {event:?}."),
            None => log::trace!("No matching listener registered for {event:?}."),
        }
        self
    }

    /// Alias of [`off`](Self::off).
    pub fn remove_listener(&self, event: &K, listener: &Listener<A>) -> &Self {
        self.off(event, listener)
    }

    /// Delivers `args` to the listeners of `event`, synchronously and in order.
    ///
    /// Returns `Ok(false)` when `event` has no persistent listener, in which
    /// case nothing is invoked, one-shot listeners included. Otherwise every
    /// persistent listener registered when the call started is invoked, then
    /// every one-shot listener still registered is removed and invoked, and
    /// `Ok(true)` is returned.
    ///
    /// Each one-shot entry is removed just before it is invoked, so a one-shot
    /// listener that returns an error has still been consumed. One-shot entries
    /// after it are not invoked and stay registered.
    ///
    /// ## Arguments
    /// * `event` - The event to deliver to.
    /// * `args` - The arguments passed to every invoked listener.
    ///
    /// ## Returns
    /// `Ok(true)` if the event had persistent listeners, `Ok(false)` otherwise.
    /// The first error returned by a listener aborts the emission and is
    /// returned unchanged.
    pub fn emit(&self, event: &K, args: &A) -> anyhow::Result<bool> {
        let persistent = self
            .registry
            .borrow()
            .snapshot(ListenerKind::Persistent, event);
        if persistent.is_empty() {
            log::trace!("Emit {event:?}: no persistent listeners.");
            return Ok(false);
        }

        log::trace!(
            "Emit {event:?}: invoking {} persistent listeners.",
            persistent.len()
        );
        for listener in &persistent {
            listener.call(args)?;
        }

        let pending = self.registry.borrow().snapshot(ListenerKind::Once, event);
        for listener in &pending {
            // A re-entrant emit or an `off` may already have consumed this entry.
            let still_registered = self
                .registry
                .borrow_mut()
                .remove_first(ListenerKind::Once, event, listener);
            if still_registered {
                listener.call(args)?;
            }
        }
        Ok(true)
    }

    /// Returns every event with at least one registered entry: events with
    /// persistent listeners first, then events that only have one-shot
    /// listeners, each in registration order and without duplicates.
    pub fn event_names(&self) -> Vec<K> {
        let registry = self.registry.borrow();
        let mut names = registry.ordered_keys(ListenerKind::Persistent);
        for key in registry.ordered_keys(ListenerKind::Once) {
            if !names.contains(&key) {
                names.push(key);
            }
        }
        names
    }

    /// Number of persistent plus one-shot entries registered for `event`.
    pub fn listener_count(&self, event: &K) -> usize {
        let registry = self.registry.borrow();
        registry.len(ListenerKind::Persistent, event) + registry.len(ListenerKind::Once, event)
    }

    /// Returns the persistent entries of `event` followed by its one-shot
    /// entries.
    pub fn listeners(&self, event: &K) -> Vec<Listener<A>> {
        let registry = self.registry.borrow();
        let mut all = registry.snapshot(ListenerKind::Persistent, event);
        all.extend(registry.snapshot(ListenerKind::Once, event));
        all
    }

    /// Returns `true` if `event` has at least one registered entry.
    pub fn has_listeners(&self, event: &K) -> bool {
        self.listener_count(event) > 0
    }

    /// Returns `true` if no event has any registered entry.
    pub fn is_empty(&self) -> bool {
        let registry = self.registry.borrow();
        registry.persistent.is_empty() && registry.once.is_empty()
    }

    /// Removes every entry of the given events, from both lists.
    ///
    /// ## Arguments
    /// * `events` - The events to clear. An empty slice removes every entry of
    ///   every event, like [`clear`](Self::clear).
    ///
    /// ## Returns
    /// The registry itself, for chaining.
    pub fn remove_all_listeners(&self, events: &[K]) -> &Self {
        if events.is_empty() {
            return self.clear();
        }
        // Removed lists are dropped only after the borrow ends: a captured
        // value's `Drop` may call back into this registry.
        let mut removed: Vec<ListenerList<A>> = Vec::new();
        {
            let mut registry = self.registry.borrow_mut();
            for event in events {
                removed.extend(registry.persistent.remove(event));
                removed.extend(registry.once.remove(event));
            }
        }
        drop(removed);
        log::debug!("Removed all listeners for {events:?}.");
        self
    }

    /// Removes every entry of every event.
    ///
    /// ## Returns
    /// The registry itself, for chaining.
    pub fn clear(&self) -> &Self {
        let old = std::mem::replace(&mut *self.registry.borrow_mut(), Registry::new());
        drop(old);
        log::debug!("Removed all listeners.");
        self
    }

    /// Sets the threshold used by subsequent additions. Lists that already
    /// exceed it are left untouched.
    pub fn set_max_listeners(&self, max: usize) -> &Self {
        log::debug!("Max listeners set to {max}.");
        self.max_listeners.set(max);
        self
    }

    /// Returns the current threshold.
    pub fn max_listeners(&self) -> usize {
        self.max_listeners.get()
    }
}

impl<K, A> Default for EventEmitter<K, A>
where
    K: Eq + Hash + Clone + fmt::Debug,
    A: ?Sized,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, A> fmt::Debug for EventEmitter<K, A>
where
    K: Eq + Hash + Clone + fmt::Debug,
    A: ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<(K, usize)> = self
            .event_names()
            .into_iter()
            .map(|name| {
                let count = self.listener_count(&name);
                (name, count)
            })
            .collect();
        f.debug_struct("EventEmitter")
            .field("events", &counts)
            .field("max_listeners", &self.max_listeners.get())
            .finish()
    }
}
