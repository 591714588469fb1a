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

//! Provides the listener registry and its building blocks.
//!
//! The primary component is the [`EventEmitter`], a synchronous, single-threaded
//! registry of persistent and one-shot listeners keyed by event. It is generic
//! over the key type and the argument payload, so higher-level code can pick a
//! typed payload while [`DynamicEmitter`] keeps the untyped, JSON-valued form.

mod emitter;
mod error;
mod key;
mod listener;

pub use self::emitter::{DynamicEmitter, EventEmitter};
pub use self::error::{ListenerKind, ListenerLimitExceeded};
pub use self::key::{EventKey, Symbol};
pub use self::listener::{Args, Listener};
