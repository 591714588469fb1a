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

//! Defines the error reported when an event accumulates too many listeners.

use std::fmt;

/// Which of the two per-event lists an entry was added to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerKind {
    /// Listeners invoked on every emission until removed.
    Persistent,
    /// Listeners invoked on the next emission only.
    Once,
}

impl fmt::Display for ListenerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerKind::Persistent => f.write_str("persistent"),
            ListenerKind::Once => f.write_str("once"),
        }
    }
}

/// A list grew beyond the registry's max-listeners threshold.
///
/// This is a leak-detection signal, not a rejection: the listener that
/// triggered it has already been registered and stays registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerLimitExceeded<K> {
    /// The event whose list crossed the threshold.
    pub event: K,
    /// The length of that list after the insertion.
    pub count: usize,
    /// The threshold in force at the time of the insertion.
    pub max: usize,
    /// The list that crossed the threshold.
    pub kind: ListenerKind,
}

impl<K: fmt::Display> fmt::Display for ListenerLimitExceeded<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Possible listener leak detected: {} {} listeners added to '{}' (max is {}). \
             Use set_max_listeners() to increase the limit",
            self.count, self.kind, self.event, self.max
        )
    }
}

impl<K: fmt::Debug + fmt::Display> std::error::Error for ListenerLimitExceeded<K> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_event_and_counts() {
        let err = ListenerLimitExceeded {
            event: "data",
            count: 11,
            max: 10,
            kind: ListenerKind::Once,
        };
        assert_eq!(
            err.to_string(),
            "Possible listener leak detected: 11 once listeners added to 'data' (max is 10). \
             Use set_max_listeners() to increase the limit"
        );
    }

    #[test]
    fn test_converts_into_anyhow() {
        let err = ListenerLimitExceeded {
            event: "data",
            count: 2,
            max: 1,
            kind: ListenerKind::Persistent,
        };
        let wrapped: anyhow::Error = err.clone().into();
        assert_eq!(
            wrapped.downcast_ref::<ListenerLimitExceeded<&str>>(),
            Some(&err)
        );
    }
}
