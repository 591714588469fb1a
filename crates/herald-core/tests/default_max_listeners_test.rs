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

//! The process-wide default is global state, so it gets a test binary of its own.

use herald_core::config::{
    default_max_listeners, set_default_max_listeners, EmitterConfig, DEFAULT_MAX_LISTENERS,
};
use herald_core::event::EventEmitter;

#[test]
fn default_is_read_at_construction_only() {
    assert_eq!(default_max_listeners(), DEFAULT_MAX_LISTENERS);
    let before: EventEmitter<&str, ()> = EventEmitter::new();

    set_default_max_listeners(3);
    let after: EventEmitter<&str, ()> = EventEmitter::new();

    assert_eq!(before.max_listeners(), DEFAULT_MAX_LISTENERS);
    assert_eq!(after.max_listeners(), 3);
    assert_eq!(EmitterConfig::default().max_listeners, 3);

    // Instances own their threshold from then on.
    after.set_max_listeners(7);
    assert_eq!(default_max_listeners(), 3);
    assert_eq!(before.max_listeners(), DEFAULT_MAX_LISTENERS);
}
