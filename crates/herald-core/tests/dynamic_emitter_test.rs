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

use herald_core::event::{Args, DynamicEmitter, EventKey, Listener, Symbol};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;

fn capture(into: &Rc<RefCell<Vec<Vec<Value>>>>) -> Listener<Args> {
    let into = Rc::clone(into);
    Listener::from_fn(move |args: &Args| into.borrow_mut().push(args.to_vec()))
}

#[test]
fn dynamic_emitter_delivers_variadic_arguments() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let emitter = DynamicEmitter::new();
    emitter.on("data".into(), capture(&seen)).unwrap();

    emitter.emit(&"data".into(), &[]).unwrap();
    emitter
        .emit(&"data".into(), &[json!(1), json!("two"), json!({ "three": 3 })])
        .unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![vec![], vec![json!(1), json!("two"), json!({ "three": 3 })]]
    );
}

#[test]
fn symbol_keys_do_not_collide_with_names() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let emitter = DynamicEmitter::new();
    let ready = Symbol::new("ready");
    emitter.on(ready.clone().into(), capture(&seen)).unwrap();
    emitter.on("ready".into(), capture(&seen)).unwrap();

    assert!(emitter.emit(&EventKey::from(ready.clone()), &[json!(true)]).unwrap());
    assert_eq!(seen.borrow().len(), 1);

    assert!(!emitter.emit(&EventKey::from(Symbol::new("ready")), &[]).unwrap());
    assert_eq!(
        emitter.event_names(),
        vec![EventKey::from(ready), EventKey::from("ready")]
    );
}

#[test]
fn limit_error_names_the_event() {
    let emitter = DynamicEmitter::new();
    emitter.set_max_listeners(0);

    let err = emitter
        .once("close".into(), Listener::from_fn(|_: &Args| {}))
        .unwrap_err();

    assert_eq!(err.event, EventKey::from("close"));
    assert!(err.to_string().contains("'close'"));
    assert_eq!(emitter.listener_count(&"close".into()), 1);
}
