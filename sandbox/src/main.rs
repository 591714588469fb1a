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

// Herald Sandbox
// Walks through the registry: persistent and one-shot listeners, removal,
// the listener-leak warning and re-entrant emission.
//
// Usage: sandbox [config.toml]

use std::rc::Rc;

use anyhow::{Context, Result};
use herald_core::event::{Args, DynamicEmitter, EventKey, Listener, Symbol};
use herald_core::EmitterConfig;
use serde_json::json;

fn load_config() -> Result<EmitterConfig> {
    match std::env::args().nth(1) {
        Some(path) => EmitterConfig::from_toml_file(&path)
            .with_context(|| format!("loading emitter config from {path}")),
        None => Ok(EmitterConfig::default()),
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    log::info!("Starting sandbox with max listeners = {}.", config.max_listeners);
    let emitter = Rc::new(DynamicEmitter::with_config(config));

    let greeter = Listener::from_fn(|args: &Args| log::info!("greeter received {args:?}"));
    emitter.on("greet".into(), greeter.clone())?;
    emitter.once(
        "greet".into(),
        Listener::from_fn(|_: &Args| log::info!("one-shot greeter fired")),
    )?;

    emitter.emit(&"greet".into(), &[json!("hello"), json!(1)])?;
    emitter.emit(&"greet".into(), &[json!("again")])?;

    emitter.off(&"greet".into(), &greeter);
    let delivered = emitter.emit(&"greet".into(), &[])?;
    log::info!("Emit after removal delivered: {delivered}");

    // A one-shot listener with no persistent sibling stays pending.
    let orphan = Symbol::new("orphan");
    emitter.once(
        orphan.clone().into(),
        Listener::from_fn(|_: &Args| log::info!("orphan fired")),
    )?;
    let delivered = emitter.emit(&EventKey::from(orphan.clone()), &[])?;
    log::info!(
        "Emit of {orphan} delivered: {delivered} ({} pending)",
        emitter.listener_count(&orphan.clone().into())
    );

    // Re-entrant emission: a one-shot listener re-emits its own event.
    let weak = Rc::downgrade(&emitter);
    emitter.on(
        "tick".into(),
        Listener::from_fn(|args: &Args| log::info!("tick {args:?}")),
    )?;
    emitter.once(
        "tick".into(),
        Listener::new(move |_: &Args| {
            if let Some(emitter) = weak.upgrade() {
                emitter.emit(&"tick".into(), &[json!("from once")])?;
            }
            Ok(())
        }),
    )?;
    emitter.emit(&"tick".into(), &[json!("outer")])?;

    // Crossing the threshold is reported, but the listener is kept.
    emitter.set_max_listeners(2);
    for i in 0..3 {
        if let Err(e) = emitter.on(
            "crowded".into(),
            Listener::from_fn(move |_: &Args| log::debug!("crowded listener {i}")),
        ) {
            log::warn!("{e}");
        }
    }
    log::info!(
        "'crowded' has {} listeners; events: {:?}",
        emitter.listener_count(&"crowded".into()),
        emitter.event_names()
    );

    emitter.remove_all_listeners(&[]);
    log::info!("Registry empty after clear: {}", emitter.is_empty());
    Ok(())
}
