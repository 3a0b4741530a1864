//! Process-wide registry of live components
//!
//! Introspection only: components register by name on construction and the
//! returned guard removes them again when the owner is dropped.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, OnceLock};

static REGISTRY: OnceLock<Mutex<BTreeMap<&'static str, usize>>> = OnceLock::new();

fn table() -> MutexGuard<'static, BTreeMap<&'static str, usize>> {
    // Counters stay valid across a poisoning panic
    REGISTRY
        .get_or_init(|| Mutex::new(BTreeMap::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Live registration, released on drop
#[derive(Debug)]
pub struct Registration {
    name: &'static str,
}

impl Registration {
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        let mut entries = table();
        if let Some(count) = entries.get_mut(self.name) {
            *count -= 1;
            if *count == 0 {
                entries.remove(self.name);
            }
        }
        log::trace!("Unregistered {}", self.name);
    }
}

/// Register one live instance of `name`
pub fn register(name: &'static str) -> Registration {
    *table().entry(name).or_insert(0) += 1;
    log::trace!("Registered {}", name);
    Registration { name }
}

/// Number of live instances registered under `name`
pub fn count(name: &str) -> usize {
    table().get(name).copied().unwrap_or(0)
}

pub fn is_registered(name: &str) -> bool {
    count(name) > 0
}

/// Names with at least one live instance, sorted
pub fn registered_names() -> Vec<&'static str> {
    table().keys().copied().collect()
}
