//! Observable value holder
//!
//! A `Property` stores a value plus an ordered list of listeners. Writes that
//! leave the value unchanged are ignored. Listeners are called with
//! `(new, old)` in the order they subscribed.
//!
//! Composite owners use the two-phase `replace` / `notify` pair so that every
//! related value is written before any listener runs.

use std::fmt;

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Change callback, receives `(new, old)`
pub type Listener<T> = Box<dyn FnMut(&T, &T) + Send>;

pub struct Property<T> {
    value: T,
    initial: T,
    listeners: Vec<(ListenerId, Listener<T>)>,
    next_id: u64,
}

impl<T: Clone + PartialEq> Property<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: initial.clone(),
            initial,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Value restored by `reset`
    pub fn initial(&self) -> &T {
        &self.initial
    }

    /// Set the value and notify listeners.
    /// Returns true if the value changed.
    pub fn set(&mut self, value: T) -> bool {
        match self.replace(value) {
            Some(old) => {
                self.notify(&old);
                true
            }
            None => false,
        }
    }

    /// Restore the initial value, notifying only on an actual change
    pub fn reset(&mut self) -> bool {
        let initial = self.initial.clone();
        self.set(initial)
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&T, &T) + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if the id was not subscribed here.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Store a value without notifying.
    /// Returns the previous value if it changed.
    pub(crate) fn replace(&mut self, value: T) -> Option<T> {
        if self.value == value {
            return None;
        }
        Some(std::mem::replace(&mut self.value, value))
    }

    /// Deliver a change notification for the current value
    pub(crate) fn notify(&mut self, old: &T) {
        let new = &self.value;
        for (_, listener) in self.listeners.iter_mut() {
            listener(new, old);
        }
    }
}

impl<T: Clone + PartialEq + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.value)
            .field("initial", &self.initial)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
