//! Single observable value, the live counterpart of a plain field.

use super::{LiveHub, Subscription};
use parking_lot::Mutex;
use std::convert::Infallible;

/// A value with replay-on-subscribe semantics.
///
/// Writers replace the whole value; subscribers get the value current at
/// subscription time and then every replacement in order.
pub struct LiveValue<T> {
    current: Mutex<T>,
    hub: LiveHub<(), T>,
}

impl<T> LiveValue<T>
where
    T: Clone + Send + 'static,
{
    pub fn new(initial: T) -> Self {
        Self {
            current: Mutex::new(initial),
            hub: LiveHub::new(),
        }
    }

    pub fn get(&self) -> T {
        self.current.lock().clone()
    }

    /// Replaces the value and notifies subscribers.
    pub fn set(&self, value: T) {
        let mut current = self.current.lock();
        *current = value;
        let snapshot = current.clone();
        let _ = self.hub.publish(|_| Ok::<_, Infallible>(snapshot.clone()));
    }

    /// Applies `update` to the current value atomically and returns the
    /// new value.
    pub fn update(&self, update: impl FnOnce(&T) -> T) -> T {
        let mut current = self.current.lock();
        *current = update(&*current);
        let snapshot = current.clone();
        let _ = self.hub.publish(|_| Ok::<_, Infallible>(snapshot.clone()));
        snapshot
    }

    pub fn subscribe(&self) -> Subscription<T> {
        let current = self.current.lock();
        self.hub.subscribe((), &*current, T::clone)
    }
}
