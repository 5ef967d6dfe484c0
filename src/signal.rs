// src/signal.rs - Minimal callback list used for tool notifications

/// Ordered list of subscribers notified synchronously on `emit`
pub struct Signal<T> {
    slots: Vec<Box<dyn FnMut(&T)>>,
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Register a subscriber. Subscribers are called in registration order.
    pub fn connect<F>(&mut self, slot: F)
    where
        F: FnMut(&T) + 'static,
    {
        self.slots.push(Box::new(slot));
    }

    pub fn emit(&mut self, value: &T) {
        for slot in self.slots.iter_mut() {
            slot(value);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal").field("slots", &self.slots.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut signal = Signal::new();

        let first = Rc::clone(&log);
        signal.connect(move |v: &i32| first.borrow_mut().push(("first", *v)));
        let second = Rc::clone(&log);
        signal.connect(move |v: &i32| second.borrow_mut().push(("second", *v)));

        signal.emit(&7);

        assert_eq!(signal.len(), 2);
        assert_eq!(*log.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_emit_without_subscribers() {
        let mut signal: Signal<String> = Signal::default();
        assert!(signal.is_empty());
        signal.emit(&"nothing listens".to_string());
    }
}
