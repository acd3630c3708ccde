//! Ordered observer lists for paste events.
//!
//! Handlers run in registration order; a handler returning `false` stops
//! dispatch, and the dispatch result reports whether the chain ran to
//! completion. This replaces a string-keyed event dispatcher with an
//! explicit, typed callback list while keeping its ordering and
//! early-exit contract.

/// An ordered list of event handlers over a mutable event value.
pub struct Observers<E> {
    handlers: Vec<Box<dyn FnMut(&mut E) -> bool>>,
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Observers {
            handlers: Vec::new(),
        }
    }
}

impl<E> Observers<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler. Returning `false` from it cancels the rest of the
    /// chain for that dispatch.
    pub fn add(&mut self, handler: impl FnMut(&mut E) -> bool + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Run every handler in order. Returns `false` if a handler stopped the
    /// chain.
    pub fn dispatch(&mut self, event: &mut E) -> bool {
        for handler in &mut self.handlers {
            if !handler(event) {
                return false;
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
