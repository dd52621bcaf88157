//! Typed publish/subscribe channels for decoupling UI producers from the
//! viewer and from each other.
//!
//! A [`Channel`] notifies its listeners synchronously, in subscription order,
//! and retains nothing: subscribers only see publishes that happen after they
//! attach. A [`Latched`] channel additionally keeps the last published value
//! readable through [`Latched::current`], which is how application-wide
//! readiness flags (splash ready, globe init status, sidebar open state) are
//! modelled.
//!
//! Everything here is single-threaded by design; listeners run on the caller's
//! thread before `publish` returns.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Registry<T> {
    next_id: u64,
    entries: Vec<(u64, Listener<T>)>,
}

impl<T> Registry<T> {
    fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

/// A named, typed publish/subscribe stream.
pub struct Channel<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Channel<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry::new())),
        }
    }

    /// Registers `listener` for every subsequent publish.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// unsubscribed or dropped.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let entry: Listener<T> = Rc::new(listener);
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push((id, entry));
            id
        };

        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    registry.borrow_mut().entries.retain(|(e, _)| *e != id);
                }
            })),
        }
    }

    /// Synchronously notifies every listener registered before this call, in
    /// subscription order.
    ///
    /// Listeners that subscribe during the fan-out do not receive the
    /// in-flight value.
    pub fn publish(&self, value: T) {
        let snapshot: Vec<Listener<T>> = self
            .registry
            .borrow()
            .entries
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in snapshot {
            listener(&value);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().entries.len()
    }
}

/// Handle to an active channel subscription.
///
/// Unsubscribes when dropped. [`Subscription::unsubscribe`] may be called any
/// number of times; only the first has an effect.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

/// A channel whose last published value is treated as current truth.
///
/// Late subscribers still only see future publishes; they synchronize by
/// reading [`Latched::current`] at attach time.
pub struct Latched<T: Clone> {
    channel: Channel<T>,
    current: RefCell<Option<T>>,
}

impl<T: Clone + 'static> Default for Latched<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> Latched<T> {
    pub fn new() -> Self {
        Self {
            channel: Channel::new(),
            current: RefCell::new(None),
        }
    }

    /// Latches `value` before the fan-out so listeners observing
    /// [`Latched::current`] during notification already see it.
    pub fn publish(&self, value: T) {
        *self.current.borrow_mut() = Some(value.clone());
        self.channel.publish(value);
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        self.channel.subscribe(listener)
    }

    /// Last published value, or `None` if nothing was published yet.
    pub fn current(&self) -> Option<T> {
        self.current.borrow().clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.channel.subscriber_count()
    }
}
