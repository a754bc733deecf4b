//! In-process event plumbing for the single-threaded navigation protocol:
//! subscriber lists with RAII teardown and a distinct-until-changed value.

use std::cell::RefCell;
use std::rc::Rc;

type Handler<T> = Rc<RefCell<dyn FnMut(&T)>>;
type MutHandler<T> = Rc<RefCell<dyn FnMut(&mut T)>>;

struct Slots<H> {
    entries: Vec<(u64, H)>,
    next_id: u64,
}

impl<H> Default for Slots<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<H> Slots<H> {
    fn insert(&mut self, handler: H) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, handler));
        id
    }
}

fn detach_on_drop<H: 'static>(slots: &Rc<RefCell<Slots<H>>>, id: u64) -> Subscription {
    let weak = Rc::downgrade(slots);
    Subscription {
        detach: Some(Box::new(move || {
            if let Some(slots) = weak.upgrade() {
                slots.borrow_mut().entries.retain(|(slot_id, _)| *slot_id != id);
            }
        })),
    }
}

/// Keeps a subscription alive; dropping it detaches the handler.
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

/// Multicast stream of borrowed values.
pub struct Subject<T> {
    slots: Rc<RefCell<Slots<Handler<T>>>>,
}

impl<T> Default for Subject<T> {
    fn default() -> Self {
        Self {
            slots: Rc::default(),
        }
    }
}

impl<T> Clone for Subject<T> {
    /// Clones share the subscriber list.
    fn clone(&self) -> Self {
        Self {
            slots: Rc::clone(&self.slots),
        }
    }
}

impl<T: 'static> Subject<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: impl FnMut(&T) + 'static) -> Subscription {
        let id = self
            .slots
            .borrow_mut()
            .insert(Rc::new(RefCell::new(handler)));
        detach_on_drop(&self.slots, id)
    }

    pub fn emit(&self, value: &T) {
        // Snapshot so handlers may subscribe/unsubscribe while running.
        let handlers: Vec<Handler<T>> = {
            let slots = self.slots.borrow();
            slots.entries.iter().map(|(_, h)| Rc::clone(h)).collect()
        };
        for handler in handlers {
            (handler.borrow_mut())(value);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.slots.borrow().entries.len()
    }
}

/// Multicast stream whose handlers may mutate the value, used for the
/// vetoable navigating phase.
pub struct MutSubject<T> {
    slots: Rc<RefCell<Slots<MutHandler<T>>>>,
}

impl<T> Default for MutSubject<T> {
    fn default() -> Self {
        Self {
            slots: Rc::default(),
        }
    }
}

impl<T: 'static> MutSubject<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: impl FnMut(&mut T) + 'static) -> Subscription {
        let id = self
            .slots
            .borrow_mut()
            .insert(Rc::new(RefCell::new(handler)));
        detach_on_drop(&self.slots, id)
    }

    pub fn emit(&self, value: &mut T) {
        let handlers: Vec<MutHandler<T>> = {
            let slots = self.slots.borrow();
            slots.entries.iter().map(|(_, h)| Rc::clone(h)).collect()
        };
        for handler in handlers {
            (handler.borrow_mut())(value);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.slots.borrow().entries.len()
    }
}

/// Observable value that only notifies on actual change.
pub struct ObservableValue<T> {
    value: RefCell<T>,
    changed: Subject<T>,
}

impl<T: Clone + PartialEq + 'static> ObservableValue<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: RefCell::new(initial),
            changed: Subject::new(),
        }
    }

    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    pub fn set(&self, next: T) {
        {
            let mut value = self.value.borrow_mut();
            if *value == next {
                return;
            }
            *value = next.clone();
        }
        self.changed.emit(&next);
    }

    pub fn subscribe(&self, handler: impl FnMut(&T) + 'static) -> Subscription {
        self.changed.subscribe(handler)
    }
}

/// Subscription arena scoped to the currently displayed view.
///
/// The host installs a fresh bag on every committed navigation; dropping
/// the previous bag releases everything the outgoing view registered.
#[derive(Default)]
pub struct ScopeBag {
    subscriptions: Vec<Subscription>,
}

impl ScopeBag {
    pub fn insert(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{ObservableValue, ScopeBag, Subject};

    #[test]
    fn dropping_a_subscription_detaches_the_handler() {
        let subject = Subject::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let subscription = subject.subscribe(move |value| sink.borrow_mut().push(*value));
        subject.emit(&1);
        assert_eq!(subject.subscriber_count(), 1);

        drop(subscription);
        subject.emit(&2);

        assert_eq!(*seen.borrow(), vec![1]);
        assert_eq!(subject.subscriber_count(), 0);
    }

    #[test]
    fn observable_value_skips_unchanged_emissions() {
        let value = ObservableValue::new(false);
        let emissions = Rc::new(RefCell::new(0usize));

        let sink = Rc::clone(&emissions);
        let _subscription = value.subscribe(move |_| *sink.borrow_mut() += 1);

        value.set(false);
        value.set(true);
        value.set(true);
        value.set(false);

        assert_eq!(*emissions.borrow(), 2);
        assert!(!value.get());
    }

    #[test]
    fn scope_bag_drop_releases_held_subscriptions() {
        let subject = Subject::<u32>::new();
        let mut scope = ScopeBag::default();
        scope.insert(subject.subscribe(|_| {}));
        scope.insert(subject.subscribe(|_| {}));
        assert_eq!(scope.len(), 2);
        assert_eq!(subject.subscriber_count(), 2);

        drop(scope);
        assert_eq!(subject.subscriber_count(), 0);
    }

    #[test]
    fn handler_may_unsubscribe_itself_during_emit() {
        let subject = Subject::<u32>::new();
        let slot: Rc<RefCell<Option<super::Subscription>>> = Rc::new(RefCell::new(None));

        let own = Rc::clone(&slot);
        let subscription = subject.subscribe(move |_| {
            own.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(subscription);

        subject.emit(&1);
        assert_eq!(subject.subscriber_count(), 0);
    }
}
