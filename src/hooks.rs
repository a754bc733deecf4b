//! Per-view-model interception channels.
//!
//! A view that wants to observe navigation aimed at its view-model
//! subscribes here instead of having the host call the view-model's
//! lifecycle hooks. Handler presence is the opt-in flag: while a channel
//! has subscribers, the protocol routes that phase through it and skips
//! the direct view-model callback.

use std::collections::HashMap;

use crate::event::{NavigatedEvent, NavigatingEvent};
use crate::subjects::{MutSubject, Subject, Subscription};
use crate::viewmodel::ViewModelKey;

#[derive(Default)]
struct HookSet {
    navigating: MutSubject<NavigatingEvent>,
    navigated_to: Subject<NavigatedEvent>,
    navigated_from: Subject<NavigatedEvent>,
}

#[derive(Default)]
pub struct ViewHookTable {
    sets: HashMap<ViewModelKey, HookSet>,
}

impl ViewHookTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn when_navigating(
        &mut self,
        key: ViewModelKey,
        handler: impl FnMut(&mut NavigatingEvent) + 'static,
    ) -> Subscription {
        self.sets.entry(key).or_default().navigating.subscribe(handler)
    }

    pub fn when_navigated_to(
        &mut self,
        key: ViewModelKey,
        handler: impl FnMut(&NavigatedEvent) + 'static,
    ) -> Subscription {
        self.sets
            .entry(key)
            .or_default()
            .navigated_to
            .subscribe(handler)
    }

    pub fn when_navigated_from(
        &mut self,
        key: ViewModelKey,
        handler: impl FnMut(&NavigatedEvent) + 'static,
    ) -> Subscription {
        self.sets
            .entry(key)
            .or_default()
            .navigated_from
            .subscribe(handler)
    }

    pub fn intercepts_navigating(&self, key: ViewModelKey) -> bool {
        self.sets
            .get(&key)
            .is_some_and(|set| set.navigating.subscriber_count() > 0)
    }

    pub fn intercepts_navigated_to(&self, key: ViewModelKey) -> bool {
        self.sets
            .get(&key)
            .is_some_and(|set| set.navigated_to.subscriber_count() > 0)
    }

    pub fn intercepts_navigated_from(&self, key: ViewModelKey) -> bool {
        self.sets
            .get(&key)
            .is_some_and(|set| set.navigated_from.subscriber_count() > 0)
    }

    pub(crate) fn run_navigating(&self, key: ViewModelKey, event: &mut NavigatingEvent) {
        if let Some(set) = self.sets.get(&key) {
            set.navigating.emit(event);
        }
    }

    pub(crate) fn notify_navigated_to(&self, key: ViewModelKey, event: &NavigatedEvent) {
        if let Some(set) = self.sets.get(&key) {
            set.navigated_to.emit(event);
        }
    }

    pub(crate) fn notify_navigated_from(&self, key: ViewModelKey, event: &NavigatedEvent) {
        if let Some(set) = self.sets.get(&key) {
            set.navigated_from.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::event::{NavigatedEvent, NavigationKind};
    use crate::viewmodel::{NavViewModel, SharedViewModel, ViewModelKey};

    use super::ViewHookTable;

    struct ProbeViewModel;

    struct UnrelatedViewModel;

    impl NavViewModel for ProbeViewModel {
        fn key(&self) -> ViewModelKey {
            ViewModelKey::of::<Self>()
        }
    }

    fn shared_probe() -> SharedViewModel {
        Rc::new(RefCell::new(ProbeViewModel))
    }

    fn navigated(to: SharedViewModel) -> NavigatedEvent {
        let to_key = to.borrow().key();
        NavigatedEvent {
            from: None,
            from_key: None,
            to_key,
            to,
            kind: NavigationKind::New,
            host_name: "main".to_string(),
            parameter: None,
        }
    }

    #[test]
    fn opt_in_flag_follows_subscription_lifetime() {
        let mut hooks = ViewHookTable::new();
        let key = ViewModelKey::of::<ProbeViewModel>();
        assert!(!hooks.intercepts_navigated_to(key));

        let notified = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&notified);
        let subscription = hooks.when_navigated_to(key, move |_| *sink.borrow_mut() += 1);
        assert!(hooks.intercepts_navigated_to(key));

        hooks.notify_navigated_to(key, &navigated(shared_probe()));
        assert_eq!(*notified.borrow(), 1);

        drop(subscription);
        assert!(!hooks.intercepts_navigated_to(key));
        hooks.notify_navigated_to(key, &navigated(shared_probe()));
        assert_eq!(*notified.borrow(), 1);
    }

    #[test]
    fn hooks_for_one_key_do_not_fire_for_another() {
        let mut hooks = ViewHookTable::new();
        let probe_key = ViewModelKey::of::<ProbeViewModel>();
        let other_key = ViewModelKey::of::<UnrelatedViewModel>();

        let notified = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&notified);
        let _subscription = hooks.when_navigated_from(probe_key, move |_| *sink.borrow_mut() += 1);

        assert!(!hooks.intercepts_navigated_from(other_key));
        hooks.notify_navigated_from(other_key, &navigated(shared_probe()));
        assert_eq!(*notified.borrow(), 0);
    }
}
