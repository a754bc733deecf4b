use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::event::{NavigatedEvent, NavigatingEvent};
use crate::subjects::ScopeBag;

/// Identity of a view-model type.
///
/// Back-stacks store these rather than instances: back-navigation asks the
/// service locator for a fresh instance of the recorded type. The key also
/// routes view interception hooks.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewModelKey {
    type_id: TypeId,
    type_name: &'static str,
}

impl ViewModelKey {
    pub fn of<VM: Any>() -> Self {
        Self {
            type_id: TypeId::of::<VM>(),
            type_name: std::any::type_name::<VM>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Last path segment of the type name, for display.
    pub fn short_name(&self) -> &'static str {
        self.type_name.rsplit("::").next().unwrap_or(self.type_name)
    }
}

impl fmt::Debug for ViewModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ViewModelKey({})", self.short_name())
    }
}

impl fmt::Display for ViewModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Navigation-lifecycle capability of a view-model.
///
/// All hooks default to no-ops; a view-model implements only the phases it
/// cares about. `when_navigating` runs while the transition is still
/// vetoable; the navigated pair runs after commit.
pub trait NavViewModel: Any {
    /// Identity used for back-stack entries and hook routing. Implement as
    /// `ViewModelKey::of::<Self>()`.
    fn key(&self) -> ViewModelKey;

    fn when_navigating(&mut self, event: &mut NavigatingEvent) {
        let _ = event;
    }

    fn when_navigated_to(&mut self, event: &NavigatedEvent, scope: &mut ScopeBag) {
        let _ = (event, scope);
    }

    fn when_navigated_from(&mut self, event: &NavigatedEvent) {
        let _ = event;
    }
}

/// Non-owning handle to a view-model. The service locator owns the
/// instances; hosts and events hold these shared references.
pub type SharedViewModel = Rc<RefCell<dyn NavViewModel>>;
