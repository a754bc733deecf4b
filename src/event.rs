use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::view::BoxedView;
use crate::viewmodel::{SharedViewModel, ViewModelKey};

/// Opaque caller-supplied payload carried through a transition.
pub type NavParameter = Rc<dyn Any>;

/// Describes *why* a transition is happening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// Forward navigation to a new view-model.
    New,
    /// Back-stack traversal toward the previous entry.
    Back,
    /// Re-attachment of already-resolved content.
    Refresh,
}

/// How a navigation attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The transition committed: stack mutated, content swapped.
    Committed,
    /// A navigating handler vetoed the transition; nothing changed.
    Cancelled,
    /// The request could not proceed (resolution miss, guard failed);
    /// nothing changed.
    Ignored,
}

/// A proposed transition, mutable while the navigating phase runs.
///
/// Handlers may set `cancel` to veto the transition or replace
/// `resolved_view` to override what the view locator produced.
pub struct NavigatingEvent {
    pub from: Option<SharedViewModel>,
    pub from_key: Option<ViewModelKey>,
    pub to: Option<SharedViewModel>,
    pub to_key: ViewModelKey,
    pub kind: NavigationKind,
    pub host_name: String,
    pub parameter: Option<NavParameter>,
    pub cancel: bool,
    pub resolved_view: Option<BoxedView>,
}

impl fmt::Debug for NavigatingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigatingEvent")
            .field("from", &self.from_key)
            .field("to", &self.to_key)
            .field("kind", &self.kind)
            .field("host_name", &self.host_name)
            .field("cancel", &self.cancel)
            .finish_non_exhaustive()
    }
}

/// A completed transition, published once the navigating phase passed.
#[derive(Clone)]
pub struct NavigatedEvent {
    pub from: Option<SharedViewModel>,
    pub from_key: Option<ViewModelKey>,
    pub to: SharedViewModel,
    pub to_key: ViewModelKey,
    pub kind: NavigationKind,
    pub host_name: String,
    pub parameter: Option<NavParameter>,
}

impl fmt::Debug for NavigatedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigatedEvent")
            .field("from", &self.from_key)
            .field("to", &self.to_key)
            .field("kind", &self.kind)
            .field("host_name", &self.host_name)
            .finish_non_exhaustive()
    }
}
