//! View-model-driven navigation hosting.
//!
//! An application declares view-models and registers named hosts; the
//! library resolves view-model/view pairs through injected locators, runs
//! a cancellable navigating/navigated protocol, maintains a back-stack
//! per host, and swaps displayed content through a per-toolkit
//! [`ContentHost`] adapter. Rendering, layout and data binding stay with
//! the toolkit; this crate only owns the transition state machine.
//!
//! The usual wiring: build a [`NavigationRegistry`] at startup with a
//! [`ServiceLocator`] and [`ViewLocator`], register one [`ContentHost`]
//! surface per named host, then drive transitions through the registry's
//! name-routed façade (`navigate`, `navigate_and_reset`, `navigate_back`,
//! `clear_history`, `refresh`). Off-thread code raises navigation via the
//! registry's [`NavigationDispatcher`]; the UI thread drains it with
//! `pump`.

pub mod config;
pub mod error;
pub mod event;
pub mod hooks;
pub mod host;
pub mod locator;
pub mod registry;
pub mod subjects;
pub mod view;
pub mod viewmodel;

pub use config::{HostConfig, NavConfig};
pub use error::{NavError, NavResult};
pub use event::{
    NavParameter, NavigatedEvent, NavigatingEvent, NavigationKind, NavigationOutcome,
};
pub use hooks::ViewHookTable;
pub use host::{
    NavContext, NavigationDispatcher, NavigationHost, NavigationRequest, NavigationStack,
    SendParameter,
};
pub use locator::{ServiceLocator, ViewLocator};
pub use registry::NavigationRegistry;
pub use subjects::{MutSubject, ObservableValue, ScopeBag, Subject, Subscription};
pub use view::{BoxedView, ContentHost, View};
pub use viewmodel::{NavViewModel, SharedViewModel, ViewModelKey};
