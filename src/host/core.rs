use crate::config::HostConfig;
use crate::error::{NavError, NavResult};
use crate::event::{
    NavParameter, NavigatedEvent, NavigatingEvent, NavigationKind, NavigationOutcome,
};
use crate::hooks::ViewHookTable;
use crate::locator::{ServiceLocator, ViewLocator};
use crate::subjects::{ObservableValue, ScopeBag, Subject};
use crate::view::{BoxedView, ContentHost};
use crate::viewmodel::{NavViewModel, SharedViewModel, ViewModelKey};

use super::stack::NavigationStack;

/// Collaborators a navigation operation runs against.
///
/// The host itself is a pure state machine; locators, interception hooks
/// and the toolkit surface are handed in per call, the way the registry
/// wires them.
pub struct NavContext<'a> {
    pub services: &'a dyn ServiceLocator,
    pub views: &'a dyn ViewLocator,
    pub hooks: &'a ViewHookTable,
    pub content: &'a mut dyn ContentHost,
}

/// One named navigation host: owns a back-stack of view-model types,
/// runs the navigating/navigated protocol, and drives a [`ContentHost`]
/// surface.
pub struct NavigationHost {
    name: String,
    config: HostConfig,
    stack: NavigationStack,
    current: Option<SharedViewModel>,
    pending_view: Option<BoxedView>,
    view_scope: ScopeBag,
    navigated: Subject<NavigatedEvent>,
    can_navigate_back: ObservableValue<bool>,
    reset_requested: bool,
    ready: bool,
}

impl NavigationHost {
    pub fn new(name: impl Into<String>, config: HostConfig) -> Self {
        let stack = NavigationStack::with_capacity(config.history_capacity);
        Self {
            name: name.into(),
            config,
            stack,
            current: None,
            pending_view: None,
            view_scope: ScopeBag::default(),
            navigated: Subject::new(),
            can_navigate_back: ObservableValue::new(false),
            reset_requested: false,
            ready: false,
        }
    }

    /// Must run once before the first navigation. Fails fast when the
    /// host has no usable name.
    pub fn setup(&mut self) -> NavResult<()> {
        if self.name.trim().is_empty() {
            return Err(NavError::HostNameEmpty);
        }
        self.ready = true;
        log::debug!("navigation host {:?} set up", self.name);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    pub fn current_view_model(&self) -> Option<SharedViewModel> {
        self.current.clone()
    }

    pub fn navigate_back_enabled(&self) -> bool {
        self.config.navigate_back_enabled
    }

    pub fn can_navigate_back(&self) -> bool {
        self.stack.len() > 1
    }

    /// Distinct-until-changed view of [`can_navigate_back`](Self::can_navigate_back),
    /// republished after every attempt.
    pub fn can_navigate_back_changes(&self) -> &ObservableValue<bool> {
        &self.can_navigate_back
    }

    /// Stream of committed transitions on this host.
    pub fn navigated_events(&self) -> &Subject<NavigatedEvent> {
        &self.navigated
    }

    pub fn navigate<VM: NavViewModel>(
        &mut self,
        ctx: &mut NavContext<'_>,
        contract: Option<&str>,
        parameter: Option<NavParameter>,
    ) -> NavResult<NavigationOutcome> {
        self.navigate_to_key(ctx, ViewModelKey::of::<VM>(), contract, parameter)
    }

    pub fn navigate_to_key(
        &mut self,
        ctx: &mut NavContext<'_>,
        target: ViewModelKey,
        contract: Option<&str>,
        parameter: Option<NavParameter>,
    ) -> NavResult<NavigationOutcome> {
        self.ensure_ready()?;
        self.run_protocol(ctx, target, contract, parameter, NavigationKind::New)
    }

    /// Like [`navigate`](Self::navigate), but a commit replaces the whole
    /// back-stack with the new entry.
    pub fn navigate_and_reset<VM: NavViewModel>(
        &mut self,
        ctx: &mut NavContext<'_>,
        contract: Option<&str>,
        parameter: Option<NavParameter>,
    ) -> NavResult<NavigationOutcome> {
        self.navigate_and_reset_key(ctx, ViewModelKey::of::<VM>(), contract, parameter)
    }

    pub fn navigate_and_reset_key(
        &mut self,
        ctx: &mut NavContext<'_>,
        target: ViewModelKey,
        contract: Option<&str>,
        parameter: Option<NavParameter>,
    ) -> NavResult<NavigationOutcome> {
        self.ensure_ready()?;
        self.reset_requested = true;
        self.run_protocol(ctx, target, contract, parameter, NavigationKind::New)
    }

    /// Navigate to the previous back-stack entry. Resolves a fresh
    /// instance of the recorded type; whether that is the same object the
    /// user left is the service locator's registration choice.
    pub fn navigate_back(
        &mut self,
        ctx: &mut NavContext<'_>,
        parameter: Option<NavParameter>,
    ) -> NavResult<NavigationOutcome> {
        self.ensure_ready()?;
        if !self.config.navigate_back_enabled {
            log::debug!("host {:?}: back-navigation is disabled", self.name);
            return Ok(NavigationOutcome::Ignored);
        }
        let Some(target) = self.stack.back_target() else {
            log::debug!("host {:?}: nothing to navigate back to", self.name);
            return Ok(NavigationOutcome::Ignored);
        };
        self.run_protocol(ctx, target, None, parameter, NavigationKind::Back)
    }

    /// Empty the back-stack. No protocol runs and the displayed content
    /// is untouched.
    pub fn clear_history(&mut self) {
        self.stack.clear();
        self.publish_can_navigate_back();
        log::debug!("host {:?}: history cleared", self.name);
    }

    /// Re-attach pending content to an empty surface, and apply the
    /// cleanup policy of hosts that disabled back-navigation.
    pub fn refresh(&mut self, ctx: &mut NavContext<'_>) -> NavResult<()> {
        self.ensure_ready()?;
        if !ctx.content.has_content()
            && let Some(view) = self.pending_view.take()
        {
            match ctx.content.show_content(view) {
                Ok(()) => {
                    log::debug!("host {:?}: re-attached pending content", self.name);
                    if let Some(current) = self.current.clone() {
                        let to_key = current.borrow().key();
                        self.navigated.emit(&NavigatedEvent {
                            from: None,
                            from_key: None,
                            to: current,
                            to_key,
                            kind: NavigationKind::Refresh,
                            host_name: self.name.clone(),
                            parameter: None,
                        });
                    }
                }
                Err(view) => self.pending_view = Some(view),
            }
        }
        if !self.config.navigate_back_enabled {
            self.stack.truncate_to_last();
            self.publish_can_navigate_back();
        }
        Ok(())
    }

    fn run_protocol(
        &mut self,
        ctx: &mut NavContext<'_>,
        target: ViewModelKey,
        contract: Option<&str>,
        parameter: Option<NavParameter>,
        kind: NavigationKind,
    ) -> NavResult<NavigationOutcome> {
        let Some(to) = ctx.services.resolve(target, contract) else {
            log::debug!(
                "host {:?}: no service registration for {target}, navigation ignored",
                self.name
            );
            self.publish_can_navigate_back();
            self.reset_requested = false;
            return Ok(NavigationOutcome::Ignored);
        };
        let resolved_view = ctx.views.resolve_view(&to, contract);
        if resolved_view.is_none() {
            log::debug!("host {:?}: no view resolved for {target}", self.name);
        }

        let from = self.current.clone();
        let from_key = from.as_ref().map(|vm| vm.borrow().key());

        let mut event = NavigatingEvent {
            from,
            from_key,
            to: Some(to),
            to_key: target,
            kind,
            host_name: self.name.clone(),
            parameter,
            cancel: false,
            resolved_view,
        };

        // Navigating phase: a view subscribed to either endpoint's hook
        // takes the event; only when neither opted in does the outgoing
        // view-model observe it directly.
        let from_intercepted = from_key.is_some_and(|key| ctx.hooks.intercepts_navigating(key));
        let to_intercepted =
            from_key != Some(target) && ctx.hooks.intercepts_navigating(target);
        if from_intercepted && let Some(key) = from_key {
            ctx.hooks.run_navigating(key, &mut event);
        }
        if to_intercepted && !event.cancel {
            ctx.hooks.run_navigating(target, &mut event);
        }
        if !from_intercepted
            && !to_intercepted
            && let Some(vm) = event.from.clone()
        {
            vm.borrow_mut().when_navigating(&mut event);
        }

        if event.cancel {
            log::debug!(
                "host {:?}: navigation to {target} cancelled during navigating phase",
                self.name
            );
            self.publish_can_navigate_back();
            self.reset_requested = false;
            return Ok(NavigationOutcome::Cancelled);
        }

        self.commit(ctx, event)
    }

    fn commit(
        &mut self,
        ctx: &mut NavContext<'_>,
        event: NavigatingEvent,
    ) -> NavResult<NavigationOutcome> {
        let NavigatingEvent {
            from,
            from_key,
            to,
            to_key,
            kind,
            parameter,
            resolved_view,
            ..
        } = event;
        let Some(to) = to else {
            self.reset_requested = false;
            return Ok(NavigationOutcome::Ignored);
        };

        match kind {
            NavigationKind::Back => {
                let left = self.stack.pop();
                log::trace!("host {:?}: popped {left:?} off the back-stack", self.name);
            }
            _ if self.reset_requested => self.stack.reset_to(to_key),
            _ => self.stack.push(to_key),
        }

        // The outgoing view's subscription scope dies here, before the new
        // content appears.
        self.view_scope = ScopeBag::default();

        if let Some(view) = resolved_view {
            match ctx.content.show_content(view) {
                Ok(()) => self.pending_view = None,
                Err(view) => {
                    log::trace!(
                        "host {:?}: surface refused content, keeping it pending",
                        self.name
                    );
                    self.pending_view = Some(view);
                }
            }
        }

        self.current = Some(to.clone());

        let navigated = NavigatedEvent {
            from: from.clone(),
            from_key,
            to: to.clone(),
            to_key,
            kind,
            host_name: self.name.clone(),
            parameter,
        };

        if let Some(key) = from_key {
            if ctx.hooks.intercepts_navigated_from(key) {
                ctx.hooks.notify_navigated_from(key, &navigated);
            } else if let Some(vm) = &from {
                vm.borrow_mut().when_navigated_from(&navigated);
            }
        }

        if ctx.hooks.intercepts_navigated_to(to_key) {
            ctx.hooks.notify_navigated_to(to_key, &navigated);
        } else {
            let mut scope = std::mem::take(&mut self.view_scope);
            to.borrow_mut().when_navigated_to(&navigated, &mut scope);
            self.view_scope = scope;
        }

        self.navigated.emit(&navigated);
        self.publish_can_navigate_back();
        self.reset_requested = false;

        log::debug!(
            "host {:?}: committed {kind:?} navigation to {to_key}, stack depth {}",
            self.name,
            self.stack.len()
        );
        Ok(NavigationOutcome::Committed)
    }

    fn publish_can_navigate_back(&self) {
        self.can_navigate_back.set(self.stack.len() > 1);
    }

    fn ensure_ready(&self) -> NavResult<()> {
        if !self.ready {
            return Err(NavError::host_not_ready(self.name.clone()));
        }
        Ok(())
    }
}
