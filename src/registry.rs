//! Name-keyed directory of navigation hosts.
//!
//! One registry per application, constructed at startup with the locator
//! collaborators and passed by reference to whatever needs host lookup.
//! It owns every host together with its toolkit surface, routes the
//! name-based navigation façade, and carries the view interception table
//! shared by all hosts.

use std::any::Any;
use std::rc::Rc;

use crate::config::HostConfig;
use crate::error::{NavError, NavResult};
use crate::event::{NavParameter, NavigatedEvent, NavigatingEvent, NavigationOutcome};
use crate::hooks::ViewHookTable;
use crate::host::{
    NavContext, NavigationDispatcher, NavigationHost, NavigationRequest, SendParameter,
};
use crate::locator::{ServiceLocator, ViewLocator};
use crate::subjects::Subscription;
use crate::view::ContentHost;
use crate::viewmodel::{NavViewModel, ViewModelKey};

struct HostEntry {
    host: NavigationHost,
    content: Box<dyn ContentHost>,
}

pub struct NavigationRegistry {
    services: Rc<dyn ServiceLocator>,
    views: Rc<dyn ViewLocator>,
    hooks: ViewHookTable,
    hosts: Vec<HostEntry>,
    dispatcher: NavigationDispatcher,
    requests: flume::Receiver<NavigationRequest>,
}

impl NavigationRegistry {
    pub fn new(services: Rc<dyn ServiceLocator>, views: Rc<dyn ViewLocator>) -> Self {
        let (dispatcher, requests) = crate::host::request_channel();
        Self {
            services,
            views,
            hooks: ViewHookTable::new(),
            hosts: Vec::new(),
            dispatcher,
            requests,
        }
    }

    /// Register a host under `name` and run its setup immediately.
    ///
    /// Registering a name twice keeps the existing host and logs the
    /// attempt; use [`unregister`](Self::unregister) first to replace one.
    pub fn register(
        &mut self,
        name: &str,
        config: HostConfig,
        content: Box<dyn ContentHost>,
    ) -> NavResult<()> {
        if name.trim().is_empty() {
            return Err(NavError::HostNameEmpty);
        }
        if self.index_of(name).is_some() {
            log::warn!("navigation host {name:?} is already registered, keeping the existing one");
            return Ok(());
        }
        let mut host = NavigationHost::new(name, config);
        host.setup()?;
        self.hosts.push(HostEntry { host, content });
        log::debug!("navigation host {name:?} registered");
        Ok(())
    }

    /// Drop a host, detaching its displayed content and releasing its
    /// pending view.
    pub fn unregister(&mut self, name: &str) -> bool {
        let Some(index) = self.index_of(name) else {
            return false;
        };
        let mut entry = self.hosts.remove(index);
        entry.content.clear_content();
        log::debug!("navigation host {name:?} unregistered");
        true
    }

    pub fn host(&self, name: &str) -> Option<&NavigationHost> {
        self.index_of(name).map(|index| &self.hosts[index].host)
    }

    pub fn host_names(&self) -> Vec<&str> {
        self.hosts.iter().map(|entry| entry.host.name()).collect()
    }

    /// `Send` handle for raising navigation from other threads; drained
    /// by [`pump`](Self::pump) on the owning thread.
    pub fn dispatcher(&self) -> NavigationDispatcher {
        self.dispatcher.clone()
    }

    pub fn navigate<VM: NavViewModel>(
        &mut self,
        host: &str,
        contract: Option<&str>,
        parameter: Option<NavParameter>,
    ) -> NavResult<NavigationOutcome> {
        self.navigate_to_key(host, ViewModelKey::of::<VM>(), contract, parameter)
    }

    pub fn navigate_to_key(
        &mut self,
        host: &str,
        target: ViewModelKey,
        contract: Option<&str>,
        parameter: Option<NavParameter>,
    ) -> NavResult<NavigationOutcome> {
        self.run_navigation(host, target, contract, parameter, false)
    }

    pub fn navigate_and_reset<VM: NavViewModel>(
        &mut self,
        host: &str,
        contract: Option<&str>,
        parameter: Option<NavParameter>,
    ) -> NavResult<NavigationOutcome> {
        self.run_navigation(host, ViewModelKey::of::<VM>(), contract, parameter, true)
    }

    pub fn navigate_back(
        &mut self,
        host: &str,
        parameter: Option<NavParameter>,
    ) -> NavResult<NavigationOutcome> {
        let services = Rc::clone(&self.services);
        let views = Rc::clone(&self.views);
        let index = self.lookup(host)?;
        let outcome = {
            let entry = &mut self.hosts[index];
            let mut ctx = NavContext {
                services: services.as_ref(),
                views: views.as_ref(),
                hooks: &self.hooks,
                content: entry.content.as_mut(),
            };
            entry.host.navigate_back(&mut ctx, parameter)?
        };
        if outcome == NavigationOutcome::Committed {
            // Another host's displayed content may reference navigation
            // state that just changed.
            self.refresh_others(index);
        }
        Ok(outcome)
    }

    pub fn clear_history(&mut self, host: &str) -> NavResult<()> {
        let index = self.lookup(host)?;
        self.hosts[index].host.clear_history();
        Ok(())
    }

    pub fn refresh(&mut self, host: &str) -> NavResult<()> {
        let services = Rc::clone(&self.services);
        let views = Rc::clone(&self.views);
        let index = self.lookup(host)?;
        let entry = &mut self.hosts[index];
        let mut ctx = NavContext {
            services: services.as_ref(),
            views: views.as_ref(),
            hooks: &self.hooks,
            content: entry.content.as_mut(),
        };
        entry.host.refresh(&mut ctx)
    }

    /// Drain queued dispatcher requests in FIFO order. Returns how many
    /// were executed. Failures are logged and dropped; a queued request
    /// has nobody left to hand an error to.
    pub fn pump(&mut self) -> usize {
        let drained: Vec<NavigationRequest> = self.requests.try_iter().collect();
        let count = drained.len();
        for request in drained {
            self.execute(request);
        }
        count
    }

    /// Subscribe a handler to the vetoable navigating phase of
    /// transitions leaving `VM`. While any such handler is live, the
    /// protocol routes through it instead of `VM::when_navigating`.
    pub fn when_navigating<VM: NavViewModel>(
        &mut self,
        handler: impl FnMut(&mut NavigatingEvent) + 'static,
    ) -> Subscription {
        self.hooks.when_navigating(ViewModelKey::of::<VM>(), handler)
    }

    pub fn when_navigated_to<VM: NavViewModel>(
        &mut self,
        handler: impl FnMut(&NavigatedEvent) + 'static,
    ) -> Subscription {
        self.hooks
            .when_navigated_to(ViewModelKey::of::<VM>(), handler)
    }

    pub fn when_navigated_from<VM: NavViewModel>(
        &mut self,
        handler: impl FnMut(&NavigatedEvent) + 'static,
    ) -> Subscription {
        self.hooks
            .when_navigated_from(ViewModelKey::of::<VM>(), handler)
    }

    fn run_navigation(
        &mut self,
        host: &str,
        target: ViewModelKey,
        contract: Option<&str>,
        parameter: Option<NavParameter>,
        reset: bool,
    ) -> NavResult<NavigationOutcome> {
        let services = Rc::clone(&self.services);
        let views = Rc::clone(&self.views);
        let index = self.lookup(host)?;
        let entry = &mut self.hosts[index];
        let mut ctx = NavContext {
            services: services.as_ref(),
            views: views.as_ref(),
            hooks: &self.hooks,
            content: entry.content.as_mut(),
        };
        if reset {
            entry
                .host
                .navigate_and_reset_key(&mut ctx, target, contract, parameter)
        } else {
            entry.host.navigate_to_key(&mut ctx, target, contract, parameter)
        }
    }

    fn refresh_others(&mut self, origin: usize) {
        let services = Rc::clone(&self.services);
        let views = Rc::clone(&self.views);
        for index in 0..self.hosts.len() {
            if index == origin {
                continue;
            }
            let entry = &mut self.hosts[index];
            let mut ctx = NavContext {
                services: services.as_ref(),
                views: views.as_ref(),
                hooks: &self.hooks,
                content: entry.content.as_mut(),
            };
            if let Err(err) = entry.host.refresh(&mut ctx) {
                log::warn!("cross-host refresh of {:?} failed: {err}", entry.host.name());
            }
        }
    }

    fn execute(&mut self, request: NavigationRequest) {
        let result = match request {
            NavigationRequest::Navigate {
                host,
                target,
                contract,
                parameter,
                reset,
            } => self
                .run_navigation(
                    &host,
                    target,
                    contract.as_deref(),
                    parameter.map(into_nav_parameter),
                    reset,
                )
                .map(|_| ()),
            NavigationRequest::NavigateBack { host, parameter } => self
                .navigate_back(&host, parameter.map(into_nav_parameter))
                .map(|_| ()),
            NavigationRequest::ClearHistory { host } => self.clear_history(&host),
            NavigationRequest::Refresh { host } => self.refresh(&host),
        };
        if let Err(err) = result {
            log::warn!("dropping queued navigation request: {err}");
        }
    }

    fn lookup(&self, name: &str) -> NavResult<usize> {
        if name.trim().is_empty() {
            return Err(NavError::HostNameEmpty);
        }
        self.index_of(name)
            .ok_or_else(|| NavError::unknown_host(name))
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.hosts.iter().position(|entry| entry.host.name() == name)
    }
}

fn into_nav_parameter(parameter: SendParameter) -> NavParameter {
    let parameter: Box<dyn Any> = parameter;
    Rc::from(parameter)
}
