//! Cross-thread request marshalling.
//!
//! Hosts and registry state are UI-thread-affine. Code running elsewhere
//! raises navigation through a [`NavigationDispatcher`]; the UI thread
//! drains the queue with `NavigationRegistry::pump`, so every mutation
//! still happens on the owning thread.

use std::any::Any;
use std::fmt;

use crate::viewmodel::{NavViewModel, ViewModelKey};

/// Payload allowed to cross the channel; converted to the single-threaded
/// parameter type at the pump boundary.
pub type SendParameter = Box<dyn Any + Send>;

pub enum NavigationRequest {
    Navigate {
        host: String,
        target: ViewModelKey,
        contract: Option<String>,
        parameter: Option<SendParameter>,
        reset: bool,
    },
    NavigateBack {
        host: String,
        parameter: Option<SendParameter>,
    },
    ClearHistory {
        host: String,
    },
    Refresh {
        host: String,
    },
}

impl fmt::Debug for NavigationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigate {
                host,
                target,
                reset,
                ..
            } => f
                .debug_struct("Navigate")
                .field("host", host)
                .field("target", target)
                .field("reset", reset)
                .finish_non_exhaustive(),
            Self::NavigateBack { host, .. } => f
                .debug_struct("NavigateBack")
                .field("host", host)
                .finish_non_exhaustive(),
            Self::ClearHistory { host } => {
                f.debug_struct("ClearHistory").field("host", host).finish()
            }
            Self::Refresh { host } => f.debug_struct("Refresh").field("host", host).finish(),
        }
    }
}

/// Cloneable, `Send` handle for raising navigation from any thread.
///
/// Sends return `false` once the owning registry is gone.
#[derive(Clone)]
pub struct NavigationDispatcher {
    tx: flume::Sender<NavigationRequest>,
}

impl NavigationDispatcher {
    pub fn navigate<VM: NavViewModel>(
        &self,
        host: &str,
        contract: Option<&str>,
        parameter: Option<SendParameter>,
    ) -> bool {
        self.send(NavigationRequest::Navigate {
            host: host.to_string(),
            target: ViewModelKey::of::<VM>(),
            contract: contract.map(str::to_string),
            parameter,
            reset: false,
        })
    }

    pub fn navigate_and_reset<VM: NavViewModel>(
        &self,
        host: &str,
        contract: Option<&str>,
        parameter: Option<SendParameter>,
    ) -> bool {
        self.send(NavigationRequest::Navigate {
            host: host.to_string(),
            target: ViewModelKey::of::<VM>(),
            contract: contract.map(str::to_string),
            parameter,
            reset: true,
        })
    }

    pub fn navigate_back(&self, host: &str, parameter: Option<SendParameter>) -> bool {
        self.send(NavigationRequest::NavigateBack {
            host: host.to_string(),
            parameter,
        })
    }

    pub fn clear_history(&self, host: &str) -> bool {
        self.send(NavigationRequest::ClearHistory {
            host: host.to_string(),
        })
    }

    pub fn refresh(&self, host: &str) -> bool {
        self.send(NavigationRequest::Refresh {
            host: host.to_string(),
        })
    }

    fn send(&self, request: NavigationRequest) -> bool {
        self.tx.send(request).is_ok()
    }
}

pub(crate) fn request_channel() -> (NavigationDispatcher, flume::Receiver<NavigationRequest>) {
    let (tx, rx) = flume::unbounded();
    (NavigationDispatcher { tx }, rx)
}
