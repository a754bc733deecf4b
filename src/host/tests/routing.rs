use std::cell::RefCell;
use std::rc::Rc;
use std::thread;

use crate::config::HostConfig;
use crate::event::NavigationOutcome;

use super::fixtures::{DetailViewModel, Harness, HomeViewModel, SettingsViewModel};

#[test]
fn committed_back_navigation_refreshes_every_other_host() {
    let mut harness = Harness::new();
    let _sidebar_surface = harness.add_host(
        "sidebar",
        HostConfig {
            navigate_back_enabled: false,
            ..HostConfig::default()
        },
    );

    harness
        .registry
        .navigate::<HomeViewModel>("sidebar", None, None)
        .expect("navigation should run");
    harness
        .registry
        .navigate::<DetailViewModel>("sidebar", None, None)
        .expect("navigation should run");
    harness
        .registry
        .navigate::<SettingsViewModel>("sidebar", None, None)
        .expect("navigation should run");

    harness
        .registry
        .navigate::<HomeViewModel>("main", None, None)
        .expect("navigation should run");
    harness
        .registry
        .navigate::<DetailViewModel>("main", None, None)
        .expect("navigation should run");

    let outcome = harness
        .registry
        .navigate_back("main", None)
        .expect("back navigation should run");
    assert_eq!(outcome, NavigationOutcome::Committed);

    // The sidebar host's refresh applied its back-disabled cleanup.
    assert_eq!(harness.stack_keys("sidebar"), vec!["SettingsViewModel"]);
    assert_eq!(harness.stack_keys("main"), vec!["HomeViewModel"]);
}

#[test]
fn ignored_back_navigation_does_not_touch_other_hosts() {
    let mut harness = Harness::new();
    harness.add_host(
        "sidebar",
        HostConfig {
            navigate_back_enabled: false,
            ..HostConfig::default()
        },
    );
    harness
        .registry
        .navigate::<HomeViewModel>("sidebar", None, None)
        .expect("navigation should run");
    harness
        .registry
        .navigate::<DetailViewModel>("sidebar", None, None)
        .expect("navigation should run");

    let outcome = harness
        .registry
        .navigate_back("main", None)
        .expect("back navigation should run");
    assert_eq!(outcome, NavigationOutcome::Ignored);
    assert_eq!(
        harness.stack_keys("sidebar"),
        vec!["HomeViewModel", "DetailViewModel"]
    );
}

#[test]
fn navigated_to_hook_takes_over_from_the_view_model_callback() {
    let mut harness = Harness::new();
    let notified = Rc::new(RefCell::new(0usize));
    let sink = Rc::clone(&notified);
    let guard = harness
        .registry
        .when_navigated_to::<DetailViewModel>(move |_| *sink.borrow_mut() += 1);

    harness
        .registry
        .navigate::<DetailViewModel>("main", None, None)
        .expect("navigation should run");

    assert_eq!(*notified.borrow(), 1);
    assert!(
        !harness.trace_entries().contains(&"Detail.to".to_string()),
        "view opt-in should suppress the direct view-model callback"
    );

    // Once the subscription is gone the protocol falls back to the
    // view-model path.
    drop(guard);
    harness
        .registry
        .navigate::<HomeViewModel>("main", None, None)
        .expect("navigation should run");
    harness
        .registry
        .navigate::<DetailViewModel>("main", None, None)
        .expect("navigation should run");
    assert_eq!(*notified.borrow(), 1);
    assert!(harness.trace_entries().contains(&"Detail.to".to_string()));
}

#[test]
fn dispatcher_requests_execute_in_fifo_order_at_pump() {
    let mut harness = Harness::new();
    let dispatcher = harness.registry.dispatcher();

    assert!(dispatcher.navigate::<HomeViewModel>("main", None, None));
    assert!(dispatcher.navigate::<DetailViewModel>("main", None, None));

    let worker = thread::spawn({
        let dispatcher = dispatcher.clone();
        move || dispatcher.navigate::<SettingsViewModel>("main", None, None)
    });
    assert!(worker.join().expect("worker thread should finish"));

    // Nothing runs until the owning thread pumps.
    assert!(harness.stack_keys("main").is_empty());

    assert_eq!(harness.registry.pump(), 3);
    assert_eq!(
        harness.stack_keys("main"),
        vec!["HomeViewModel", "DetailViewModel", "SettingsViewModel"]
    );
    assert_eq!(harness.registry.pump(), 0);
}

#[test]
fn queued_parameter_crosses_the_thread_boundary() {
    let mut harness = Harness::new();
    let dispatcher = harness.registry.dispatcher();

    thread::spawn(move || {
        dispatcher.navigate::<DetailViewModel>("main", None, Some(Box::new("7".to_string())))
    })
    .join()
    .expect("worker thread should finish");

    harness.registry.pump();
    assert!(
        harness
            .trace_entries()
            .contains(&"Detail.param:7".to_string())
    );
}

#[test]
fn queued_request_for_an_unknown_host_is_dropped() {
    let mut harness = Harness::new();
    let dispatcher = harness.registry.dispatcher();
    assert!(dispatcher.navigate::<HomeViewModel>("ghost", None, None));

    assert_eq!(harness.registry.pump(), 1);
    assert!(harness.stack_keys("main").is_empty());
}

#[test]
fn dispatcher_outlives_usefulness_once_the_registry_drops() {
    let harness = Harness::new();
    let dispatcher = harness.registry.dispatcher();
    drop(harness);

    assert!(!dispatcher.navigate::<HomeViewModel>("main", None, None));
}
