//! Project store integration tests against the in-memory mock gateway

mod common;

use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};

use common::{MockGateway, project};
use prompt_console::bus::{EventBus, Signal, SignalKind};
use prompt_console::gateway::ProjectGateway;
use prompt_console::notify::{MemoryNotifier, Severity, SharedNotifier};
use prompt_console::progress::LoadTracker;
use prompt_console::store::ProjectStore;

struct Fixture {
    gateway: Arc<MockGateway>,
    notifier: Arc<MemoryNotifier>,
    bus: EventBus,
    tracker: LoadTracker,
    store: Arc<ProjectStore>,
}

fn fixture(projects: Vec<prompt_console::models::Project>) -> Fixture {
    let gateway = Arc::new(MockGateway::with_projects(projects));
    let notifier = Arc::new(MemoryNotifier::new());
    let bus = EventBus::new();
    let tracker = LoadTracker::new();
    let store = Arc::new(ProjectStore::new(
        Arc::clone(&gateway) as Arc<dyn ProjectGateway>,
        bus.clone(),
        Arc::clone(&notifier) as SharedNotifier,
        tracker.clone(),
    ));
    Fixture { gateway, notifier, bus, tracker, store }
}

#[tokio::test]
async fn test_create_flow_appends_toasts_and_broadcasts() {
    let f = fixture(vec![project("1", "Alpha", "first")]);
    f.store.refresh().await.unwrap();

    let broadcasts = Arc::new(Mutex::new(0usize));
    let broadcasts_handler = Arc::clone(&broadcasts);
    let _sub = f.bus.subscribe(SignalKind::ProjectsChanged, move |signal| {
        assert_eq!(*signal, Signal::ProjectsChanged);
        *broadcasts_handler.lock().unwrap() += 1;
    });

    let created = f.store.create("Beta", "second project").await.unwrap();

    let names: Vec<String> = f.store.projects().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["Alpha".to_string(), "Beta".to_string()]);
    assert_eq!(created.name, "Beta");
    assert_eq!(*broadcasts.lock().unwrap(), 1);

    let sent = f.notifier.snapshot();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].severity, Severity::Info);
    assert!(sent[0].description.contains("Beta"));
}

#[tokio::test]
async fn test_filter_narrows_and_clearing_restores() {
    let f = fixture(vec![
        project("1", "Alpha", "first"),
        project("2", "Beta", "second"),
        project("3", "Alphabet", "third"),
    ]);
    f.store.refresh().await.unwrap();

    f.store.set_query("alpha");
    let visible: Vec<String> = f.store.visible().into_iter().map(|p| p.name).collect();
    assert_eq!(visible, vec!["Alpha".to_string(), "Alphabet".to_string()]);
    // Authoritative list untouched
    assert_eq!(f.store.projects().len(), 3);

    f.store.set_query("");
    assert_eq!(f.store.visible().len(), 3);
}

#[tokio::test]
async fn test_delete_under_active_filter_updates_both_lists() {
    let f = fixture(vec![
        project("1", "Alpha", "first"),
        project("2", "Beta", "second"),
        project("3", "Alphabet", "third"),
    ]);
    f.store.refresh().await.unwrap();
    f.store.set_query("alpha");

    f.store.delete("1").await.unwrap();

    assert!(f.store.projects().iter().all(|p| p.id != "1"));
    assert!(f.store.visible().iter().all(|p| p.id != "1"));
    // The filter is still in force for the remaining entries
    let visible: Vec<String> = f.store.visible().into_iter().map(|p| p.name).collect();
    assert_eq!(visible, vec!["Alphabet".to_string()]);
}

#[tokio::test]
async fn test_stale_refresh_response_is_discarded_after_create() {
    let f = fixture(vec![project("1", "Alpha", "first")]);
    f.store.refresh().await.unwrap();

    // Hold the next list response in flight
    let gate = f.gateway.gate_next_project_list();
    let refresh_store = Arc::clone(&f.store);
    let pending = tokio::spawn(async move { refresh_store.refresh().await });

    while f.gateway.list_project_calls.load(Ordering::SeqCst) < 2 {
        tokio::task::yield_now().await;
    }

    // A mutation commits while the stale response is still held
    f.store.create("Beta", "second").await.unwrap();

    gate.notify_one();
    pending.await.unwrap().unwrap();

    // The held response predates Beta; applying it would lose the create
    let names: Vec<String> = f.store.projects().into_iter().map(|p| p.name).collect();
    assert!(names.contains(&"Beta".to_string()), "stale refresh clobbered a committed create");
}

#[tokio::test]
async fn test_loading_indicator_tracks_inflight_refresh() {
    let f = fixture(vec![project("1", "Alpha", "first")]);

    let gate = f.gateway.gate_next_project_list();
    let refresh_store = Arc::clone(&f.store);
    let pending = tokio::spawn(async move { refresh_store.refresh().await });

    while f.gateway.list_project_calls.load(Ordering::SeqCst) < 1 {
        tokio::task::yield_now().await;
    }
    assert!(f.tracker.is_loading());

    gate.notify_one();
    pending.await.unwrap().unwrap();
    assert!(!f.tracker.is_loading());
}

#[tokio::test]
async fn test_loading_indicator_released_on_failure() {
    let f = fixture(vec![]);
    f.gateway.fail_projects(true);

    assert!(f.store.refresh().await.is_err());
    assert!(!f.tracker.is_loading());

    assert!(f.store.create("Beta", "second").await.is_err());
    assert!(!f.tracker.is_loading());
}

#[tokio::test]
async fn test_every_outcome_produces_exactly_one_notification() {
    let f = fixture(vec![project("1", "Alpha", "first")]);
    f.store.refresh().await.unwrap();
    assert!(f.notifier.take().is_empty(), "successful refresh is silent");

    f.store.create("Beta", "second").await.unwrap();
    assert_eq!(f.notifier.take().len(), 1);

    f.store.update("1", "Alpha Two", "renamed").await.unwrap();
    assert_eq!(f.notifier.take().len(), 1);

    f.store.delete("1").await.unwrap();
    assert_eq!(f.notifier.take().len(), 1);

    f.gateway.fail_projects(true);
    let _ = f.store.delete("p-0").await;
    assert_eq!(f.notifier.take().len(), 1);
}
