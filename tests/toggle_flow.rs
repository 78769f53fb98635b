//! Integration tests for the workspace toggle flow
//!
//! Exercises the full capture-persist-restore sequence against the
//! mock host and both store implementations.

use std::sync::Arc;
use std::time::Duration;

use flipside::host::mock::{MockIconSurface, MockTabHost};
use flipside::{
    KeyValueStore, LifecycleHooks, MemoryStore, Settings, SqliteStore, TabRecord, ToggleEngine,
    ToggleOutcome, ToggleState, WorkspaceSlot, WorkspaceStore,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flipside=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

struct Harness {
    engine: Arc<ToggleEngine>,
    host: Arc<MockTabHost>,
    kv: Arc<MemoryStore>,
    icons: Arc<MockIconSurface>,
}

fn harness() -> Harness {
    init_tracing();
    let host = Arc::new(MockTabHost::new());
    let kv = Arc::new(MemoryStore::new());
    let icons = Arc::new(MockIconSurface::new());
    let engine = Arc::new(ToggleEngine::new(
        host.clone(),
        icons.clone(),
        WorkspaceStore::new(kv.clone()),
        Settings::default(),
    ));
    Harness {
        engine,
        host,
        kv,
        icons,
    }
}

fn store_of(kv: &Arc<MemoryStore>) -> WorkspaceStore {
    WorkspaceStore::new(kv.clone() as Arc<dyn KeyValueStore>)
}

/// Generous bound for any cooldown these tests can produce.
async fn let_cooldown_lapse() {
    tokio::time::advance(Duration::from_secs(60)).await;
}

#[tokio::test(start_paused = true)]
async fn toggle_into_an_empty_workspace_leaves_one_blank_tab() {
    let h = harness();
    h.host.seed("https://a.example");
    h.host.seed("https://b.example");
    h.host.seed("https://c.example");

    let outcome = h.engine.toggle().await;
    assert_eq!(outcome, ToggleOutcome::Switched(WorkspaceSlot::Alternate));

    // The window ends with exactly one blank tab.
    assert_eq!(h.host.open_urls(), vec!["about:blank"]);

    // The outgoing workspace was persisted in capture order and the
    // mode pointer flipped.
    let store = store_of(&h.kv);
    let saved = store.load_tabs(WorkspaceSlot::Primary).await;
    let urls: Vec<&str> = saved.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, vec![
        "https://a.example",
        "https://b.example",
        "https://c.example"
    ]);
    assert_eq!(store.load_mode().await, WorkspaceSlot::Alternate);

    // The empty workspace converged to a stable one-blank-tab record.
    assert_eq!(
        store.load_tabs(WorkspaceSlot::Alternate).await,
        vec![TabRecord::new("about:blank")]
    );
}

#[tokio::test(start_paused = true)]
async fn second_trigger_during_cooldown_changes_nothing() {
    let h = harness();
    h.host.seed("https://a.example");

    assert_eq!(
        h.engine.toggle().await,
        ToggleOutcome::Switched(WorkspaceSlot::Alternate)
    );
    let window_before = h.host.open_urls();
    let writes_before = h.kv.written_keys().len();

    assert_eq!(h.engine.toggle().await, ToggleOutcome::Rejected);

    assert_eq!(h.host.open_urls(), window_before);
    assert_eq!(h.kv.written_keys().len(), writes_before);
    assert_eq!(h.engine.active_slot(), WorkspaceSlot::Alternate);
}

#[tokio::test(start_paused = true)]
async fn toggle_reopens_after_the_cooldown_expires() {
    let h = harness();
    h.host.seed("https://a.example");

    assert_eq!(
        h.engine.toggle().await,
        ToggleOutcome::Switched(WorkspaceSlot::Alternate)
    );
    assert_eq!(h.engine.state(), ToggleState::Cooldown);
    assert_eq!(h.engine.toggle().await, ToggleOutcome::Rejected);

    let_cooldown_lapse().await;
    assert_eq!(h.engine.state(), ToggleState::Idle);
    assert_eq!(
        h.engine.toggle().await,
        ToggleOutcome::Switched(WorkspaceSlot::Primary)
    );
}

#[tokio::test(start_paused = true)]
async fn a_full_cycle_restores_the_original_window() {
    let h = harness();
    h.host.seed("https://a.example");
    h.host.seed("https://b.example");
    h.host.seed("https://c.example");
    let original = h.host.open_urls();

    h.engine.toggle().await;
    let_cooldown_lapse().await;
    h.engine.toggle().await;

    assert_eq!(h.host.open_urls(), original);
    assert_eq!(h.engine.active_slot(), WorkspaceSlot::Primary);
    assert_eq!(store_of(&h.kv).load_mode().await, WorkspaceSlot::Primary);
}

#[tokio::test(start_paused = true)]
async fn pinned_tabs_stay_with_the_window() {
    let h = harness();
    let pinned = h.host.seed_pinned("https://pinned.example");
    h.host.seed("about:blank");
    h.host.seed("https://a.example");

    h.engine.toggle().await;

    // The pinned tab was never captured, closed, or re-created.
    assert!(h.host.has_tab(pinned));
    let store = store_of(&h.kv);
    let saved = store.load_tabs(WorkspaceSlot::Primary).await;
    let urls: Vec<&str> = saved.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, vec!["about:blank", "https://a.example"]);
    for batch in h.host.removed_batches() {
        assert!(!batch.contains(&pinned));
    }

    // Blank and ordinary tabs followed the capture rules: the window is
    // now the pinned tab plus the blank stand-in.
    assert_eq!(
        h.host.open_urls(),
        vec!["https://pinned.example", "about:blank"]
    );
}

#[tokio::test(start_paused = true)]
async fn icons_track_the_swap() {
    let h = harness();
    h.host.seed("https://a.example");

    h.engine.toggle().await;

    use flipside::IconKind;
    assert_eq!(
        h.icons.icons_set(),
        vec![
            IconKind::Settling,
            IconKind::Workspace(WorkspaceSlot::Alternate)
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn startup_then_toggle_round_trips_through_sqlite() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("flipside.db");

    // First run: two workspaces populated, alternate active.
    {
        let kv = Arc::new(SqliteStore::open(db_path.clone()).unwrap());
        let store = WorkspaceStore::new(kv.clone() as Arc<dyn KeyValueStore>);
        store
            .save_tabs(
                WorkspaceSlot::Alternate,
                &[TabRecord::new("https://work.example")],
            )
            .await
            .unwrap();
        store.save_mode(WorkspaceSlot::Alternate).await.unwrap();
    }

    // Second run: startup restores the alternate workspace, a toggle
    // lands back on primary, and the flip is durable.
    let kv = Arc::new(SqliteStore::open(db_path.clone()).unwrap());
    let host = Arc::new(MockTabHost::new());
    let icons = Arc::new(MockIconSurface::new());
    let engine = Arc::new(ToggleEngine::new(
        host.clone(),
        icons.clone(),
        WorkspaceStore::new(kv.clone()),
        Settings::default(),
    ));
    let hooks = LifecycleHooks::new(engine.clone());

    hooks.startup().await;
    assert_eq!(host.open_urls(), vec!["https://work.example"]);
    assert_eq!(engine.active_slot(), WorkspaceSlot::Alternate);

    assert_eq!(
        engine.toggle().await,
        ToggleOutcome::Switched(WorkspaceSlot::Primary)
    );

    let reopened = WorkspaceStore::new(
        Arc::new(SqliteStore::open(db_path).unwrap()) as Arc<dyn KeyValueStore>
    );
    assert_eq!(reopened.load_mode().await, WorkspaceSlot::Primary);
    assert_eq!(
        reopened.load_tabs(WorkspaceSlot::Alternate).await,
        vec![TabRecord::new("https://work.example")]
    );
}

#[tokio::test(start_paused = true)]
async fn autosave_after_a_cycle_tracks_the_live_window() {
    let h = harness();
    h.host.seed("https://a.example");
    let hooks = LifecycleHooks::new(h.engine.clone());

    h.engine.toggle().await;
    let_cooldown_lapse().await;

    // The user opens something new in the restored workspace.
    h.host.seed("https://new.example");
    hooks.autosave().await;

    let store = store_of(&h.kv);
    let saved = store.load_tabs(WorkspaceSlot::Alternate).await;
    let urls: Vec<&str> = saved.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, vec!["about:blank", "https://new.example"]);
    // The inactive workspace still holds the original capture.
    let primary = store.load_tabs(WorkspaceSlot::Primary).await;
    assert_eq!(primary, vec![TabRecord::new("https://a.example")]);
}
