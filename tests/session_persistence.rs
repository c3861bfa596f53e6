//! Session persistence across runs, using the JSON snapshot on disk.

mod common;

use common::{app_with_storage, run, FakeApi, PASSWORD};
use movieflix::app::Route;
use movieflix::infrastructure::session_file_path;
use movieflix::storage::{MemoryStorage, SessionSnapshot};
use movieflix::worker::CatalogWorker;
use movieflix::{initialize, Config, Event, UserProfile};
use std::fs;

fn config_in(dir: &tempfile::TempDir) -> Config {
    Config {
        data_dir: dir.path().to_path_buf(),
        ..Config::default()
    }
}

fn login(email: &str) -> Event {
    Event::SubmitLogin {
        email: email.to_string(),
        password: PASSWORD.to_string(),
    }
}

#[test]
fn test_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let worker = CatalogWorker::new(FakeApi::default());

    let mut first_run = initialize(&config).unwrap();
    run(&mut first_run, &worker, login("admin@movieflix.io"));
    drop(first_run);

    let contents = fs::read_to_string(session_file_path(&config.data_dir)).unwrap();
    let snapshot: SessionSnapshot = serde_json::from_str(&contents).unwrap();
    assert_eq!(snapshot.token.as_deref(), Some("tok-admin@movieflix.io"));

    let second_run = initialize(&config).unwrap();
    assert!(second_run.session.is_authenticated());
    assert!(second_run.session.is_admin());
    assert!(second_run.compute_viewmodel().header.show_stats);
}

#[test]
fn test_logout_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let worker = CatalogWorker::new(FakeApi::default());

    let mut state = initialize(&config).unwrap();
    run(&mut state, &worker, login("jane@example.com"));
    run(&mut state, &worker, Event::Logout);
    drop(state);

    let restored = initialize(&config).unwrap();
    assert!(!restored.session.is_authenticated());
    assert!(restored.session.current_user().is_none());
}

#[test]
fn test_corrupt_snapshot_starts_signed_out() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    fs::write(session_file_path(&config.data_dir), "{ not json").unwrap();

    let state = initialize(&config).unwrap();
    assert!(!state.session.is_authenticated());
    assert_eq!(state.route, Route::Home);
}

#[test]
fn test_half_snapshot_restores_signed_out() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    fs::write(
        session_file_path(&config.data_dir),
        r#"{"version":1,"token":"orphan","user":null,"saved_at":0}"#,
    )
    .unwrap();

    let state = initialize(&config).unwrap();
    assert!(!state.session.is_authenticated());
    assert_eq!(state.session.token(), None);
}

#[test]
fn test_restored_admin_can_open_analytics() {
    let storage = MemoryStorage::with_snapshot(SessionSnapshot::signed_in(
        "tok-admin@movieflix.io",
        UserProfile::new("u-1", "admin@movieflix.io", "admin"),
    ));
    let mut state = app_with_storage(storage.clone());
    let worker = CatalogWorker::new(FakeApi::default());

    run(&mut state, &worker, Event::Navigate(Route::Analytics));

    assert!(state.dashboard.is_some());
    assert_eq!(storage.write_count(), 0);
}
