//! End-to-end flows through the event handler and a worker backed by a fake API.

mod common;

use common::{app, messages, respond_later, run, titles, FakeApi, PASSWORD};
use movieflix::app::{Action, Route, SortKey};
use movieflix::session::ACCESS_DENIED_MESSAGE;
use movieflix::ui::Body;
use movieflix::worker::{self, CatalogWorker, WorkerResponse};
use movieflix::{handle_event, parse_command, Event};
use std::sync::mpsc;
use std::time::Duration;

fn worker() -> CatalogWorker<FakeApi> {
    CatalogWorker::new(FakeApi::default())
}

fn login(email: &str) -> Event {
    Event::SubmitLogin {
        email: email.to_string(),
        password: PASSWORD.to_string(),
    }
}

#[test]
fn test_browse_filter_sort_and_export() {
    let mut state = app();
    let worker = worker();

    let (notes, _) = run(&mut state, &worker, Event::LoadTrending);
    assert_eq!(messages(&notes), ["Trending movies loaded!"]);
    assert_eq!(titles(&state).len(), 4);

    for event in parse_command("genre sci").unwrap() {
        run(&mut state, &worker, event);
    }
    assert_eq!(state.catalog().genres(), ["Sci-Fi"]);
    assert_eq!(titles(&state), ["Inception", "The Matrix"]);

    run(&mut state, &worker, Event::ClickSort(SortKey::Year));
    run(&mut state, &worker, Event::ClickSort(SortKey::Year));
    assert_eq!(titles(&state), ["The Matrix", "Inception"]);

    let (_, actions) = run(&mut state, &worker, Event::ExportCsv);
    match actions.as_slice() {
        [Action::SaveFile { file_name, contents, .. }] => {
            assert_eq!(file_name, "movies.csv");
            let rows: Vec<&str> = contents.split_terminator("\r\n").collect();
            assert_eq!(rows.len(), 3);
            assert!(rows[1].starts_with("The Matrix,1999,Action; Sci-Fi,"));
        }
        other => panic!("unexpected actions {other:?}"),
    }
}

#[test]
fn test_stale_search_response_is_dropped() {
    let mut state = app();
    let worker = worker();

    handle_event(&mut state, &Event::QueryChanged("matrix".into())).unwrap();
    let first = respond_later(&mut state, &worker, Event::SubmitSearch);
    handle_event(&mut state, &Event::QueryChanged("inception".into())).unwrap();
    let second = respond_later(&mut state, &worker, Event::SubmitSearch);

    let (render, _) = handle_event(&mut state, &Event::WorkerResponse(second[0].clone())).unwrap();
    assert!(render);
    let (render, actions) = handle_event(&mut state, &Event::WorkerResponse(first[0].clone())).unwrap();
    assert!(!render);
    assert!(actions.is_empty());

    assert_eq!(state.catalog().movies().len(), 1);
    assert_eq!(state.catalog().movies()[0].title, "Inception");
}

#[test]
fn test_failed_search_keeps_last_results() {
    let mut state = app();
    let worker = worker();
    run(&mut state, &worker, Event::LoadTrending);

    handle_event(&mut state, &Event::QueryChanged("offline".into())).unwrap();
    let (notes, _) = run(&mut state, &worker, Event::SubmitSearch);

    assert_eq!(messages(&notes), ["Failed to fetch search results."]);
    assert_eq!(state.catalog_error.as_deref(), Some("Failed to fetch search results."));
    assert_eq!(state.catalog().movies().len(), 4);
}

#[test]
fn test_login_resets_catalog_and_goes_home() {
    let mut state = app();
    let worker = worker();
    run(&mut state, &worker, Event::LoadTrending);
    run(&mut state, &worker, Event::Navigate(Route::Login));

    let (notes, _) = run(&mut state, &worker, login("jane@example.com"));

    assert_eq!(messages(&notes), ["Login successful"]);
    assert!(state.session.is_authenticated());
    assert_eq!(state.session.token(), Some("tok-jane@example.com"));
    assert_eq!(state.route, Route::Home);
    assert!(state.catalog().movies().is_empty());
}

#[test]
fn test_login_failure_reports_backend_message() {
    let mut state = app();
    let worker = worker();

    let (notes, _) = run(
        &mut state,
        &worker,
        Event::SubmitLogin {
            email: "jane@example.com".into(),
            password: "wrong".into(),
        },
    );

    assert_eq!(messages(&notes), ["Login failed: Invalid email or password"]);
    assert!(!state.session.is_authenticated());
}

#[test]
fn test_invalid_form_never_reaches_backend() {
    let mut state = app();
    let (render, actions) = handle_event(
        &mut state,
        &Event::SubmitSignUp {
            email: "jane@example.com".into(),
            password: "one".into(),
            confirm_password: "two".into(),
            agree_to_terms: true,
        },
    )
    .unwrap();

    assert!(render);
    assert!(actions.is_empty());
    assert_eq!(state.form_error.as_deref(), Some("Passwords do not match."));
}

#[test]
fn test_analytics_denied_for_regular_user() {
    let mut state = app();
    let worker = worker();
    run(&mut state, &worker, login("jane@example.com"));

    let responses = respond_later(&mut state, &worker, Event::Navigate(Route::Analytics));
    assert!(responses.is_empty());

    let vm = state.compute_viewmodel();
    assert!(!vm.header.show_stats);
    assert_eq!(
        vm.body,
        Body::AccessDenied {
            message: ACCESS_DENIED_MESSAGE.to_string()
        }
    );
}

#[test]
fn test_analytics_for_admin() {
    let mut state = app();
    let worker = worker();
    run(&mut state, &worker, login("admin@movieflix.io"));
    run(&mut state, &worker, Event::Navigate(Route::Analytics));

    let vm = state.compute_viewmodel();
    assert!(vm.header.show_stats);
    match vm.body {
        Body::Analytics(view) => {
            assert!(!view.loading);
            assert_eq!(view.total_movies, 4);
            assert_eq!(
                view.genre_shares,
                vec![("Action".to_string(), 50), ("Drama".to_string(), 25)]
            );
        }
        other => panic!("unexpected body {other:?}"),
    }
}

#[test]
fn test_logout_clears_session_and_catalog() {
    let mut state = app();
    let worker = worker();
    run(&mut state, &worker, login("jane@example.com"));
    run(&mut state, &worker, Event::LoadTrending);

    let (notes, _) = run(&mut state, &worker, Event::Logout);

    assert_eq!(messages(&notes), ["Logged out."]);
    assert!(!state.session.is_authenticated());
    assert!(state.catalog().movies().is_empty());
    assert!(state.compute_viewmodel().header.user_label.is_none());
}

#[test]
fn test_open_movie_loads_details() {
    let mut state = app();
    let worker = worker();
    run(&mut state, &worker, Event::LoadTrending);

    run(&mut state, &worker, Event::OpenMovie(2));

    assert_eq!(state.route, Route::MovieDetails("tt0110912".into()));
    assert_eq!(state.detail.as_ref().map(|m| m.title.as_str()), Some("Pulp Fiction"));
}

#[test]
fn test_forgot_password_outcomes() {
    let mut state = app();
    let worker = worker();
    run(&mut state, &worker, Event::Navigate(Route::ForgotPassword));

    let reset = |email: &str| Event::SubmitForgotPassword {
        email: email.to_string(),
        new_password: "n3w-pass".to_string(),
        confirm_password: "n3w-pass".to_string(),
    };

    let (notes, _) = run(&mut state, &worker, reset("ghost@example.com"));
    assert_eq!(messages(&notes), ["User not found"]);
    assert_eq!(state.route, Route::ForgotPassword);

    let (notes, _) = run(&mut state, &worker, reset("jane@example.com"));
    assert_eq!(messages(&notes), ["Password reset successful!"]);
    assert_eq!(state.route, Route::Login);
}

#[test]
fn test_threaded_worker_round_trip() {
    let mut state = app();
    let (tx, rx) = mpsc::channel::<WorkerResponse>();
    let handle = worker::spawn(FakeApi::default(), move |response| tx.send(response).is_ok()).unwrap();

    let (_, actions) = handle_event(&mut state, &Event::LoadTrending).unwrap();
    for action in actions {
        if let Action::PostToWorker(message) = action {
            handle.post(message).unwrap();
        }
    }

    let response = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    let (render, _) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
    assert!(render);
    assert_eq!(state.visible_movies().len(), 4);

    drop(rx);
    handle.shutdown().unwrap();
}
