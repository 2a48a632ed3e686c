use async_trait::async_trait;

use mcu_dash::app::{App, LoadState};
use mcu_dash::error::{AppError, AppResult};
use mcu_dash::models::{Production, ProductionType, SortBy};
use mcu_dash::source::{self, ProductionSource};
use mcu_dash::store::{FileBackend, WatchedStore, WATCHED_KEY};

fn make_production(title: &str, phase: &str, release: u32, chronology: u32) -> Production {
    Production {
        title: title.to_string(),
        production_type: ProductionType::Movie,
        release_year: 2008,
        release_order: release,
        chronology_order: chronology,
        phase: phase.to_string(),
        synopsis: "A synopsis.".to_string(),
        poster_url: String::new(),
    }
}

fn catalog() -> Vec<Production> {
    vec![
        make_production("second-chronologically", "Phase 1", 1, 2),
        make_production("first-chronologically", "Phase 1", 2, 1),
        make_production("third-chronologically", "Phase 2", 3, 3),
    ]
}

/// Source that fails like a dataset endpoint returning an HTTP error
struct FailingSource;

#[async_trait]
impl ProductionSource for FailingSource {
    async fn load(&self) -> AppResult<Vec<Production>> {
        Err(AppError::Status {
            url: "http://localhost:3000/mcu_productions.json".to_string(),
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        })
    }

    fn describe(&self) -> String {
        "failing test source".to_string()
    }
}

/// Source that returns the fixed test catalog
struct StaticSource(Vec<Production>);

#[async_trait]
impl ProductionSource for StaticSource {
    async fn load(&self) -> AppResult<Vec<Production>> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "static test source".to_string()
    }
}

fn open_app(dir: &std::path::Path) -> App {
    let store = WatchedStore::open(Box::new(FileBackend::new(dir)));
    App::new(store, SortBy::Chronology)
}

#[tokio::test]
async fn failed_fetch_then_retry_reaches_ready() {
    let dir = tempfile::tempdir().unwrap();

    // First session: the fetch fails and the dashboard shows the error with
    // no cards.
    let mut app = open_app(dir.path());
    match source::load_catalog(&FailingSource).await {
        Ok(_) => panic!("expected the fetch to fail"),
        Err(e) => app.on_failed(e.to_string()),
    }
    assert!(matches!(app.load, LoadState::Failed(_)));
    assert!(app.groups().is_empty());
    assert!(app.selected_production().is_none());

    // Retry is a full restart: a fresh session against a now-succeeding
    // source reaches ready with every item rendered.
    let mut app = open_app(dir.path());
    let productions = source::load_catalog(&StaticSource(catalog())).await.unwrap();
    app.on_loaded(productions);
    assert_eq!(app.load, LoadState::Ready);
    let rendered: usize = app.groups().iter().map(|g| g.productions.len()).sum();
    assert_eq!(rendered, 3);
}

#[tokio::test]
async fn chronological_sort_groups_phases_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = open_app(dir.path());
    app.on_loaded(source::load_catalog(&StaticSource(catalog())).await.unwrap());

    let groups = app.groups();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].phase, "Phase 1");
    assert_eq!(
        groups[0]
            .productions
            .iter()
            .map(|p| p.chronology_order)
            .collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert_eq!(groups[1].phase, "Phase 2");
    assert_eq!(groups[1].productions[0].chronology_order, 3);
}

#[tokio::test]
async fn double_toggle_persists_the_original_value() {
    let dir = tempfile::tempdir().unwrap();
    let stored_file = dir.path().join(format!("{WATCHED_KEY}.json"));

    let mut app = open_app(dir.path());
    app.on_loaded(source::load_catalog(&StaticSource(catalog())).await.unwrap());

    // Seed some state so the file exists before the toggles under test.
    app.toggle_selected();
    let before = std::fs::read_to_string(&stored_file).unwrap();

    app.select_next();
    app.toggle_selected();
    app.toggle_selected();

    let after = std::fs::read_to_string(&stored_file).unwrap();
    assert_eq!(after, before);
}

#[tokio::test]
async fn watched_state_survives_sessions() {
    let dir = tempfile::tempdir().unwrap();

    let mut app = open_app(dir.path());
    app.on_loaded(source::load_catalog(&StaticSource(catalog())).await.unwrap());
    app.toggle_selected();
    let watched_title = app.selected_production().unwrap().title.clone();
    assert_eq!(app.stats().watched, 1);

    let mut app = open_app(dir.path());
    app.on_loaded(source::load_catalog(&StaticSource(catalog())).await.unwrap());
    assert!(app.watched.is_watched(&watched_title));
    assert_eq!(app.stats().watched, 1);
    assert_eq!(app.stats().percent, 33);
}

#[tokio::test]
async fn duplicate_titles_are_dropped_before_the_app_sees_them() {
    let dir = tempfile::tempdir().unwrap();
    let mut productions = catalog();
    productions.push(make_production("first-chronologically", "Phase 4", 9, 9));

    let mut app = open_app(dir.path());
    app.on_loaded(source::load_catalog(&StaticSource(productions)).await.unwrap());

    assert_eq!(app.stats().total, 3);
    // The duplicate's phase never shows up.
    assert!(app.groups().iter().all(|g| g.phase != "Phase 4"));
}
