//! Monitor engine tests — rotation sequencing, refresh failure isolation,
//! and timer lifecycle, driven against a canned data source.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use common::*;
use matsuri::config::MonitorSettings;
use matsuri::db;
use matsuri::errors::AppError;
use matsuri::models::booth::{Booth, BoothStatus};
use matsuri::models::event::Event;
use matsuri::monitor::{DataSource, DbDataSource, MonitorEngine, MonitorPage, marquee};

// ============================================================================
// FIXTURES
// ============================================================================

struct StubSource {
    booths: Mutex<Vec<Booth>>,
    notices: Mutex<Vec<String>>,
    fail_booths: AtomicBool,
    fail_notices: AtomicBool,
}

impl StubSource {
    fn new(booths: Vec<Booth>, notices: Vec<String>) -> Arc<Self> {
        Arc::new(Self {
            booths: Mutex::new(booths),
            notices: Mutex::new(notices),
            fail_booths: AtomicBool::new(false),
            fail_notices: AtomicBool::new(false),
        })
    }

    fn set_booths(&self, booths: Vec<Booth>) {
        *self.booths.lock().unwrap() = booths;
    }
}

impl DataSource for StubSource {
    fn fetch_booths(&self) -> Result<Vec<Booth>, AppError> {
        if self.fail_booths.load(Ordering::SeqCst) {
            return Err(AppError::BadRequest("stub booth failure".to_string()));
        }
        Ok(self.booths.lock().unwrap().clone())
    }

    fn fetch_notice_texts(&self, _now: &str) -> Result<Vec<String>, AppError> {
        if self.fail_notices.load(Ordering::SeqCst) {
            return Err(AppError::BadRequest("stub notice failure".to_string()));
        }
        Ok(self.notices.lock().unwrap().clone())
    }
}

fn make_booth(id: i64, organizer: &str) -> Booth {
    Booth {
        id,
        account_id: id,
        name: format!("Booth {id}"),
        organizer: organizer.to_string(),
        location: "Quad".to_string(),
        floor: None,
        area: None,
        memo: None,
        status: BoothStatus::Open,
        waiting: 5,
    }
}

fn make_booths(n: usize) -> Vec<Booth> {
    (1..=n as i64).map(|i| make_booth(i, "Club")).collect()
}

fn far_future_event(id: i64) -> Event {
    Event {
        id,
        name: format!("Event {id}"),
        organizer: None,
        location: "Main stage".to_string(),
        start_at: "2099-01-01T10:00".to_string(),
        end_at: "2099-01-01T11:00".to_string(),
    }
}

fn past_event(id: i64) -> Event {
    Event {
        id,
        name: format!("Event {id}"),
        organizer: None,
        location: "Main stage".to_string(),
        start_at: "2000-01-01T10:00".to_string(),
        end_at: "2000-01-01T11:00".to_string(),
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ============================================================================
// ROTATION & MARQUEE
// ============================================================================

#[test]
fn test_end_to_end_rotation_with_ten_booths() {
    // Ten booths paginate as 7 + 3, with the events page at index 2.
    let notices = vec!["Fireworks at 19:30".to_string(), "Lost child".to_string()];
    let source = StubSource::new(make_booths(10), notices.clone());
    let engine = MonitorEngine::new(
        source,
        vec![far_future_event(1)],
        MonitorSettings::default(),
    );

    engine.refresh_once();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.total_booth_pages, 2);
    assert_eq!(snapshot.page_index, 0);
    match snapshot.page {
        MonitorPage::Booths { ref booths } => assert_eq!(booths.len(), 7),
        MonitorPage::Events { .. } => panic!("expected a booth page"),
    }

    let joined_len = marquee::join_notices(&notices).chars().count();
    assert_close(
        snapshot.marquee_duration_secs,
        joined_len as f64 * 0.3 + 5.0,
    );
    assert!(snapshot.marquee_text.contains("Fireworks at 19:30"));
    assert!(snapshot.marquee_text.contains("Lost child"));

    // 0 -> 1 (remaining three booths)
    engine.advance_once();
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.page_index, 1);
    match snapshot.page {
        MonitorPage::Booths { ref booths } => assert_eq!(booths.len(), 3),
        MonitorPage::Events { .. } => panic!("expected a booth page"),
    }

    // 1 -> 2 (events page)
    engine.advance_once();
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.page_index, 2);
    match snapshot.page {
        MonitorPage::Events { ref events } => assert_eq!(events.len(), 1),
        MonitorPage::Booths { .. } => panic!("expected the events page"),
    }

    // 2 -> 0 (wrap)
    engine.advance_once();
    assert_eq!(engine.snapshot().page_index, 0);
}

#[test]
fn test_empty_data_renders_events_placeholder_state() {
    let source = StubSource::new(vec![], vec![]);
    let engine = MonitorEngine::new(source, vec![], MonitorSettings::default());

    engine.refresh_once();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.total_booth_pages, 0);
    assert!(matches!(snapshot.page, MonitorPage::Events { ref events } if events.is_empty()));
    assert_eq!(snapshot.marquee_text, "");
    assert_eq!(snapshot.marquee_duration_secs, 10.0);

    // With no booths the cursor stays pinned to the single events page.
    for _ in 0..3 {
        engine.advance_once();
        assert_eq!(engine.snapshot().page_index, 0);
    }
}

#[test]
fn test_shrinking_booth_list_self_corrects() {
    let source = StubSource::new(make_booths(28), vec![]);
    let engine = MonitorEngine::new(
        Arc::clone(&source) as Arc<dyn DataSource>,
        vec![],
        MonitorSettings::default(),
    );

    engine.refresh_once();
    for _ in 0..3 {
        engine.advance_once();
    }
    assert_eq!(engine.snapshot().page_index, 3);

    // The list shrinks to one page mid-rotation. The stale index renders as
    // the events page, never out of range, and the next tick wraps home.
    source.set_booths(make_booths(5));
    engine.refresh_once();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.total_booth_pages, 1);
    assert!(matches!(snapshot.page, MonitorPage::Events { .. }));

    engine.advance_once();
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.page_index, 0);
    assert!(snapshot.page_index <= snapshot.total_booth_pages);
}

#[test]
fn test_upcoming_events_derived_from_wall_clock() {
    let source = StubSource::new(vec![], vec![]);
    let events = vec![past_event(1), far_future_event(2), past_event(3)];
    let engine = MonitorEngine::new(source, events, MonitorSettings::default());

    engine.refresh_once();

    match engine.snapshot().page {
        MonitorPage::Events { ref events } => {
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].id, 2);
        }
        MonitorPage::Booths { .. } => panic!("expected the events page"),
    }
}

// ============================================================================
// REFRESH FAILURE ISOLATION
// ============================================================================

#[test]
fn test_notice_failure_does_not_block_booth_update() {
    let source = StubSource::new(make_booths(3), vec!["Keep me".to_string()]);
    let engine = MonitorEngine::new(
        Arc::clone(&source) as Arc<dyn DataSource>,
        vec![],
        MonitorSettings::default(),
    );

    engine.refresh_once();
    assert!(engine.snapshot().marquee_text.contains("Keep me"));

    // Notices start failing while the booth list grows.
    source.fail_notices.store(true, Ordering::SeqCst);
    source.set_booths(make_booths(9));
    engine.refresh_once();

    let snapshot = engine.snapshot();
    // Booths updated...
    assert_eq!(snapshot.total_booth_pages, 2);
    // ...notices kept their last known value.
    assert!(snapshot.marquee_text.contains("Keep me"));
}

#[test]
fn test_failure_on_first_load_leaves_empty_fields() {
    let source = StubSource::new(make_booths(3), vec!["text".to_string()]);
    source.fail_booths.store(true, Ordering::SeqCst);
    source.fail_notices.store(true, Ordering::SeqCst);
    let engine = MonitorEngine::new(
        Arc::clone(&source) as Arc<dyn DataSource>,
        vec![],
        MonitorSettings::default(),
    );

    // Both fetches fail; the cycle must not panic and the model stays empty.
    engine.refresh_once();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.total_booth_pages, 0);
    assert_eq!(snapshot.marquee_text, "");
    assert_eq!(snapshot.marquee_duration_secs, 10.0);
}

// ============================================================================
// LIFECYCLE
// ============================================================================

#[test]
fn test_results_after_stop_are_discarded() {
    let source = StubSource::new(make_booths(3), vec![]);
    let engine = MonitorEngine::new(source, vec![], MonitorSettings::default());

    engine.stop();
    // A fetch finishing after teardown must not touch the model.
    engine.refresh_once();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.total_booth_pages, 0);

    // stop() is idempotent.
    engine.stop();
    engine.stop();
}

#[actix_rt::test]
async fn test_timers_drive_refresh_and_rotation() {
    let source = StubSource::new(make_booths(10), vec![]);
    let settings = MonitorSettings {
        refresh_interval_mins: 1,
        rotation_duration_secs: 1,
    };
    let engine = MonitorEngine::new(
        Arc::clone(&source) as Arc<dyn DataSource>,
        vec![],
        settings,
    );

    engine.start();

    // The refresh loop runs one cycle immediately; the cursor holds its
    // first page for a full rotation period.
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.total_booth_pages, 2);
    assert_eq!(snapshot.page_index, 0);

    // After a rotation period the cursor has moved.
    tokio::time::sleep(std::time::Duration::from_millis(1300)).await;
    assert!(engine.snapshot().page_index >= 1);

    // Stopping freezes the cursor.
    engine.stop();
    let frozen = engine.snapshot().page_index;
    tokio::time::sleep(std::time::Duration::from_millis(1300)).await;
    assert_eq!(engine.snapshot().page_index, frozen);
}

#[actix_rt::test]
async fn test_start_twice_is_a_no_op() {
    let source = StubSource::new(vec![], vec![]);
    let engine = MonitorEngine::new(source, vec![], MonitorSettings::default());

    engine.start();
    engine.start();
    engine.stop();
}

// ============================================================================
// DB-BACKED SOURCE
// ============================================================================

#[test]
fn test_db_source_reads_booths_and_active_notices() {
    let (dir, conn) = setup_test_db();
    let a = insert_account(&conn, "a@example.com");
    let b = insert_account(&conn, "b@example.com");
    insert_booth(&conn, a, "Takoyaki", "Chorus");
    insert_booth(&conn, b, "Crepes", "Art club");
    insert_notice(&conn, "Always on", "2000-01-01T00:00", "2099-01-01T00:00");
    insert_notice(&conn, "Long gone", "2000-01-01T00:00", "2000-01-02T00:00");
    drop(conn);

    let pool = db::init_pool(dir.path().join("test.db").to_str().expect("utf-8 path"));
    let source = DbDataSource::new(pool);

    let booths = source.fetch_booths().expect("booth fetch");
    let organizers: Vec<&str> = booths.iter().map(|b| b.organizer.as_str()).collect();
    assert_eq!(organizers, vec!["Art club", "Chorus"]);

    let texts = source
        .fetch_notice_texts("2026-08-08T12:00")
        .expect("notice fetch");
    assert_eq!(texts, vec!["Always on".to_string()]);
}
