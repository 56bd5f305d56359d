//! Notice model tests — the active-window predicate and CRUD.

mod common;

use common::*;
use matsuri::models::notice::{self, NewNotice};

#[test]
fn test_active_window_start_inclusive_end_exclusive() {
    let (_dir, conn) = setup_test_db();
    insert_notice(&conn, "Lost child at HQ", "2026-08-08T10:00", "2026-08-08T12:00");

    // Before the window opens.
    assert!(notice::find_active(&conn, "2026-08-08T09:59")
        .expect("query")
        .is_empty());

    // Start is inclusive.
    assert_eq!(
        notice::find_active(&conn, "2026-08-08T10:00").expect("query").len(),
        1
    );

    // Just before the window closes.
    assert_eq!(
        notice::find_active(&conn, "2026-08-08T11:59").expect("query").len(),
        1
    );

    // End is exclusive.
    assert!(notice::find_active(&conn, "2026-08-08T12:00")
        .expect("query")
        .is_empty());
}

#[test]
fn test_active_notices_sorted_by_window_start() {
    let (_dir, conn) = setup_test_db();
    insert_notice(&conn, "Second", "2026-08-08T11:00", "2026-08-08T18:00");
    insert_notice(&conn, "First", "2026-08-08T09:00", "2026-08-08T18:00");
    insert_notice(&conn, "Not yet", "2026-08-08T15:00", "2026-08-08T18:00");

    let active = notice::find_active(&conn, "2026-08-08T12:00").expect("query");
    let texts: Vec<&str> = active.iter().map(|n| n.text.as_str()).collect();

    assert_eq!(texts, vec!["First", "Second"]);
}

#[test]
fn test_create_update_delete() {
    let (_dir, conn) = setup_test_db();

    let new = NewNotice {
        text: "Fireworks at 19:30".to_string(),
        start_at: "2026-08-08T18:00".to_string(),
        end_at: "2026-08-08T20:00".to_string(),
    };
    let notice_id = notice::create(&conn, &new).expect("create");

    let changed = NewNotice {
        text: "Fireworks moved to 20:00".to_string(),
        start_at: "2026-08-08T18:00".to_string(),
        end_at: "2026-08-08T21:00".to_string(),
    };
    notice::update(&conn, notice_id, &changed).expect("update");

    let found = notice::find_by_id(&conn, notice_id)
        .expect("query")
        .expect("notice missing");
    assert_eq!(found.text, "Fireworks moved to 20:00");

    notice::delete(&conn, notice_id).expect("delete");
    assert!(notice::find_by_id(&conn, notice_id).expect("query").is_none());
}
