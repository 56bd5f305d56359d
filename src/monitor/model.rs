use serde::Serialize;

use crate::models::booth::Booth;
use crate::models::event::Event;
use crate::monitor::cursor::{PAGE_SIZE, PageCursor};
use crate::monitor::marquee;

/// In-memory state behind the monitor display. Each list is replaced
/// wholesale by the refresh loop; the cursor is advanced by the rotation
/// loop. Readers take a snapshot, never the model itself.
#[derive(Debug, Default)]
pub struct DisplayModel {
    /// Booths sorted by organizer, the order the monitor pages through.
    pub booths: Vec<Booth>,
    /// Active notice texts, sorted by window start.
    pub notices: Vec<String>,
    /// Events that have not started yet, sorted by start time.
    pub upcoming_events: Vec<Event>,
    pub cursor: PageCursor,
}

/// What the monitor shows right now: a slice of booths or the final
/// upcoming-events page.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MonitorPage {
    Booths { booths: Vec<Booth> },
    Events { events: Vec<Event> },
}

/// Serializable view of the current display state, handed to the monitor
/// page as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorSnapshot {
    pub page_index: usize,
    pub total_booth_pages: usize,
    pub page: MonitorPage,
    pub marquee_text: String,
    pub marquee_duration_secs: f64,
}

impl DisplayModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// The page the cursor currently rests on. Booth slices truncate
    /// naturally on the last partial page; the events page shows at most
    /// `PAGE_SIZE` upcoming events.
    pub fn current_page(&self) -> MonitorPage {
        if self.cursor.on_events_page(self.booths.len()) {
            MonitorPage::Events {
                events: self.upcoming_events.iter().take(PAGE_SIZE).cloned().collect(),
            }
        } else {
            let start = self.cursor.page_index() * PAGE_SIZE;
            MonitorPage::Booths {
                booths: self
                    .booths
                    .iter()
                    .skip(start)
                    .take(PAGE_SIZE)
                    .cloned()
                    .collect(),
            }
        }
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        MonitorSnapshot {
            page_index: self.cursor.page_index(),
            total_booth_pages: PageCursor::total_booth_pages(self.booths.len()),
            page: self.current_page(),
            marquee_text: marquee::join_notices(&self.notices),
            marquee_duration_secs: marquee::duration_secs(&self.notices),
        }
    }
}

/// Events from `events` that start strictly after `now`, in start order.
/// Derived fresh each refresh; never stored.
pub fn upcoming_events(events: &[Event], now: &str) -> Vec<Event> {
    let mut upcoming: Vec<Event> = events
        .iter()
        .filter(|e| e.start_at.as_str() > now)
        .cloned()
        .collect();
    upcoming.sort_by(|a, b| a.start_at.cmp(&b.start_at));
    upcoming
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: i64, start_at: &str) -> Event {
        Event {
            id,
            name: format!("Event {id}"),
            organizer: None,
            location: "Main stage".to_string(),
            start_at: start_at.to_string(),
            end_at: "2099-01-01T00:00".to_string(),
        }
    }

    #[test]
    fn upcoming_filters_strictly_after_now() {
        let events = vec![
            event(1, "2026-08-08T10:00"),
            event(2, "2026-08-08T12:00"),
            event(3, "2026-08-08T14:00"),
        ];
        let upcoming = upcoming_events(&events, "2026-08-08T12:00");
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].id, 3);
    }

    #[test]
    fn upcoming_is_sorted_by_start() {
        let events = vec![
            event(1, "2026-08-08T18:00"),
            event(2, "2026-08-08T12:00"),
            event(3, "2026-08-08T15:00"),
        ];
        let upcoming = upcoming_events(&events, "2026-08-08T00:00");
        let ids: Vec<i64> = upcoming.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn empty_model_snapshot_is_events_page() {
        let model = DisplayModel::new();
        let snapshot = model.snapshot();
        assert_eq!(snapshot.page_index, 0);
        assert_eq!(snapshot.total_booth_pages, 0);
        assert!(matches!(snapshot.page, MonitorPage::Events { ref events } if events.is_empty()));
        assert_eq!(snapshot.marquee_duration_secs, 10.0);
    }
}
