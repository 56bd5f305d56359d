use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::rt::task::JoinHandle;

use crate::clock;
use crate::config::MonitorSettings;
use crate::models::event::Event;
use crate::monitor::model::{self, DisplayModel, MonitorSnapshot};
use crate::monitor::source::DataSource;

/// Owns the display model and the two periodic tasks driving it.
///
/// `start()` spawns a refresh loop (immediate first cycle, then every
/// `refresh_interval_mins`) and a rotation loop (first advance one full
/// period after start). The loops share nothing but the model lock and the
/// liveness flag; a refresh may straddle a rotation tick and vice versa.
/// `stop()` is idempotent and guarantees no cycle runs after it returns;
/// a fetch already in flight checks the flag before writing and discards
/// its result silently.
pub struct MonitorEngine {
    model: Arc<Mutex<DisplayModel>>,
    source: Arc<dyn DataSource>,
    /// Event list captured at engine construction; "upcoming" is re-derived
    /// from it against the wall clock on every refresh.
    events: Arc<Vec<Event>>,
    settings: MonitorSettings,
    alive: Arc<AtomicBool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl MonitorEngine {
    pub fn new(source: Arc<dyn DataSource>, events: Vec<Event>, settings: MonitorSettings) -> Self {
        Self {
            model: Arc::new(Mutex::new(DisplayModel::new())),
            source,
            events: Arc::new(events),
            settings,
            // Live from construction until `stop()`; `start()` re-arms it.
            alive: Arc::new(AtomicBool::new(true)),
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Spawn the refresh and rotation loops. A second call while running is
    /// a no-op.
    pub fn start(&self) {
        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        if !tasks.is_empty() {
            return;
        }
        self.alive.store(true, Ordering::SeqCst);

        let refresh_period = Duration::from_secs(self.settings.refresh_interval_mins * 60);
        let source = Arc::clone(&self.source);
        let events = Arc::clone(&self.events);
        let model = Arc::clone(&self.model);
        let alive = Arc::clone(&self.alive);
        tasks.push(actix_web::rt::spawn(async move {
            // The first tick completes immediately: one fetch cycle up front.
            let mut interval = tokio::time::interval(refresh_period);
            loop {
                interval.tick().await;
                if !alive.load(Ordering::SeqCst) {
                    break;
                }
                refresh_cycle(source.as_ref(), &events, &model, &alive);
            }
        }));

        let rotation_period = Duration::from_secs(self.settings.rotation_duration_secs);
        let model = Arc::clone(&self.model);
        let alive = Arc::clone(&self.alive);
        tasks.push(actix_web::rt::spawn(async move {
            let mut interval = tokio::time::interval(rotation_period);
            // Swallow the immediate tick; the first page holds for one full
            // period before the cursor moves.
            interval.tick().await;
            loop {
                interval.tick().await;
                if !alive.load(Ordering::SeqCst) {
                    break;
                }
                advance_page(&model);
            }
        }));
    }

    /// Cancel both loops. Safe to call any number of times.
    pub fn stop(&self) {
        self.alive.store(false, Ordering::SeqCst);
        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        for task in tasks.drain(..) {
            task.abort();
        }
    }

    /// Run one fetch cycle right now, outside the timer.
    pub fn refresh_once(&self) {
        refresh_cycle(self.source.as_ref(), &self.events, &self.model, &self.alive);
    }

    /// Advance the page cursor once, outside the timer.
    pub fn advance_once(&self) {
        advance_page(&self.model);
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        self.model
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .snapshot()
    }
}

impl Drop for MonitorEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One fetch cycle. The three updates are independent: a failed fetch is
/// logged and leaves its field at the last known value while the others
/// still apply. Results arriving after `stop()` are discarded unlogged.
fn refresh_cycle(
    source: &dyn DataSource,
    events: &[Event],
    model: &Mutex<DisplayModel>,
    alive: &AtomicBool,
) {
    let now = clock::now_stamp();
    let booths = source.fetch_booths();
    let notices = source.fetch_notice_texts(&now);
    let upcoming = model::upcoming_events(events, &now);

    if !alive.load(Ordering::SeqCst) {
        return;
    }

    let mut m = model.lock().unwrap_or_else(|e| e.into_inner());
    match booths {
        Ok(booths) => m.booths = booths,
        Err(e) => log::error!("Monitor refresh: booth fetch failed: {e}"),
    }
    match notices {
        Ok(notices) => m.notices = notices,
        Err(e) => log::error!("Monitor refresh: notice fetch failed: {e}"),
    }
    m.upcoming_events = upcoming;
}

/// One rotation tick. Reads the booth count fresh from the model so the
/// cursor stays in range even when a refresh shrank the list mid-rotation.
fn advance_page(model: &Mutex<DisplayModel>) {
    let mut m = model.lock().unwrap_or_else(|e| e.into_inner());
    let booth_count = m.booths.len();
    m.cursor.advance(booth_count);
}
