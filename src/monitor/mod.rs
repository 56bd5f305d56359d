//! The public monitor display engine.
//!
//! The monitor cycles through booth pages (seven booths at a time) and a
//! final upcoming-events page, while a marquee of active notices scrolls
//! along the bottom. Two independent periodic tasks drive it: a refresh
//! loop that re-reads booths and notices from the store, and a rotation
//! loop that advances the page cursor. Neither waits on the other; the
//! shared [`DisplayModel`] is replaced field-by-field under a lock, so
//! readers always see fully-formed lists.

pub mod cursor;
pub mod marquee;
pub mod model;
pub mod scheduler;
pub mod source;

pub use cursor::{PAGE_SIZE, PageCursor};
pub use model::{DisplayModel, MonitorPage, MonitorSnapshot, upcoming_events};
pub use scheduler::MonitorEngine;
pub use source::{DataSource, DbDataSource};
