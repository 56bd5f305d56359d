pub mod account_handlers;
pub mod auth_handlers;
pub mod booth_handlers;
pub mod console_handlers;
pub mod event_handlers;
pub mod monitor_handlers;
pub mod notice_handlers;
