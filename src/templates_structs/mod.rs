// Template context structures for Askama templates, organized by domain.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{get_email, get_is_admin, take_flash};
use crate::config::Config;
use crate::errors::AppError;

/// Common context shared by all authenticated pages.
/// Templates access these as `ctx.email`, `ctx.is_admin`, etc.
pub struct PageContext {
    pub email: String,
    pub is_admin: bool,
    pub flash: Option<String>,
    pub festival_name: String,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session, config: &Config) -> Result<Self, AppError> {
        let email = get_email(session)
            .map_err(|e| AppError::Session(format!("Failed to get email: {e}")))?;
        let is_admin = get_is_admin(session);
        let flash = take_flash(session);
        let csrf_token = csrf::get_or_create_token(session);
        Ok(Self {
            email,
            is_admin,
            flash,
            festival_name: config.festival_name.clone(),
            csrf_token,
        })
    }
}

mod account;
mod booth;
mod common;
mod event;
mod monitor;
mod notice;

pub use account::*;
pub use booth::*;
pub use common::*;
pub use event::*;
pub use monitor::*;
pub use notice::*;
