use actix_session::Session;

use crate::errors::AppError;

pub fn get_account_id(session: &Session) -> Option<i64> {
    session.get::<i64>("account_id").unwrap_or(None)
}

pub fn get_email(session: &Session) -> Result<String, String> {
    match session.get::<String>("email") {
        Ok(Some(email)) => Ok(email),
        Ok(None) => Err("No email in session".to_string()),
        Err(e) => Err(format!("Session error: {e}")),
    }
}

pub fn get_is_admin(session: &Session) -> bool {
    session.get::<bool>("is_admin").unwrap_or(None).unwrap_or(false)
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>("flash").unwrap_or(None);
    if flash.is_some() {
        session.remove("flash");
    }
    flash
}

/// Account id of the signed-in user, or an error that restarts the login flow.
pub fn require_account(session: &Session) -> Result<i64, AppError> {
    get_account_id(session).ok_or_else(|| AppError::Session("No account in session".to_string()))
}
