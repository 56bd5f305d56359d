use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::auth::csrf;
use crate::auth::session::require_account;
use crate::config::Config;
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::booth::{self, BoothLiveForm, BoothStatus};
use crate::templates_structs::{ConsoleTemplate, PageContext};

/// GET / — the booth console: the signed-in account's booth with a
/// status/wait/memo form, or a notice that no booth is attached.
pub async fn form(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let account_id = require_account(&session)?;
    let conn = pool.get()?;
    let booth = booth::find_by_account_id(&conn, account_id)?;

    let ctx = PageContext::build(&session, &config)?;
    render(ConsoleTemplate {
        ctx,
        booth,
        statuses: BoothStatus::ALL.to_vec(),
        errors: vec![],
    })
}

fn validate_live_form(form: &BoothLiveForm) -> (Option<BoothStatus>, Option<i64>, Vec<String>) {
    let mut errors = Vec::new();

    let status = BoothStatus::parse(&form.status);
    if status.is_none() {
        errors.push("Select a valid status".to_string());
    }

    let waiting = match form.waiting.trim().parse::<i64>() {
        Ok(mins) if mins >= 0 => Some(mins),
        _ => {
            errors.push("Wait time must be a whole number of minutes (0 or more)".to_string());
            None
        }
    };

    (status, waiting, errors)
}

/// POST / — update the live fields of the signed-in account's booth.
pub async fn submit(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    session: Session,
    form: web::Form<BoothLiveForm>,
) -> Result<HttpResponse, AppError> {
    let account_id = require_account(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let booth = booth::find_by_account_id(&conn, account_id)?.ok_or(AppError::NotFound)?;

    let (status, waiting) = match validate_live_form(&form) {
        (Some(status), Some(waiting), _) => (status, waiting),
        (_, _, errors) => {
            let ctx = PageContext::build(&session, &config)?;
            return render(ConsoleTemplate {
                ctx,
                booth: Some(booth),
                statuses: BoothStatus::ALL.to_vec(),
                errors,
            });
        }
    };

    let memo = form.memo.trim();
    let memo = (!memo.is_empty()).then_some(memo);
    booth::update_live(&conn, booth.id, status, waiting, memo)?;

    let _ = session.insert("flash", "Booth status updated");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/"))
        .finish())
}
