use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::auth::session::require_account;
use crate::auth::{csrf, password};
use crate::config::Config;
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::account::{self, AccountForm, AccountRoleForm, NewAccount};
use crate::templates_structs::{AccountFormTemplate, AccountListTemplate, PageContext};

/// GET /admin/accounts
pub async fn list(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let accounts = account::find_all_display(&conn)?;
    let current_account_id = require_account(&session)?;
    let ctx = PageContext::build(&session, &config)?;
    render(AccountListTemplate {
        ctx,
        accounts,
        current_account_id,
    })
}

fn validate_account_form(form: &AccountForm) -> Vec<String> {
    let mut errors = Vec::new();
    let email = form.email.trim();
    if email.is_empty() || !email.contains('@') {
        errors.push("A valid email address is required".to_string());
    }
    if form.password.len() < 8 {
        errors.push("Password must be at least 8 characters".to_string());
    }
    errors
}

/// GET /admin/accounts/new
pub async fn new_form(
    config: web::Data<Config>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config)?;
    render(AccountFormTemplate { ctx, errors: vec![] })
}

/// POST /admin/accounts
pub async fn create(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    session: Session,
    form: web::Form<AccountForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let errors = validate_account_form(&form);
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &config)?;
        return render(AccountFormTemplate { ctx, errors });
    }

    let hashed = match password::hash_password(&form.password) {
        Ok(hash) => hash,
        Err(_) => return Err(AppError::Hash("Password hash error".to_string())),
    };

    let new = NewAccount {
        email: form.email.trim().to_string(),
        password: hashed,
        is_admin: false,
    };

    let conn = pool.get()?;
    match account::create(&conn, &new) {
        Ok(_) => {
            let _ = session.insert("flash", format!("Account '{}' was created", new.email));
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/admin/accounts"))
                .finish())
        }
        Err(e) => {
            let msg = if e.to_string().contains("UNIQUE") {
                "An account with that email already exists".to_string()
            } else {
                format!("Error creating account: {e}")
            };
            let ctx = PageContext::build(&session, &config)?;
            render(AccountFormTemplate {
                ctx,
                errors: vec![msg],
            })
        }
    }
}

/// POST /admin/accounts/{id}/role — grant or revoke the admin claim.
/// Changing one's own claim is refused so an admin cannot lock themselves
/// out mid-session.
pub async fn set_role(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<AccountRoleForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let target_id = path.into_inner();
    let current_id = require_account(&session)?;
    if target_id == current_id {
        return Err(AppError::BadRequest(
            "Cannot change your own admin role".to_string(),
        ));
    }

    let is_admin = match form.is_admin.as_str() {
        "true" => true,
        "false" => false,
        _ => return Err(AppError::BadRequest("Invalid role value".to_string())),
    };

    let conn = pool.get()?;
    let target = account::find_by_id(&conn, target_id)?.ok_or(AppError::NotFound)?;
    account::set_admin(&conn, target.id, is_admin)?;
    log::info!("Set is_admin={is_admin} on account {}", target.id);

    let _ = session.insert("flash", format!("Updated role for '{}'", target.email));
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/accounts"))
        .finish())
}

/// POST /admin/accounts/{id}/delete — refused for one's own account and
/// while a booth is still attached.
pub async fn delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<crate::handlers::auth_handlers::CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let target_id = path.into_inner();
    let current_id = require_account(&session)?;
    if target_id == current_id {
        return Err(AppError::BadRequest(
            "Cannot delete your own account".to_string(),
        ));
    }

    let conn = pool.get()?;
    let target = account::find_by_id(&conn, target_id)?.ok_or(AppError::NotFound)?;

    if account::has_booth(&conn, target.id)? {
        let _ = session.insert(
            "flash",
            format!(
                "Cannot delete '{}': a booth is still attached to it",
                target.email
            ),
        );
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", "/admin/accounts"))
            .finish());
    }

    account::delete(&conn, target.id)?;
    log::info!("Deleted account {} ('{}')", target.id, target.email);

    let _ = session.insert("flash", format!("Account '{}' was deleted", target.email));
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/accounts"))
        .finish())
}

/// GET /admin/accounts/export.csv — spreadsheet-friendly account list.
/// The BOM keeps Excel from mangling non-ASCII booth names.
pub async fn export_csv(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let accounts = account::find_all_display(&conn)?;

    let mut csv = String::from("\u{feff}ID,Email,Role,Booth\n");
    for acct in accounts {
        let role = if acct.is_admin { "admin" } else { "general" };
        csv.push_str(&format!(
            "{},{},{},{}\n",
            acct.id,
            acct.email,
            role,
            csv_field(&acct.booth_name)
        ));
    }

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"accounts.csv\"",
        ))
        .body(csv))
}

/// Quote a field when it contains CSV metacharacters.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
