use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::auth::csrf;
use crate::config::Config;
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::account;
use crate::models::booth::{self, BoothForm, NewBooth};
use crate::templates_structs::{BoothFormTemplate, BoothListTemplate, PageContext};

/// GET /admin/booths
pub async fn list(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let booths = booth::find_all(&conn)?;
    let ctx = PageContext::build(&session, &config)?;
    render(BoothListTemplate { ctx, booths })
}

fn validate_booth_form(form: &BoothForm) -> Vec<String> {
    let mut errors = Vec::new();
    if form.name.trim().is_empty() {
        errors.push("Booth name is required".to_string());
    }
    if form.organizer.trim().is_empty() {
        errors.push("Organizer is required".to_string());
    }
    if form.location.trim().is_empty() {
        errors.push("Location is required".to_string());
    }
    errors
}

fn optional(field: &str) -> Option<String> {
    let trimmed = field.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// GET /admin/booths/new
pub async fn new_form(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let accounts = account::find_without_booth(&conn)?;
    let ctx = PageContext::build(&session, &config)?;
    render(BoothFormTemplate {
        ctx,
        form_action: "/admin/booths".to_string(),
        form_title: "Create booth".to_string(),
        booth: None,
        accounts,
        errors: vec![],
    })
}

/// POST /admin/booths
pub async fn create(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    session: Session,
    form: web::Form<BoothForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let mut errors = validate_booth_form(&form);

    // The booth is keyed to an existing account; the console finds it there.
    let account_id = match form.account_id.trim().parse::<i64>() {
        Ok(id) => match account::find_by_id(&conn, id)? {
            Some(acct) => {
                if booth::find_by_account_id(&conn, acct.id)?.is_some() {
                    errors.push("That account already has a booth".to_string());
                }
                Some(acct.id)
            }
            None => {
                errors.push("Account not found".to_string());
                None
            }
        },
        Err(_) => {
            errors.push("Select an account".to_string());
            None
        }
    };

    let account_id = match (account_id, errors.is_empty()) {
        (Some(id), true) => id,
        _ => {
            let accounts = account::find_without_booth(&conn)?;
            let ctx = PageContext::build(&session, &config)?;
            return render(BoothFormTemplate {
                ctx,
                form_action: "/admin/booths".to_string(),
                form_title: "Create booth".to_string(),
                booth: None,
                accounts,
                errors,
            });
        }
    };

    let new = NewBooth {
        account_id,
        name: form.name.trim().to_string(),
        organizer: form.organizer.trim().to_string(),
        location: form.location.trim().to_string(),
        floor: optional(&form.floor),
        area: optional(&form.area),
    };
    let booth_id = booth::create(&conn, &new)?;
    log::info!("Created booth {booth_id} ('{}')", new.name);

    let _ = session.insert("flash", format!("Booth '{}' was created", new.name));
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/booths"))
        .finish())
}

/// GET /admin/booths/{id}/edit
pub async fn edit_form(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let booth = booth::find_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;
    let ctx = PageContext::build(&session, &config)?;
    let form_action = format!("/admin/booths/{}", booth.id);
    render(BoothFormTemplate {
        ctx,
        form_action,
        form_title: "Edit booth".to_string(),
        booth: Some(booth),
        accounts: vec![],
        errors: vec![],
    })
}

/// POST /admin/booths/{id} — update descriptive fields only; live status
/// belongs to the booth console.
pub async fn update(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<BoothForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let booth = booth::find_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;

    let errors = validate_booth_form(&form);
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &config)?;
        let form_action = format!("/admin/booths/{}", booth.id);
        return render(BoothFormTemplate {
            ctx,
            form_action,
            form_title: "Edit booth".to_string(),
            booth: Some(booth),
            accounts: vec![],
            errors,
        });
    }

    booth::update_info(
        &conn,
        booth.id,
        form.name.trim(),
        form.organizer.trim(),
        form.location.trim(),
        optional(&form.floor).as_deref(),
        optional(&form.area).as_deref(),
    )?;

    let _ = session.insert("flash", "Booth updated");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/booths"))
        .finish())
}

/// POST /admin/booths/{id}/delete
pub async fn delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<crate::handlers::auth_handlers::CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let booth = booth::find_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;
    booth::delete(&conn, booth.id)?;
    log::info!("Deleted booth {} ('{}')", booth.id, booth.name);

    let _ = session.insert("flash", format!("Booth '{}' was deleted", booth.name));
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/booths"))
        .finish())
}
