use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::auth::csrf;
use crate::clock;
use crate::config::Config;
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::notice::{self, NewNotice, NoticeForm};
use crate::templates_structs::{NoticeFormTemplate, NoticeListTemplate, PageContext};

/// GET /admin/notices
pub async fn list(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let notices = notice::find_all(&conn)?;
    let ctx = PageContext::build(&session, &config)?;
    render(NoticeListTemplate { ctx, notices })
}

fn validate_notice_form(form: &NoticeForm) -> Vec<String> {
    let mut errors = Vec::new();
    if form.text.trim().is_empty() {
        errors.push("Notice text is required".to_string());
    }
    if !clock::is_valid_stamp(&form.start_at) || !clock::is_valid_stamp(&form.end_at) {
        errors.push("Start and end must be valid date-times".to_string());
    } else if form.start_at >= form.end_at {
        errors.push("The display window must start before it ends".to_string());
    }
    errors
}

fn to_new_notice(form: &NoticeForm) -> NewNotice {
    NewNotice {
        text: form.text.trim().to_string(),
        start_at: form.start_at.clone(),
        end_at: form.end_at.clone(),
    }
}

/// GET /admin/notices/new
pub async fn new_form(
    config: web::Data<Config>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config)?;
    render(NoticeFormTemplate {
        ctx,
        form_action: "/admin/notices".to_string(),
        form_title: "Create notice".to_string(),
        notice: None,
        errors: vec![],
    })
}

/// POST /admin/notices
pub async fn create(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    session: Session,
    form: web::Form<NoticeForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let errors = validate_notice_form(&form);
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &config)?;
        return render(NoticeFormTemplate {
            ctx,
            form_action: "/admin/notices".to_string(),
            form_title: "Create notice".to_string(),
            notice: None,
            errors,
        });
    }

    let conn = pool.get()?;
    notice::create(&conn, &to_new_notice(&form))?;

    let _ = session.insert("flash", "Notice created");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/notices"))
        .finish())
}

/// GET /admin/notices/{id}/edit
pub async fn edit_form(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let notice = notice::find_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;
    let ctx = PageContext::build(&session, &config)?;
    let form_action = format!("/admin/notices/{}", notice.id);
    render(NoticeFormTemplate {
        ctx,
        form_action,
        form_title: "Edit notice".to_string(),
        notice: Some(notice),
        errors: vec![],
    })
}

/// POST /admin/notices/{id}
pub async fn update(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<NoticeForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let notice = notice::find_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;

    let errors = validate_notice_form(&form);
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &config)?;
        let form_action = format!("/admin/notices/{}", notice.id);
        return render(NoticeFormTemplate {
            ctx,
            form_action,
            form_title: "Edit notice".to_string(),
            notice: Some(notice),
            errors,
        });
    }

    notice::update(&conn, notice.id, &to_new_notice(&form))?;

    let _ = session.insert("flash", "Notice updated");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/notices"))
        .finish())
}

/// POST /admin/notices/{id}/delete
pub async fn delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<crate::handlers::auth_handlers::CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let notice = notice::find_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;
    notice::delete(&conn, notice.id)?;

    let _ = session.insert("flash", "Notice deleted");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/notices"))
        .finish())
}
