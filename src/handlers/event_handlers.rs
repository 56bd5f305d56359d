use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::auth::csrf;
use crate::clock;
use crate::config::Config;
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::event::{self, EventForm, NewEvent};
use crate::templates_structs::{EventFormTemplate, EventListTemplate, PageContext};

/// GET /admin/events
pub async fn list(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let events = event::find_all(&conn)?;
    let ctx = PageContext::build(&session, &config)?;
    render(EventListTemplate { ctx, events })
}

fn validate_event_form(form: &EventForm) -> Vec<String> {
    let mut errors = Vec::new();
    if form.name.trim().is_empty() {
        errors.push("Event name is required".to_string());
    }
    if form.location.trim().is_empty() {
        errors.push("Location is required".to_string());
    }
    if !clock::is_valid_stamp(&form.start_at) || !clock::is_valid_stamp(&form.end_at) {
        errors.push("Start and end must be valid date-times".to_string());
    } else if form.start_at >= form.end_at {
        errors.push("The event must start before it ends".to_string());
    }
    errors
}

fn to_new_event(form: &EventForm) -> NewEvent {
    let organizer = form.organizer.trim();
    NewEvent {
        name: form.name.trim().to_string(),
        organizer: (!organizer.is_empty()).then(|| organizer.to_string()),
        location: form.location.trim().to_string(),
        start_at: form.start_at.clone(),
        end_at: form.end_at.clone(),
    }
}

/// GET /admin/events/new
pub async fn new_form(
    config: web::Data<Config>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config)?;
    render(EventFormTemplate {
        ctx,
        form_action: "/admin/events".to_string(),
        form_title: "Create event".to_string(),
        event: None,
        errors: vec![],
    })
}

/// POST /admin/events
pub async fn create(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    session: Session,
    form: web::Form<EventForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let errors = validate_event_form(&form);
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &config)?;
        return render(EventFormTemplate {
            ctx,
            form_action: "/admin/events".to_string(),
            form_title: "Create event".to_string(),
            event: None,
            errors,
        });
    }

    let conn = pool.get()?;
    let new = to_new_event(&form);
    event::create(&conn, &new)?;

    let _ = session.insert("flash", format!("Event '{}' was created", new.name));
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/events"))
        .finish())
}

/// GET /admin/events/{id}/edit
pub async fn edit_form(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let event = event::find_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;
    let ctx = PageContext::build(&session, &config)?;
    let form_action = format!("/admin/events/{}", event.id);
    render(EventFormTemplate {
        ctx,
        form_action,
        form_title: "Edit event".to_string(),
        event: Some(event),
        errors: vec![],
    })
}

/// POST /admin/events/{id}
pub async fn update(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<EventForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let event = event::find_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;

    let errors = validate_event_form(&form);
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &config)?;
        let form_action = format!("/admin/events/{}", event.id);
        return render(EventFormTemplate {
            ctx,
            form_action,
            form_title: "Edit event".to_string(),
            event: Some(event),
            errors,
        });
    }

    event::update(&conn, event.id, &to_new_event(&form))?;

    let _ = session.insert("flash", "Event updated");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/events"))
        .finish())
}

/// POST /admin/events/{id}/delete
pub async fn delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<crate::handlers::auth_handlers::CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let event = event::find_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;
    event::delete(&conn, event.id)?;

    let _ = session.insert("flash", format!("Event '{}' was deleted", event.name));
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/events"))
        .finish())
}
