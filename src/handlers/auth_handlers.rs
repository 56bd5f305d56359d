use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

use crate::auth::rate_limit::RateLimiter;
use crate::auth::{csrf, password};
use crate::config::Config;
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::account;
use crate::templates_structs::LoginTemplate;

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

fn login_template(config: &Config, session: &Session, error: Option<String>) -> LoginTemplate {
    LoginTemplate {
        error,
        festival_name: config.festival_name.clone(),
        contact_name: config.contact_name.clone(),
        contact_email: config.contact_email.clone(),
        csrf_token: csrf::get_or_create_token(session),
    }
}

pub async fn login_page(
    config: web::Data<Config>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    // Already signed in: straight to the console.
    if session.get::<i64>("account_id").unwrap_or(None).is_some() {
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", "/"))
            .finish());
    }

    render(login_template(&config, &session, None))
}

pub async fn login_submit(
    req: HttpRequest,
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    session: Session,
    form: web::Form<LoginForm>,
    limiter: web::Data<RateLimiter>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    // Rate-limit check BEFORE any database access
    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or_else(|| std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));

    if limiter.is_blocked(ip) {
        return render(login_template(
            &config,
            &session,
            Some("Too many failed login attempts. Please try again later.".to_string()),
        ));
    }

    let conn = pool.get()?;
    let found = account::find_by_email(&conn, form.email.trim())?;

    match found {
        Some(acct) if password::verify_password(&form.password, &acct.password) == Ok(true) => {
            limiter.clear(ip);

            let _ = session.insert("account_id", acct.id);
            let _ = session.insert("email", &acct.email);
            let _ = session.insert("is_admin", acct.is_admin);
            let destination = if acct.is_admin { "/admin/booths" } else { "/" };
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", destination))
                .finish())
        }
        _ => {
            limiter.record_failure(ip);
            render(login_template(
                &config,
                &session,
                Some("Invalid email or password".to_string()),
            ))
        }
    }
}

pub async fn logout(session: Session, form: web::Form<CsrfOnly>) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session.purge();
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/login"))
        .finish())
}
