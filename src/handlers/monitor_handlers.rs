use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::clock;
use crate::config::Config;
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::{booth, notice};
use crate::monitor::MonitorEngine;
use crate::templates_structs::MonitorTemplate;

/// GET /monitor — the public rotating display. The page is a shell; it
/// polls /api/monitor/state and renders whatever the engine says.
pub async fn page(config: web::Data<Config>) -> Result<HttpResponse, AppError> {
    render(MonitorTemplate {
        festival_name: config.festival_name.clone(),
    })
}

/// GET /api/monitor/state — current page and marquee timing as JSON.
pub async fn state(engine: web::Data<MonitorEngine>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(engine.snapshot()))
}

/// GET /api/booths/list — all booths in monitor order, unauthenticated.
pub async fn booths_list(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let booths = booth::find_all_by_organizer(&conn)?;
    Ok(HttpResponse::Ok().json(json!({ "booths": booths })))
}

/// GET /api/notices — currently-active notices, unauthenticated.
pub async fn notices(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let notices = notice::find_active(&conn, &clock::now_stamp())?;
    Ok(HttpResponse::Ok().json(json!({ "notices": notices })))
}
