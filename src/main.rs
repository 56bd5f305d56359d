use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use matsuri::auth::{self, rate_limit::RateLimiter};
use matsuri::config::Config;
use matsuri::db;
use matsuri::handlers;
use matsuri::models::event;
use matsuri::monitor::{DbDataSource, MonitorEngine};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    // Ensure data directory exists
    if let Some(parent) = std::path::Path::new(&config.database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).expect("Failed to create data directory");
        }
    }

    // Initialize database
    let pool = db::init_pool(&config.database_path);
    db::run_migrations(&pool);

    let admin_hash = auth::password::hash_password(&config.admin_password)
        .expect("Failed to hash seed admin password");
    db::seed_admin(&pool, &config.admin_email, &admin_hash);

    // Session encryption key — load from SESSION_KEY env var for persistent sessions across restarts
    let secret_key = match std::env::var("SESSION_KEY") {
        Ok(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Ok(val) => {
            log::warn!(
                "SESSION_KEY too short ({} bytes, need 64+) — generating random key",
                val.len()
            );
            Key::generate()
        }
        Err(_) => {
            log::warn!("No SESSION_KEY set — generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    // The monitor's event list is captured once at boot; "upcoming" is
    // re-derived from it against the wall clock on every refresh.
    let events = {
        let conn = pool.get().expect("Failed to get connection for event preload");
        event::find_all(&conn).expect("Failed to load events for the monitor")
    };
    let engine = web::Data::new(MonitorEngine::new(
        Arc::new(DbDataSource::new(pool.clone())),
        events,
        config.monitor,
    ));
    engine.start();

    let limiter = web::Data::new(RateLimiter::new());
    let config_data = web::Data::new(config.clone());

    log::info!("Starting server at http://{}", config.bind_addr);

    let engine_handle = engine.clone();
    let server = HttpServer::new(move || {
        let session_mw =
            SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                .cookie_secure(false)
                .cookie_http_only(true)
                .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(engine.clone())
            .app_data(limiter.clone())
            .app_data(config_data.clone())
            // Static files
            .service(actix_files::Files::new("/static", "./static"))
            // Public routes
            .route("/login", web::get().to(handlers::auth_handlers::login_page))
            .route("/login", web::post().to(handlers::auth_handlers::login_submit))
            .route("/monitor", web::get().to(handlers::monitor_handlers::page))
            .route("/api/monitor/state", web::get().to(handlers::monitor_handlers::state))
            .route("/api/booths/list", web::get().to(handlers::monitor_handlers::booths_list))
            .route("/api/notices", web::get().to(handlers::monitor_handlers::notices))
            // Admin routes — registered before the catch-all scope below
            .service(
                web::scope("/admin")
                    .wrap(actix_web::middleware::from_fn(auth::middleware::require_admin))
                    // Booth CRUD — /booths/new BEFORE /booths/{id} to avoid routing conflict
                    .route("/booths", web::get().to(handlers::booth_handlers::list))
                    .route("/booths/new", web::get().to(handlers::booth_handlers::new_form))
                    .route("/booths", web::post().to(handlers::booth_handlers::create))
                    .route("/booths/{id}/edit", web::get().to(handlers::booth_handlers::edit_form))
                    .route("/booths/{id}", web::post().to(handlers::booth_handlers::update))
                    .route("/booths/{id}/delete", web::post().to(handlers::booth_handlers::delete))
                    // Event CRUD
                    .route("/events", web::get().to(handlers::event_handlers::list))
                    .route("/events/new", web::get().to(handlers::event_handlers::new_form))
                    .route("/events", web::post().to(handlers::event_handlers::create))
                    .route("/events/{id}/edit", web::get().to(handlers::event_handlers::edit_form))
                    .route("/events/{id}", web::post().to(handlers::event_handlers::update))
                    .route("/events/{id}/delete", web::post().to(handlers::event_handlers::delete))
                    // Notice CRUD
                    .route("/notices", web::get().to(handlers::notice_handlers::list))
                    .route("/notices/new", web::get().to(handlers::notice_handlers::new_form))
                    .route("/notices", web::post().to(handlers::notice_handlers::create))
                    .route("/notices/{id}/edit", web::get().to(handlers::notice_handlers::edit_form))
                    .route("/notices/{id}", web::post().to(handlers::notice_handlers::update))
                    .route("/notices/{id}/delete", web::post().to(handlers::notice_handlers::delete))
                    // Accounts
                    .route("/accounts", web::get().to(handlers::account_handlers::list))
                    .route("/accounts/new", web::get().to(handlers::account_handlers::new_form))
                    .route("/accounts", web::post().to(handlers::account_handlers::create))
                    .route("/accounts/export.csv", web::get().to(handlers::account_handlers::export_csv))
                    .route("/accounts/{id}/role", web::post().to(handlers::account_handlers::set_role))
                    .route("/accounts/{id}/delete", web::post().to(handlers::account_handlers::delete)),
            )
            // Booth console — any signed-in account
            .service(
                web::scope("")
                    .wrap(actix_web::middleware::from_fn(auth::middleware::require_auth))
                    .route("/", web::get().to(handlers::console_handlers::form))
                    .route("/", web::post().to(handlers::console_handlers::submit))
                    .route("/logout", web::post().to(handlers::auth_handlers::logout)),
            )
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                let html = include_str!("../templates/errors/404.html");
                actix_web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(html)
            }))
    })
    .bind(&config.bind_addr)?
    .run();

    let result = server.await;
    engine_handle.stop();
    result
}
