use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use parlor::{config, db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = config::Config::from_env();

    // Ensure the database directory exists
    if let Some(dir) = std::path::Path::new(&config.database_path).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).expect("Failed to create data directory");
        }
    }

    // Initialize database
    let pool = db::init_pool(&config.database_path);
    db::run_migrations(&pool);

    // Session encryption key — load from SESSION_KEY env var for persistent sessions across restarts
    let secret_key = match std::env::var("SESSION_KEY") {
        Ok(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Ok(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+) — generating random key", val.len());
            Key::generate()
        }
        Err(_) => {
            log::warn!("No SESSION_KEY set — generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    log::info!("Starting server at http://{}", config.bind_addr);
    let bind_addr = config.bind_addr.clone();

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(false)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config.clone()))
            .configure(handlers::configure_api)
            .default_service(web::to(|| async {
                actix_web::HttpResponse::NotFound()
                    .json(serde_json::json!({ "error": "Not Found" }))
            }))
    })
    .bind(bind_addr)?
    .run()
    .await
}
