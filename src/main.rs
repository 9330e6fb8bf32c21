use actix_web::{App, HttpServer, middleware, web};
use actix_cors::Cors;
use evalhub::api::{configure_routes, AppState};
use evalhub::{banner, config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    banner::print_banner();

    // A missing .env is fine; the environment and defaults still apply.
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  Warning: Could not load .env file: {}", e);
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let app_config = config::AppConfig::from_env()
        .expect("Failed to load app configuration from environment");

    log::info!(
        "Serving fixture {} ({} mode)",
        app_config.fixture_path.display(),
        app_config.fixture_mode
    );

    let bind = (app_config.host.clone(), app_config.port);
    let state = AppState::new(app_config);

    println!("🚀 Starting server on http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    })
    .bind(bind)?
    .run()
    .await
}
