use std::time::Instant;

use actix_cors::Cors;
use actix_web::{
    middleware::Logger,
    web, App, HttpServer,
};
use env_logger::Env;
use log::{debug, info};

use crate::{
    config::{Config, Environment},
    db::Database,
    errors::AppError,
    handlers,
    middleware::{RequestLogger, RequestTimeout},
    routes, services,
    types::AppState,
};

// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;

// Setup logging with custom format and configuration
fn setup_logging(config: &Config) -> Result<(), AppError> {
    let log_level = match config.app.environment {
        Environment::Development => config.app.log_level.clone(),
        Environment::Testing => "debug,actix_web=info,sqlx=warn".to_string(),
        Environment::Production => "info,actix_web=warn,sqlx=warn".to_string(),
    };

    let env = Env::default()
        .filter_or("RUST_LOG", log_level)
        .write_style_or("RUST_LOG_STYLE", "always");

    env_logger::try_init_from_env(env)
        .map_err(|e| AppError::Logger(format!("Failed to initialize logger: {}", e)))
}

fn cors(environment: Environment) -> Cors {
    match environment {
        Environment::Production => Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allow_any_header()
            .max_age(3600),
        _ => Cors::permissive(),
    }
}

pub async fn server() -> AppResult<()> {
    let config = Config::load()?;
    setup_logging(&config)?;

    let start_time = Instant::now();

    info!("Starting {} v{}", config.app.name, config.app.version);
    info!("Environment: {:?}", config.app.environment);
    info!(
        "Binding to {}:{} with {} workers, request timeout {}s",
        config.server.host,
        config.server.port,
        config.server.workers,
        config.server.request_timeout_seconds
    );

    if config.app.environment == Environment::Development {
        debug!("Full configuration: {:?}", config);
    }

    let db = Database::connect(&config.db).await?;

    let verbose = config.app.environment != Environment::Production;
    let log_format = if verbose {
        "%a \"%r\" %s %b %T %{X-Request-ID}i"
    } else {
        "%a \"%r\" %s %b %T \"%{Referer}i\" \"%{User-Agent}i\" %{X-Request-ID}i"
    };

    let app_config = config.clone();
    let app_db = db.clone();

    HttpServer::new(move || {
        let db = app_db.clone();
        let json_limit = app_config.server.json_limit_bytes;

        App::new()
            .app_data(web::Data::new(AppState {
                start_time,
                version: app_config.app.version.clone(),
            }))
            .app_data(web::Data::new(db.clone()))
            .configure(|cfg| handlers::configure_extractors(cfg, json_limit))
            .configure(|cfg| services::register(&db, cfg))
            .wrap(RequestTimeout::new(app_config.server.request_timeout_seconds))
            .wrap(Logger::new(log_format))
            .wrap(cors(app_config.app.environment))
            // Outermost, so the access log sees the request id
            .wrap(RequestLogger::new(verbose))
            .configure(routes::configure_routes)
            .default_service(web::to(handlers::not_found))
    })
    .workers(config.server.workers)
    .bind((config.server.host.to_string(), config.server.port))?
    .run()
    .await?;

    db.shutdown().await;
    Ok(())
}
