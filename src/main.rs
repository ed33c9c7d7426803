use std::process;

use log::error;

mod app;
mod config;
mod db;
mod errors;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod types;
mod utils;
mod validations;

use errors::AppError;

/// Process exit status for a fatal startup or runtime error
fn exit_code(err: &AppError) -> i32 {
    match err {
        AppError::Config(_) => 2,
        AppError::Logger(_) => 3,
        AppError::Database(_) => 4,
        _ => 1,
    }
}

#[actix_web::main]
async fn main() {
    if let Err(err) = app::server().await {
        let code = exit_code(&err);
        match err {
            // The logger is not initialised yet for these two
            AppError::Config(_) | AppError::Logger(_) => eprintln!("Fatal: {}", err),
            _ => error!("Fatal: {}", err),
        }
        process::exit(code);
    }
}
