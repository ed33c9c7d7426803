use actix_web::{http::StatusCode, web, Responder};

use crate::{
    db::{DBHealthStatus, Database, HealthProbe},
    models::{
        ProductCategoryRelation, SupplierCategoryRelation, SupplierContactRelation,
        UserCategoryRelation,
    },
    repositories::{
        AddressRepository, CategoryRepository, ClientRepository, ContactRepository,
        PgRelationRepository, SupplierFullRepository, SupplierRepository,
    },
    types::{ApiResponse, AppState, HealthStatus},
};

pub mod address;
pub mod category;
pub mod client;
pub mod contact;
pub mod relation;
pub mod supplier;

pub const PRODUCT_CATEGORIES_PATH: &str = "/products/{id}/categories";
pub const SUPPLIER_CATEGORIES_PATH: &str = "/suppliers/{id}/categories";
pub const USER_CATEGORIES_PATH: &str = "/users/{id}/categories";
pub const SUPPLIER_CONTACTS_PATH: &str = "/suppliers/{id}/contacts";

// Handler function for the root route "/"
async fn index() -> impl Responder {
    ApiResponse::empty(StatusCode::OK, "Welcome to the backend store API")
}

// Handler function for the health check endpoint
async fn health_check<H: HealthProbe + 'static>(
    data: web::Data<AppState>,
    db: web::Data<H>,
) -> impl Responder {
    let uptime = data.start_time.elapsed().as_secs();
    let db_health = db.health_check().await;

    let healthy = matches!(db_health.status, DBHealthStatus::Healthy);
    let health = HealthStatus {
        status: String::from(if healthy { "OK" } else { "DEGRADED" }),
        version: data.version.clone(),
        db_health: Some(db_health),
        uptime_seconds: uptime,
    };

    if healthy {
        ApiResponse::respond(StatusCode::OK, "Service is healthy", health)
    } else {
        ApiResponse::respond(
            StatusCode::SERVICE_UNAVAILABLE,
            "Database is unavailable",
            health,
        )
    }
}

// Configure all routes function
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index));
    cfg.route("/health", web::get().to(health_check::<Database>));

    category::configure::<CategoryRepository>(cfg);
    client::configure::<ClientRepository>(cfg);
    // `/suppliers/full` before `/suppliers/{id}`
    supplier::configure_full::<SupplierFullRepository>(cfg);
    supplier::configure::<SupplierRepository>(cfg);
    address::configure::<AddressRepository>(cfg);
    contact::configure::<ContactRepository>(cfg);

    relation::configure::<ProductCategoryRelation, PgRelationRepository<ProductCategoryRelation>>(
        cfg,
        PRODUCT_CATEGORIES_PATH,
    );
    relation::configure::<SupplierCategoryRelation, PgRelationRepository<SupplierCategoryRelation>>(
        cfg,
        SUPPLIER_CATEGORIES_PATH,
    );
    relation::configure::<UserCategoryRelation, PgRelationRepository<UserCategoryRelation>>(
        cfg,
        USER_CATEGORIES_PATH,
    );
    relation::configure::<SupplierContactRelation, PgRelationRepository<SupplierContactRelation>>(
        cfg,
        SUPPLIER_CONTACTS_PATH,
    );
}
