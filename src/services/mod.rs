use std::sync::Arc;

use actix_web::web;

mod address;
mod category;
mod client;
mod contact;
mod relation;
mod supplier;
mod supplier_full;

pub use address::AddressService;
pub use category::CategoryService;
pub use client::ClientService;
pub use contact::ContactService;
pub use relation::RelationService;
pub use supplier::SupplierService;
pub use supplier_full::SupplierFullService;

use crate::{
    db::Database,
    models::{
        ProductCategoryRelation, SupplierCategoryRelation, SupplierContactRelation,
        UserCategoryRelation,
    },
    repositories::{
        AddressRepository, CategoryRepository, ClientRepository, ContactRepository,
        PgRelationRepository, SupplierFullRepository, SupplierRepository,
    },
};

pub type PgRelationService<R> = RelationService<R, PgRelationRepository<R>>;

fn relation_service<R: crate::models::Relation>(db: &Database) -> web::Data<PgRelationService<R>> {
    web::Data::new(RelationService::new(Arc::new(PgRelationRepository::<R>::new(db))))
}

/// Service Register
pub fn register(db: &Database, cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::Data::new(CategoryService::new(Arc::new(
        CategoryRepository::new(db),
    ))))
    .app_data(web::Data::new(ClientService::new(Arc::new(
        ClientRepository::new(db),
    ))))
    .app_data(web::Data::new(SupplierService::new(Arc::new(
        SupplierRepository::new(db),
    ))))
    .app_data(web::Data::new(AddressService::new(Arc::new(
        AddressRepository::new(db),
    ))))
    .app_data(web::Data::new(ContactService::new(Arc::new(
        ContactRepository::new(db),
    ))))
    .app_data(web::Data::new(SupplierFullService::new(Arc::new(
        SupplierFullRepository::new(db),
    ))));

    // One service per join table
    cfg.app_data(relation_service::<ProductCategoryRelation>(db))
        .app_data(relation_service::<SupplierCategoryRelation>(db))
        .app_data(relation_service::<UserCategoryRelation>(db))
        .app_data(relation_service::<SupplierContactRelation>(db));
}
