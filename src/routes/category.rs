use actix_web::web;

use crate::{
    handlers::{category, method_not_allowed},
    repositories::CategoryRepositoryTrait,
};

pub fn configure<T: CategoryRepositoryTrait + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/categories")
            .route(web::post().to(category::create::<T>))
            .route(web::get().to(category::get_all::<T>))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource("/categories/{id}")
            .route(web::get().to(category::get_by_id::<T>))
            .route(web::put().to(category::update::<T>))
            .route(web::delete().to(category::delete::<T>))
            .default_service(web::to(method_not_allowed)),
    );
}
