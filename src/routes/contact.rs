use actix_web::web;

use crate::{
    handlers::{contact, method_not_allowed},
    repositories::ContactRepositoryTrait,
};

pub fn configure<T: ContactRepositoryTrait + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/contacts")
            .route(web::post().to(contact::create::<T>))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource("/contacts/{id}")
            .route(web::get().to(contact::get_by_id::<T>))
            .route(web::delete().to(contact::delete::<T>))
            .default_service(web::to(method_not_allowed)),
    );
}
