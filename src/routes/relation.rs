use actix_web::web;

use crate::{
    handlers::{method_not_allowed, relation},
    models::Relation,
    repositories::RelationRepositoryTrait,
};

/// Mounts the relation endpoints under `path`, which must contain the parent
/// `{id}` segment (e.g. `/products/{id}/categories`)
pub fn configure<R, T>(cfg: &mut web::ServiceConfig, path: &str)
where
    R: Relation,
    T: RelationRepositoryTrait<R> + 'static,
{
    cfg.service(
        web::resource(path.to_string())
            .route(web::post().to(relation::create::<R, T>))
            .route(web::get().to(relation::get_all_by_parent_id::<R, T>))
            .route(web::delete().to(relation::delete_all::<R, T>))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource(format!("{}/{{child_id}}", path))
            .route(web::get().to(relation::has_relation::<R, T>))
            .route(web::delete().to(relation::delete::<R, T>))
            .default_service(web::to(method_not_allowed)),
    );
}
