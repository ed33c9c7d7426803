use actix_web::{http::StatusCode, web, Responder};
use log::debug;

use crate::{
    errors::AppError,
    models::{Relation, RelationEnvelopeDto, RelationExistsDto, RelationResponseDto},
    repositories::RelationRepositoryTrait,
    services::RelationService,
    types::{ApiResponse, Result},
};

/// Idempotent create: 201 when the pair was inserted, 200 when it already existed
pub async fn create<R, T>(
    parent_id: web::Path<i64>,
    body: web::Json<RelationEnvelopeDto>,
    service: web::Data<RelationService<R, T>>,
) -> Result<impl Responder>
where
    R: Relation,
    T: RelationRepositoryTrait<R> + 'static,
{
    let child = body
        .into_inner()
        .relation
        .ok_or_else(|| AppError::BadRequest("relation is required".to_string()))?;
    let child_id = child.child_id::<R>().ok_or_else(|| {
        AppError::BadRequest(format!("relation.{} must be an integer", R::CHILD_COLUMN))
    })?;

    let (relation, created) = service.create(parent_id.into_inner(), child_id).await?;

    let (status, message) = if created {
        (StatusCode::CREATED, format!("Successfully created {}", R::NAME))
    } else {
        debug!("{} already present, returning stored row", R::NAME);
        (StatusCode::OK, format!("{} already exists", R::NAME))
    };
    Ok(ApiResponse::respond(
        status,
        message,
        RelationResponseDto { created, relation },
    ))
}

pub async fn get_all_by_parent_id<R, T>(
    parent_id: web::Path<i64>,
    service: web::Data<RelationService<R, T>>,
) -> Result<impl Responder>
where
    R: Relation,
    T: RelationRepositoryTrait<R> + 'static,
{
    let relations = service.get_all_by_parent_id(parent_id.into_inner()).await?;
    Ok(ApiResponse::respond(
        StatusCode::OK,
        format!("Retrieved {} rows of {}", relations.len(), R::NAME),
        relations,
    ))
}

pub async fn has_relation<R, T>(
    path: web::Path<(i64, i64)>,
    service: web::Data<RelationService<R, T>>,
) -> Result<impl Responder>
where
    R: Relation,
    T: RelationRepositoryTrait<R> + 'static,
{
    let (parent_id, child_id) = path.into_inner();
    let exists = service.has_relation(parent_id, child_id).await?;
    Ok(ApiResponse::respond(
        StatusCode::OK,
        format!("Checked {}", R::NAME),
        RelationExistsDto { exists },
    ))
}

pub async fn delete<R, T>(
    path: web::Path<(i64, i64)>,
    service: web::Data<RelationService<R, T>>,
) -> Result<impl Responder>
where
    R: Relation,
    T: RelationRepositoryTrait<R> + 'static,
{
    let (parent_id, child_id) = path.into_inner();
    service.delete(parent_id, child_id).await?;
    Ok(ApiResponse::empty(
        StatusCode::OK,
        format!("Successfully deleted {}", R::NAME),
    ))
}

/// Removes every relation of the parent; succeeds when there were none
pub async fn delete_all<R, T>(
    parent_id: web::Path<i64>,
    service: web::Data<RelationService<R, T>>,
) -> Result<impl Responder>
where
    R: Relation,
    T: RelationRepositoryTrait<R> + 'static,
{
    service.delete_all(parent_id.into_inner()).await?;
    Ok(ApiResponse::empty(
        StatusCode::OK,
        format!("Successfully deleted all {} rows", R::NAME),
    ))
}
