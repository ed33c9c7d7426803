use actix_web::{http::StatusCode, web, Responder};

use crate::{
    models::ContactDto,
    repositories::ContactRepositoryTrait,
    services::ContactService,
    types::{ApiResponse, Result},
};

pub async fn create<T: ContactRepositoryTrait + 'static>(
    dto: web::Json<ContactDto>,
    service: web::Data<ContactService<T>>,
) -> Result<impl Responder> {
    let contact = service.create(dto.into_inner().into()).await?;
    Ok(ApiResponse::respond(
        StatusCode::CREATED,
        "Successfully created contact",
        contact,
    ))
}

pub async fn get_by_id<T: ContactRepositoryTrait + 'static>(
    id: web::Path<i64>,
    service: web::Data<ContactService<T>>,
) -> Result<impl Responder> {
    let contact = service.get_by_id(id.into_inner()).await?;
    Ok(ApiResponse::respond(
        StatusCode::OK,
        "Successfully retrieved contact",
        contact,
    ))
}

pub async fn delete<T: ContactRepositoryTrait + 'static>(
    id: web::Path<i64>,
    service: web::Data<ContactService<T>>,
) -> Result<impl Responder> {
    let id = id.into_inner();
    service.delete(id).await?;
    Ok(ApiResponse::empty(
        StatusCode::OK,
        format!("Successfully deleted contact with ID {}", id),
    ))
}
