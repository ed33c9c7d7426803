use actix_web::{http::StatusCode, web, Responder};

use crate::{
    models::AddressDto,
    repositories::AddressRepositoryTrait,
    services::AddressService,
    types::{ApiResponse, Result},
};

pub async fn create<T: AddressRepositoryTrait + 'static>(
    dto: web::Json<AddressDto>,
    service: web::Data<AddressService<T>>,
) -> Result<impl Responder> {
    let address = service.create(dto.into_inner().into()).await?;
    Ok(ApiResponse::respond(
        StatusCode::CREATED,
        "Successfully created address",
        address,
    ))
}

pub async fn get_by_id<T: AddressRepositoryTrait + 'static>(
    id: web::Path<i64>,
    service: web::Data<AddressService<T>>,
) -> Result<impl Responder> {
    let address = service.get_by_id(id.into_inner()).await?;
    Ok(ApiResponse::respond(
        StatusCode::OK,
        "Successfully retrieved address",
        address,
    ))
}

pub async fn delete<T: AddressRepositoryTrait + 'static>(
    id: web::Path<i64>,
    service: web::Data<AddressService<T>>,
) -> Result<impl Responder> {
    let id = id.into_inner();
    service.delete(id).await?;
    Ok(ApiResponse::empty(
        StatusCode::OK,
        format!("Successfully deleted address with ID {}", id),
    ))
}
