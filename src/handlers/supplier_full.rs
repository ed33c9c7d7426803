use actix_web::{http::StatusCode, web, Responder};

use crate::{
    models::SupplierFullDto,
    repositories::SupplierFullRepositoryTrait,
    services::SupplierFullService,
    types::{ApiResponse, Result},
};

/// Creates a supplier with its address, contact and categories atomically
pub async fn create<T: SupplierFullRepositoryTrait + 'static>(
    dto: web::Json<SupplierFullDto>,
    service: web::Data<SupplierFullService<T>>,
) -> Result<impl Responder> {
    let created = service.create(dto.into_inner().into()).await?;
    Ok(ApiResponse::respond(
        StatusCode::CREATED,
        "Successfully created supplier with address, contact and categories",
        created,
    ))
}
