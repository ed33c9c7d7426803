use actix_web::{http::StatusCode, web, Responder};

use crate::{
    models::{Supplier, SupplierDto, SupplierFilter, SupplierFilterDto, SupplierResponseDto},
    repositories::SupplierRepositoryTrait,
    services::SupplierService,
    types::{ApiResponse, Result},
};

pub async fn create<T: SupplierRepositoryTrait + 'static>(
    dto: web::Json<SupplierDto>,
    service: web::Data<SupplierService<T>>,
) -> Result<impl Responder> {
    let supplier = service.create(dto.into_inner().into()).await?;
    Ok(ApiResponse::respond(
        StatusCode::CREATED,
        "Successfully created supplier",
        SupplierResponseDto::from(supplier),
    ))
}

/// Lists suppliers by optional name fragment and status
pub async fn get_all<T: SupplierRepositoryTrait + 'static>(
    query: web::Query<SupplierFilterDto>,
    service: web::Data<SupplierService<T>>,
) -> Result<impl Responder> {
    let filter = SupplierFilter::from(query.into_inner());
    let suppliers: Vec<SupplierResponseDto> = service
        .get_all(&filter)
        .await?
        .into_iter()
        .map(SupplierResponseDto::from)
        .collect();
    Ok(ApiResponse::respond(
        StatusCode::OK,
        "Successfully retrieved suppliers",
        suppliers,
    ))
}

pub async fn get_by_id<T: SupplierRepositoryTrait + 'static>(
    id: web::Path<i64>,
    service: web::Data<SupplierService<T>>,
) -> Result<impl Responder> {
    let supplier = service.get_by_id(id.into_inner()).await?;
    Ok(ApiResponse::respond(
        StatusCode::OK,
        "Successfully retrieved supplier",
        SupplierResponseDto::from(supplier),
    ))
}

/// Versioned update, 409 when `version` is stale
pub async fn update<T: SupplierRepositoryTrait + 'static>(
    id: web::Path<i64>,
    dto: web::Json<SupplierDto>,
    service: web::Data<SupplierService<T>>,
) -> Result<impl Responder> {
    let supplier = Supplier {
        id: id.into_inner(),
        ..dto.into_inner().into()
    };
    let updated = service.update(supplier).await?;
    Ok(ApiResponse::respond(
        StatusCode::OK,
        "Successfully updated supplier",
        SupplierResponseDto::from(updated),
    ))
}

pub async fn delete<T: SupplierRepositoryTrait + 'static>(
    id: web::Path<i64>,
    service: web::Data<SupplierService<T>>,
) -> Result<impl Responder> {
    let id = id.into_inner();
    service.delete(id).await?;
    Ok(ApiResponse::empty(
        StatusCode::OK,
        format!("Successfully deleted supplier with ID {}", id),
    ))
}
