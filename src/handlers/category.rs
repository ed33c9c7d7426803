use actix_web::{http::StatusCode, web, Responder};

use crate::{
    models::{CategoryDto, CategoryResponseDto, ProductCategory},
    repositories::CategoryRepositoryTrait,
    services::CategoryService,
    types::{ApiResponse, Result},
};

/// Create category route handler
pub async fn create<T: CategoryRepositoryTrait + 'static>(
    dto: web::Json<CategoryDto>,
    service: web::Data<CategoryService<T>>,
) -> Result<impl Responder> {
    let category = service.create(dto.into_inner().into()).await?;
    Ok(ApiResponse::respond(
        StatusCode::CREATED,
        "Successfully created category",
        CategoryResponseDto::from(category),
    ))
}

/// Get all categories route handler
pub async fn get_all<T: CategoryRepositoryTrait + 'static>(
    service: web::Data<CategoryService<T>>,
) -> Result<impl Responder> {
    let categories: Vec<CategoryResponseDto> = service
        .get_all()
        .await?
        .into_iter()
        .map(CategoryResponseDto::from)
        .collect();
    Ok(ApiResponse::respond(
        StatusCode::OK,
        "Successfully retrieved categories",
        categories,
    ))
}

/// Get category by ID route handler
pub async fn get_by_id<T: CategoryRepositoryTrait + 'static>(
    id: web::Path<i64>,
    service: web::Data<CategoryService<T>>,
) -> Result<impl Responder> {
    let category = service.get_by_id(id.into_inner()).await?;
    Ok(ApiResponse::respond(
        StatusCode::OK,
        "Successfully retrieved category",
        CategoryResponseDto::from(category),
    ))
}

/// Replace category route handler
pub async fn update<T: CategoryRepositoryTrait + 'static>(
    id: web::Path<i64>,
    dto: web::Json<CategoryDto>,
    service: web::Data<CategoryService<T>>,
) -> Result<impl Responder> {
    let category = ProductCategory {
        id: id.into_inner(),
        ..dto.into_inner().into()
    };
    let updated = service.update(category).await?;
    Ok(ApiResponse::respond(
        StatusCode::OK,
        "Successfully updated category",
        CategoryResponseDto::from(updated),
    ))
}

/// Delete category route handler
pub async fn delete<T: CategoryRepositoryTrait + 'static>(
    id: web::Path<i64>,
    service: web::Data<CategoryService<T>>,
) -> Result<impl Responder> {
    let id = id.into_inner();
    service.delete(id).await?;
    Ok(ApiResponse::empty(
        StatusCode::OK,
        format!("Successfully deleted category with ID {}", id),
    ))
}
