use actix_web::{http::StatusCode, web, Responder};

use crate::{
    models::{Client, ClientDto, ClientFilter, ClientFilterDto, ClientResponseDto},
    repositories::ClientRepositoryTrait,
    services::ClientService,
    types::{ApiResponse, Result},
};

pub async fn create<T: ClientRepositoryTrait + 'static>(
    dto: web::Json<ClientDto>,
    service: web::Data<ClientService<T>>,
) -> Result<impl Responder> {
    let client = service.create(dto.into_inner().into()).await?;
    Ok(ApiResponse::respond(
        StatusCode::CREATED,
        "Successfully created client",
        ClientResponseDto::from(client),
    ))
}

/// Lists clients; every query parameter is an optional filter
pub async fn get_all<T: ClientRepositoryTrait + 'static>(
    query: web::Query<ClientFilterDto>,
    service: web::Data<ClientService<T>>,
) -> Result<impl Responder> {
    let filter = ClientFilter::from(query.into_inner());
    let clients: Vec<ClientResponseDto> = service
        .get_all(&filter)
        .await?
        .into_iter()
        .map(ClientResponseDto::from)
        .collect();
    Ok(ApiResponse::respond(
        StatusCode::OK,
        "Successfully retrieved clients",
        clients,
    ))
}

pub async fn get_by_id<T: ClientRepositoryTrait + 'static>(
    id: web::Path<i64>,
    service: web::Data<ClientService<T>>,
) -> Result<impl Responder> {
    let client = service.get_by_id(id.into_inner()).await?;
    Ok(ApiResponse::respond(
        StatusCode::OK,
        "Successfully retrieved client",
        ClientResponseDto::from(client),
    ))
}

/// Versioned update: the body carries the version the caller last read
pub async fn update<T: ClientRepositoryTrait + 'static>(
    id: web::Path<i64>,
    dto: web::Json<ClientDto>,
    service: web::Data<ClientService<T>>,
) -> Result<impl Responder> {
    let client = Client {
        id: id.into_inner(),
        ..dto.into_inner().into()
    };
    let updated = service.update(client).await?;
    Ok(ApiResponse::respond(
        StatusCode::OK,
        "Successfully updated client",
        ClientResponseDto::from(updated),
    ))
}

pub async fn delete<T: ClientRepositoryTrait + 'static>(
    id: web::Path<i64>,
    service: web::Data<ClientService<T>>,
) -> Result<impl Responder> {
    let id = id.into_inner();
    service.delete(id).await?;
    Ok(ApiResponse::empty(
        StatusCode::OK,
        format!("Successfully deleted client with ID {}", id),
    ))
}
