use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::utils::filter::{non_empty, normalize_pagination, parse_filter_date};
use crate::validations::{validate_cpf, validate_not_blank};

#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize, Validate)]
pub struct Client {
    pub id: i64,

    #[validate(
        length(min = 2, max = 255, message = "name must be between 2 and 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    #[validate(email(message = "email is not valid"))]
    pub email: String,

    #[validate(custom(function = "validate_cpf"))]
    pub cpf: String,

    pub status: bool,

    /// Optimistic concurrency token, bumped on every update
    pub version: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// DTO for creating or updating a client; `version` is required on update
#[derive(Debug, Serialize, Deserialize)]
pub struct ClientDto {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub status: Option<bool>,
    pub version: Option<i32>,
}

impl From<ClientDto> for Client {
    fn from(dto: ClientDto) -> Self {
        Client {
            name: dto.name.trim().to_string(),
            email: dto.email.trim().to_lowercase(),
            cpf: dto.cpf,
            status: dto.status.unwrap_or(true),
            version: dto.version.unwrap_or(0),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClientResponseDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub status: bool,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Client> for ClientResponseDto {
    fn from(client: Client) -> Self {
        ClientResponseDto {
            id: client.id,
            name: client.name,
            email: client.email,
            cpf: client.cpf,
            status: client.status,
            version: client.version,
            created_at: client.created_at,
            updated_at: client.updated_at,
        }
    }
}

/// Query-string filters for listing clients
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ClientFilterDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub cpf: Option<String>,
    pub status: Option<bool>,
    pub created_from: Option<String>,
    pub created_to: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub cpf: Option<String>,
    pub status: Option<bool>,
    pub created_from: Option<NaiveDate>,
    pub created_to: Option<NaiveDate>,
    pub limit: i64,
    pub offset: i64,
}

impl From<ClientFilterDto> for ClientFilter {
    fn from(dto: ClientFilterDto) -> Self {
        let (limit, offset) = normalize_pagination(dto.limit, dto.offset);
        ClientFilter {
            name: non_empty(dto.name),
            email: non_empty(dto.email),
            cpf: non_empty(dto.cpf),
            status: dto.status,
            created_from: parse_filter_date(dto.created_from.as_deref()),
            created_to: parse_filter_date(dto.created_to.as_deref()),
            limit,
            offset,
        }
    }
}
