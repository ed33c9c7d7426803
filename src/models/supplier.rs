use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::utils::filter::{non_empty, normalize_pagination};
use crate::validations::{validate_cnpj, validate_not_blank};

#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize, Validate)]
pub struct Supplier {
    pub id: i64,

    #[validate(
        length(min = 2, max = 255, message = "name must be between 2 and 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    #[validate(custom(function = "validate_cnpj"))]
    pub cnpj: Option<String>,

    pub status: bool,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SupplierDto {
    pub name: String,
    pub cnpj: Option<String>,
    pub status: Option<bool>,
    pub version: Option<i32>,
}

impl From<SupplierDto> for Supplier {
    fn from(dto: SupplierDto) -> Self {
        Supplier {
            name: dto.name.trim().to_string(),
            cnpj: non_empty(dto.cnpj),
            status: dto.status.unwrap_or(true),
            version: dto.version.unwrap_or(0),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SupplierResponseDto {
    pub id: i64,
    pub name: String,
    pub cnpj: Option<String>,
    pub status: bool,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Supplier> for SupplierResponseDto {
    fn from(supplier: Supplier) -> Self {
        SupplierResponseDto {
            id: supplier.id,
            name: supplier.name,
            cnpj: supplier.cnpj,
            status: supplier.status,
            version: supplier.version,
            created_at: supplier.created_at,
            updated_at: supplier.updated_at,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SupplierFilterDto {
    pub name: Option<String>,
    pub status: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupplierFilter {
    pub name: Option<String>,
    pub status: Option<bool>,
    pub limit: i64,
    pub offset: i64,
}

impl From<SupplierFilterDto> for SupplierFilter {
    fn from(dto: SupplierFilterDto) -> Self {
        let (limit, offset) = normalize_pagination(dto.limit, dto.offset);
        SupplierFilter {
            name: non_empty(dto.name),
            status: dto.status,
            limit,
            offset,
        }
    }
}
