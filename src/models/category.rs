use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::validations::validate_not_blank;

/// Product category
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize, Validate)]
pub struct ProductCategory {
    pub id: i64,

    #[validate(
        length(min = 2, max = 255, message = "name must be between 2 and 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// DTO for creating or replacing a category
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryDto {
    pub name: String,
    pub description: Option<String>,
}

impl From<CategoryDto> for ProductCategory {
    fn from(dto: CategoryDto) -> Self {
        ProductCategory {
            name: dto.name.trim().to_string(),
            description: dto.description,
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryResponseDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductCategory> for CategoryResponseDto {
    fn from(category: ProductCategory) -> Self {
        CategoryResponseDto {
            id: category.id,
            name: category.name,
            description: category.description,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}
