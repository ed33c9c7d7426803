use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::validations::{validate_not_blank, validate_postal_code, validate_state};

#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize, Validate)]
pub struct Address {
    pub id: i64,
    pub supplier_id: Option<i64>,
    pub client_id: Option<i64>,

    #[validate(length(max = 255), custom(function = "validate_not_blank"))]
    pub street: String,

    #[validate(length(min = 1, max = 20, message = "number is required"))]
    pub number: String,

    #[validate(length(max = 255))]
    pub complement: Option<String>,

    #[validate(length(max = 100), custom(function = "validate_not_blank"))]
    pub city: String,

    #[validate(custom(function = "validate_state"))]
    pub state: String,

    #[validate(length(max = 100), custom(function = "validate_not_blank"))]
    pub country: String,

    #[validate(custom(function = "validate_postal_code"))]
    pub postal_code: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressDto {
    pub supplier_id: Option<i64>,
    pub client_id: Option<i64>,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

impl From<AddressDto> for Address {
    fn from(dto: AddressDto) -> Self {
        Address {
            supplier_id: dto.supplier_id,
            client_id: dto.client_id,
            street: dto.street.trim().to_string(),
            number: dto.number.trim().to_string(),
            complement: dto.complement,
            city: dto.city.trim().to_string(),
            state: dto.state.trim().to_uppercase(),
            country: dto.country.trim().to_string(),
            postal_code: dto.postal_code.trim().to_string(),
            ..Default::default()
        }
    }
}

impl Address {
    /// An address must belong to exactly one owner once persisted
    pub fn has_owner(&self) -> bool {
        self.supplier_id.is_some() ^ self.client_id.is_some()
    }
}
