use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::validations::{validate_not_blank, validate_phone};

#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize, Validate)]
pub struct Contact {
    pub id: i64,
    pub supplier_id: Option<i64>,
    pub client_id: Option<i64>,

    #[validate(
        length(min = 2, max = 255, message = "contact_name must be between 2 and 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub contact_name: String,

    #[validate(length(max = 100))]
    pub contact_position: Option<String>,

    #[validate(email(message = "email is not valid"))]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[validate(custom(function = "validate_phone"))]
    pub cell: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactDto {
    pub supplier_id: Option<i64>,
    pub client_id: Option<i64>,
    pub contact_name: String,
    pub contact_position: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub cell: Option<String>,
}

impl From<ContactDto> for Contact {
    fn from(dto: ContactDto) -> Self {
        Contact {
            supplier_id: dto.supplier_id,
            client_id: dto.client_id,
            contact_name: dto.contact_name.trim().to_string(),
            contact_position: dto.contact_position,
            email: dto.email.trim().to_lowercase(),
            phone: dto.phone,
            cell: dto.cell,
            ..Default::default()
        }
    }
}
