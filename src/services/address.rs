use std::sync::Arc;

use validator::Validate;

use crate::errors::{Operation, ServiceError};
use crate::models::Address;
use crate::repositories::AddressRepositoryTrait;

type Result<T> = std::result::Result<T, ServiceError>;

pub struct AddressService<T: AddressRepositoryTrait> {
    repository: Arc<T>,
}

impl<T: AddressRepositoryTrait> AddressService<T> {
    pub fn new(repository: Arc<T>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, address: Address) -> Result<Address> {
        address.validate()?;
        if !address.has_owner() {
            return Err(ServiceError::InvalidData(
                "address must belong to exactly one supplier or client".to_string(),
            ));
        }

        self.repository
            .create(&address)
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Create, e))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Address> {
        if id <= 0 {
            return Err(ServiceError::ZeroId("id"));
        }

        self.repository
            .get_by_id(id)
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Get, e))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.get_by_id(id).await?;

        self.repository
            .delete(id)
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Delete, e))
    }
}
