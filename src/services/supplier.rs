use std::sync::Arc;

use log::info;
use validator::Validate;

use crate::errors::{Operation, ServiceError};
use crate::models::{Supplier, SupplierFilter};
use crate::repositories::SupplierRepositoryTrait;

type Result<T> = std::result::Result<T, ServiceError>;

pub struct SupplierService<T: SupplierRepositoryTrait> {
    repository: Arc<T>,
}

impl<T: SupplierRepositoryTrait> SupplierService<T> {
    pub fn new(repository: Arc<T>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, supplier: Supplier) -> Result<Supplier> {
        supplier.validate()?;

        let created = self
            .repository
            .create(&supplier)
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Create, e))?;

        info!("Created supplier: id={}", created.id);
        Ok(created)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Supplier> {
        if id <= 0 {
            return Err(ServiceError::ZeroId("id"));
        }

        self.repository
            .get_by_id(id)
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Get, e))
    }

    pub async fn get_all(&self, filter: &SupplierFilter) -> Result<Vec<Supplier>> {
        self.repository
            .get_all(filter)
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Get, e))
    }

    pub async fn update(&self, supplier: Supplier) -> Result<Supplier> {
        if supplier.id <= 0 {
            return Err(ServiceError::ZeroId("id"));
        }
        if supplier.version <= 0 {
            return Err(ServiceError::InvalidData(
                "version: required for update".to_string(),
            ));
        }
        supplier.validate()?;

        let current = self.get_by_id(supplier.id).await?;
        if current.version != supplier.version {
            return Err(ServiceError::VersionConflict(format!(
                "supplier {} is at version {}, update was based on version {}",
                supplier.id, current.version, supplier.version
            )));
        }

        self.repository
            .update(&supplier)
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Update, e))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.get_by_id(id).await?;

        self.repository
            .delete(id)
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Delete, e))?;

        info!("Deleted supplier: id={}", id);
        Ok(())
    }
}
