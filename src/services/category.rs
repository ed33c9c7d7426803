use std::sync::Arc;

use log::info;
use validator::Validate;

use crate::errors::{Operation, ServiceError};
use crate::models::ProductCategory;
use crate::repositories::CategoryRepositoryTrait;

type Result<T> = std::result::Result<T, ServiceError>;

pub struct CategoryService<T: CategoryRepositoryTrait> {
    repository: Arc<T>,
}

impl<T: CategoryRepositoryTrait> CategoryService<T> {
    pub fn new(repository: Arc<T>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, category: ProductCategory) -> Result<ProductCategory> {
        category.validate()?;

        let created = self
            .repository
            .create(&category)
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Create, e))?;

        info!("Created category: id={} name={}", created.id, created.name);
        Ok(created)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<ProductCategory> {
        if id <= 0 {
            return Err(ServiceError::ZeroId("id"));
        }

        self.repository
            .get_by_id(id)
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Get, e))
    }

    pub async fn get_all(&self) -> Result<Vec<ProductCategory>> {
        self.repository
            .get_all()
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Get, e))
    }

    pub async fn update(&self, category: ProductCategory) -> Result<ProductCategory> {
        if category.id <= 0 {
            return Err(ServiceError::ZeroId("id"));
        }
        category.validate()?;

        // Confirm the row exists so a missing category is NotFound, not a silent no-op
        self.get_by_id(category.id).await?;

        self.repository
            .update(&category)
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Update, e))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.get_by_id(id).await?;

        self.repository
            .delete(id)
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Delete, e))?;

        info!("Deleted category: id={}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::errors::{ErrorKind, RepositoryError};
    use crate::repositories::MockCategoryRepositoryTrait;

    fn category(id: i64, name: &str) -> ProductCategory {
        ProductCategory {
            id,
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn test_create_rejects_short_name_before_repository() {
        let mut mock = MockCategoryRepositoryTrait::new();
        mock.expect_create().times(0);

        let err = CategoryService::new(Arc::new(mock))
            .create(category(0, "A"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().contains("name"));
    }

    #[actix_web::test]
    async fn test_create_duplicate_name() {
        let mut mock = MockCategoryRepositoryTrait::new();
        mock.expect_create()
            .returning(|_| Err(RepositoryError::Duplicate("category already exists".into())));

        let err = CategoryService::new(Arc::new(mock))
            .create(category(0, "Beverages"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Duplicate);
    }

    #[actix_web::test]
    async fn test_update_missing_category_is_not_found() {
        let mut mock = MockCategoryRepositoryTrait::new();
        mock.expect_get_by_id()
            .with(eq(42))
            .returning(|id| Err(RepositoryError::NotFound(format!("category with ID {}", id))));
        mock.expect_update().times(0);

        let err = CategoryService::new(Arc::new(mock))
            .update(category(42, "Snacks"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[actix_web::test]
    async fn test_delete_checks_existence_first() {
        let mut mock = MockCategoryRepositoryTrait::new();
        mock.expect_get_by_id()
            .with(eq(7))
            .times(1)
            .returning(|id| Ok(category(id, "Dairy")));
        mock.expect_delete().with(eq(7)).times(1).returning(|_| Ok(()));

        assert!(CategoryService::new(Arc::new(mock)).delete(7).await.is_ok());
    }

    #[actix_web::test]
    async fn test_zero_id_rejected() {
        let mut mock = MockCategoryRepositoryTrait::new();
        mock.expect_get_by_id().times(0);
        mock.expect_delete().times(0);
        let service = CategoryService::new(Arc::new(mock));

        assert_eq!(service.get_by_id(0).await.unwrap_err().kind(), ErrorKind::ZeroId);
        assert_eq!(service.delete(-3).await.unwrap_err().kind(), ErrorKind::ZeroId);
    }
}
