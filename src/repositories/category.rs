use async_trait::async_trait;
use chrono::Utc;
use log::error;
#[cfg(test)]
use mockall::automock;
use sqlx::PgPool;

use crate::db::Database;
use crate::errors::RepositoryError;
use crate::models::ProductCategory;

type Result<T> = std::result::Result<T, RepositoryError>;

const ENTITY: &str = "category";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    /// Inserts a category, returning it with its generated ID and timestamps
    ///
    /// ### Errors
    /// * `RepositoryError::Duplicate` - A category with the same name exists
    /// * `RepositoryError::CreateFailed` - Any other database failure
    async fn create(&self, category: &ProductCategory) -> Result<ProductCategory>;

    /// ### Errors
    /// * `RepositoryError::NotFound` - No category with this ID
    async fn get_by_id(&self, id: i64) -> Result<ProductCategory>;

    async fn get_all(&self) -> Result<Vec<ProductCategory>>;

    async fn update(&self, category: &ProductCategory) -> Result<ProductCategory>;

    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.get_pool().clone(),
        }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    async fn create(&self, category: &ProductCategory) -> Result<ProductCategory> {
        let now = Utc::now();
        sqlx::query_as::<_, ProductCategory>(
            r#"
                INSERT INTO product_categories (name, description, created_at, updated_at)
                VALUES ($1, $2, $3, $3)
                RETURNING *
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to insert category: {}", e);
            RepositoryError::from_entity(e, ENTITY, RepositoryError::CreateFailed)
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<ProductCategory> {
        sqlx::query_as::<_, ProductCategory>("SELECT * FROM product_categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::GetFailed)?
            .ok_or_else(|| RepositoryError::NotFound(format!("category with ID {}", id)))
    }

    async fn get_all(&self) -> Result<Vec<ProductCategory>> {
        sqlx::query_as::<_, ProductCategory>("SELECT * FROM product_categories ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::GetFailed)
    }

    async fn update(&self, category: &ProductCategory) -> Result<ProductCategory> {
        sqlx::query_as::<_, ProductCategory>(
            r#"
                UPDATE product_categories
                SET name = $1, description = $2, updated_at = $3
                WHERE id = $4
                RETURNING *
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(Utc::now())
        .bind(category.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_entity(e, ENTITY, RepositoryError::UpdateFailed))?
        .ok_or_else(|| RepositoryError::NotFound(format!("category with ID {}", category.id)))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM product_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_entity(e, ENTITY, RepositoryError::DeleteFailed))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("category with ID {}", id)));
        }
        Ok(())
    }
}
