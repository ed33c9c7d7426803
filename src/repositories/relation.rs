use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use log::{debug, error};
#[cfg(test)]
use mockall::automock;
use sqlx::{PgExecutor, PgPool};

use crate::db::Database;
use crate::errors::RepositoryError;
use crate::models::Relation;

type Result<T> = std::result::Result<T, RepositoryError>;

/// Data access for one join table.
///
/// The same contract holds for every relation type: duplicate pairs surface
/// as `RelationExists`, unknown parents or children as `InvalidForeignKey`,
/// and only single-pair deletes treat "nothing deleted" as `NotFound`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RelationRepositoryTrait<R: Relation>: Send + Sync {
    /// Inserts the pair, stamping `created_at`
    ///
    /// ### Errors
    /// * `RepositoryError::RelationExists` - The pair is already linked
    /// * `RepositoryError::InvalidForeignKey` - Parent or child does not exist
    /// * `RepositoryError::CreateFailed` - Any other database failure
    async fn create(&self, parent_id: i64, child_id: i64) -> Result<R>;

    /// Existence probe; a missing pair is `Ok(false)`, not an error
    async fn has_relation(&self, parent_id: i64, child_id: i64) -> Result<bool>;

    /// Fetches a single pair
    async fn find(&self, parent_id: i64, child_id: i64) -> Result<Option<R>>;

    /// All relations of a parent, empty when it has none
    ///
    /// ### Errors
    /// * `RepositoryError::ScanFailed` - A row could not be mapped
    /// * `RepositoryError::IterateFailed` - The cursor failed mid-way
    async fn get_all_by_parent_id(&self, parent_id: i64) -> Result<Vec<R>>;

    /// Deletes one pair
    ///
    /// ### Errors
    /// * `RepositoryError::NotFound` - No row matched the pair
    /// * `RepositoryError::InvalidForeignKey` - The row is still referenced
    /// * `RepositoryError::DeleteFailed` - Any other database failure
    async fn delete(&self, parent_id: i64, child_id: i64) -> Result<()>;

    /// Deletes every relation of a parent; deleting nothing succeeds
    async fn delete_all(&self, parent_id: i64) -> Result<()>;
}

/// Inserts a relation using any executor, pool or open transaction.
pub async fn insert_relation<'e, R, E>(executor: E, parent_id: i64, child_id: i64) -> Result<R>
where
    R: Relation,
    E: PgExecutor<'e>,
{
    let sql = format!(
        "INSERT INTO {} ({}, {}, created_at) VALUES ($1, $2, $3) RETURNING *",
        R::TABLE,
        R::PARENT_COLUMN,
        R::CHILD_COLUMN
    );

    sqlx::query_as::<_, R>(&sql)
        .bind(parent_id)
        .bind(child_id)
        .bind(Utc::now())
        .fetch_one(executor)
        .await
        .map_err(|e| {
            let err = RepositoryError::from_relation(e, R::NAME, RepositoryError::CreateFailed);
            if matches!(err, RepositoryError::CreateFailed(_)) {
                error!(
                    "Failed to insert {}: parent_id={} child_id={} error={}",
                    R::NAME,
                    parent_id,
                    child_id,
                    err
                );
            }
            err
        })
}

/// Join-table repository backed by the shared pool
pub struct PgRelationRepository<R> {
    pool: PgPool,
    _relation: PhantomData<fn() -> R>,
}

impl<R: Relation> PgRelationRepository<R> {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.get_pool().clone(),
            _relation: PhantomData,
        }
    }

    fn pair_condition() -> String {
        format!("{} = $1 AND {} = $2", R::PARENT_COLUMN, R::CHILD_COLUMN)
    }
}

#[async_trait]
impl<R: Relation> RelationRepositoryTrait<R> for PgRelationRepository<R> {
    async fn create(&self, parent_id: i64, child_id: i64) -> Result<R> {
        let relation = insert_relation::<R, _>(&self.pool, parent_id, child_id).await?;
        debug!(
            "Inserted {}: parent_id={} child_id={}",
            R::NAME,
            parent_id,
            child_id
        );
        Ok(relation)
    }

    async fn has_relation(&self, parent_id: i64, child_id: i64) -> Result<bool> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE {})",
            R::TABLE,
            Self::pair_condition()
        );

        sqlx::query_scalar::<_, bool>(&sql)
            .bind(parent_id)
            .bind(child_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to check {}: {}", R::NAME, e);
                RepositoryError::RelationCheckFailed(e)
            })
    }

    async fn find(&self, parent_id: i64, child_id: i64) -> Result<Option<R>> {
        let sql = format!(
            "SELECT * FROM {} WHERE {}",
            R::TABLE,
            Self::pair_condition()
        );

        sqlx::query_as::<_, R>(&sql)
            .bind(parent_id)
            .bind(child_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to fetch {}: {}", R::NAME, e);
                RepositoryError::GetFailed(e)
            })
    }

    async fn get_all_by_parent_id(&self, parent_id: i64) -> Result<Vec<R>> {
        let sql = format!(
            "SELECT * FROM {} WHERE {} = $1 ORDER BY {}",
            R::TABLE,
            R::PARENT_COLUMN,
            R::CHILD_COLUMN
        );

        let mut rows = sqlx::query(&sql).bind(parent_id).fetch(&self.pool);
        let mut relations = Vec::new();

        while let Some(row) = rows.try_next().await.map_err(|e| {
            error!("Failed to iterate {} rows: {}", R::NAME, e);
            RepositoryError::IterateFailed(e)
        })? {
            let relation = R::from_row(&row).map_err(|e| {
                error!("Failed to scan {} row: {}", R::NAME, e);
                RepositoryError::ScanFailed(e)
            })?;
            relations.push(relation);
        }

        Ok(relations)
    }

    async fn delete(&self, parent_id: i64, child_id: i64) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE {}", R::TABLE, Self::pair_condition());

        let result = sqlx::query(&sql)
            .bind(parent_id)
            .bind(child_id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_relation(e, R::NAME, RepositoryError::DeleteFailed))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "{} ({}, {})",
                R::NAME,
                parent_id,
                child_id
            )));
        }

        Ok(())
    }

    async fn delete_all(&self, parent_id: i64) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE {} = $1", R::TABLE, R::PARENT_COLUMN);

        let result = sqlx::query(&sql)
            .bind(parent_id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_relation(e, R::NAME, RepositoryError::DeleteFailed))?;

        debug!(
            "Deleted {} rows of {} for parent_id={}",
            result.rows_affected(),
            R::NAME,
            parent_id
        );
        Ok(())
    }
}

// These run against a scratch database per test: `DATABASE_URL=... cargo test -- --ignored`
#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::models::{ProductCategoryRelation, SupplierContactRelation};

    fn repository<R: Relation>(pool: &PgPool) -> PgRelationRepository<R> {
        PgRelationRepository {
            pool: pool.clone(),
            _relation: PhantomData,
        }
    }

    async fn seed_product_and_category(pool: &PgPool) -> (i64, i64) {
        let product: i64 =
            sqlx::query_scalar("INSERT INTO products (name) VALUES ('Cafe') RETURNING id")
                .fetch_one(pool)
                .await
                .unwrap();
        let category: i64 = sqlx::query_scalar(
            "INSERT INTO product_categories (name) VALUES ('Bebidas') RETURNING id",
        )
        .fetch_one(pool)
        .await
        .unwrap();
        (product, category)
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_create_then_duplicate_is_relation_exists(pool: PgPool) {
        let repo = repository::<ProductCategoryRelation>(&pool);
        let (product, category) = seed_product_and_category(&pool).await;

        let relation = repo.create(product, category).await.unwrap();
        assert_eq!((relation.product_id, relation.category_id), (product, category));
        assert!(repo.has_relation(product, category).await.unwrap());
        assert_eq!(repo.find(product, category).await.unwrap(), Some(relation));

        let err = repo.create(product, category).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RelationExists);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_unknown_child_is_invalid_foreign_key(pool: PgPool) {
        let repo = repository::<ProductCategoryRelation>(&pool);
        let (product, _) = seed_product_and_category(&pool).await;

        let err = repo.create(product, 9_999).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidForeignKey);
        assert!(!repo.has_relation(product, 9_999).await.unwrap());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_parent_without_relations_lists_empty(pool: PgPool) {
        let repo = repository::<SupplierContactRelation>(&pool);

        let relations = repo.get_all_by_parent_id(42).await.unwrap();
        assert!(relations.is_empty());
        assert_eq!(serde_json::to_string(&relations).unwrap(), "[]");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_delete_semantics(pool: PgPool) {
        let repo = repository::<ProductCategoryRelation>(&pool);
        let (product, category) = seed_product_and_category(&pool).await;

        let err = repo.delete(product, category).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        repo.delete_all(product).await.unwrap();

        repo.create(product, category).await.unwrap();
        repo.delete(product, category).await.unwrap();
        assert!(repo.get_all_by_parent_id(product).await.unwrap().is_empty());

        repo.create(product, category).await.unwrap();
        repo.delete_all(product).await.unwrap();
        assert!(!repo.has_relation(product, category).await.unwrap());
    }
}
