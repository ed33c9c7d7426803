use async_trait::async_trait;
use chrono::Utc;
use log::error;
#[cfg(test)]
use mockall::automock;
use sqlx::{PgExecutor, PgPool, QueryBuilder};

use crate::db::Database;
use crate::errors::RepositoryError;
use crate::models::{Supplier, SupplierFilter};

type Result<T> = std::result::Result<T, RepositoryError>;

const ENTITY: &str = "supplier";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait SupplierRepositoryTrait: Send + Sync {
    async fn create(&self, supplier: &Supplier) -> Result<Supplier>;
    async fn get_by_id(&self, id: i64) -> Result<Supplier>;
    async fn get_all(&self, filter: &SupplierFilter) -> Result<Vec<Supplier>>;
    /// Version-checked update, see `ClientRepositoryTrait::update`
    async fn update(&self, supplier: &Supplier) -> Result<Supplier>;
    async fn delete(&self, id: i64) -> Result<()>;
}

/// Inserts a supplier at version 1 using any executor
pub async fn insert_supplier<'e, E: PgExecutor<'e>>(
    executor: E,
    supplier: &Supplier,
) -> Result<Supplier> {
    let now = Utc::now();
    sqlx::query_as::<_, Supplier>(
        r#"
            INSERT INTO suppliers (name, cnpj, status, version, created_at, updated_at)
            VALUES ($1, $2, $3, 1, $4, $4)
            RETURNING *
        "#,
    )
    .bind(&supplier.name)
    .bind(&supplier.cnpj)
    .bind(supplier.status)
    .bind(now)
    .fetch_one(executor)
    .await
    .map_err(|e| {
        error!("Failed to insert supplier: {}", e);
        RepositoryError::from_entity(e, ENTITY, RepositoryError::CreateFailed)
    })
}

pub struct SupplierRepository {
    pool: PgPool,
}

impl SupplierRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.get_pool().clone(),
        }
    }
}

#[async_trait]
impl SupplierRepositoryTrait for SupplierRepository {
    async fn create(&self, supplier: &Supplier) -> Result<Supplier> {
        insert_supplier(&self.pool, supplier).await
    }

    async fn get_by_id(&self, id: i64) -> Result<Supplier> {
        sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::GetFailed)?
            .ok_or_else(|| RepositoryError::NotFound(format!("supplier with ID {}", id)))
    }

    async fn get_all(&self, filter: &SupplierFilter) -> Result<Vec<Supplier>> {
        let mut builder = QueryBuilder::new("SELECT * FROM suppliers WHERE 1=1");

        if let Some(name) = &filter.name {
            builder.push(" AND name ILIKE ");
            builder.push_bind(format!("%{}%", name));
        }

        if let Some(status) = filter.status {
            builder.push(" AND status = ");
            builder.push_bind(status);
        }

        builder.push(" ORDER BY id LIMIT ");
        builder.push_bind(filter.limit);
        builder.push(" OFFSET ");
        builder.push_bind(filter.offset);

        builder
            .build_query_as::<Supplier>()
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::GetFailed)
    }

    async fn update(&self, supplier: &Supplier) -> Result<Supplier> {
        sqlx::query_as::<_, Supplier>(
            r#"
                UPDATE suppliers
                SET name = $1, cnpj = $2, status = $3,
                    version = version + 1, updated_at = $4
                WHERE id = $5 AND version = $6
                RETURNING *
            "#,
        )
        .bind(&supplier.name)
        .bind(&supplier.cnpj)
        .bind(supplier.status)
        .bind(Utc::now())
        .bind(supplier.id)
        .bind(supplier.version)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_entity(e, ENTITY, RepositoryError::UpdateFailed))?
        .ok_or_else(|| {
            RepositoryError::VersionConflict(format!(
                "supplier {} is no longer at version {}",
                supplier.id, supplier.version
            ))
        })
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_entity(e, ENTITY, RepositoryError::DeleteFailed))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("supplier with ID {}", id)));
        }
        Ok(())
    }
}
