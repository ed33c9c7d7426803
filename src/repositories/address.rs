use async_trait::async_trait;
use chrono::Utc;
use log::error;
#[cfg(test)]
use mockall::automock;
use sqlx::{PgExecutor, PgPool};

use crate::db::Database;
use crate::errors::RepositoryError;
use crate::models::Address;

type Result<T> = std::result::Result<T, RepositoryError>;

const ENTITY: &str = "address";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait AddressRepositoryTrait: Send + Sync {
    /// ### Errors
    /// * `RepositoryError::InvalidForeignKey` - The owning supplier or client does not exist
    async fn create(&self, address: &Address) -> Result<Address>;
    async fn get_by_id(&self, id: i64) -> Result<Address>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub async fn insert_address<'e, E: PgExecutor<'e>>(executor: E, address: &Address) -> Result<Address> {
    let now = Utc::now();
    sqlx::query_as::<_, Address>(
        r#"
            INSERT INTO addresses
            (supplier_id, client_id, street, number, complement, city, state, country, postal_code, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING *
        "#,
    )
    .bind(address.supplier_id)
    .bind(address.client_id)
    .bind(&address.street)
    .bind(&address.number)
    .bind(&address.complement)
    .bind(&address.city)
    .bind(&address.state)
    .bind(&address.country)
    .bind(&address.postal_code)
    .bind(now)
    .fetch_one(executor)
    .await
    .map_err(|e| {
        error!("Failed to insert address: {}", e);
        RepositoryError::from_entity(e, ENTITY, RepositoryError::CreateFailed)
    })
}

pub struct AddressRepository {
    pool: PgPool,
}

impl AddressRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.get_pool().clone(),
        }
    }
}

#[async_trait]
impl AddressRepositoryTrait for AddressRepository {
    async fn create(&self, address: &Address) -> Result<Address> {
        insert_address(&self.pool, address).await
    }

    async fn get_by_id(&self, id: i64) -> Result<Address> {
        sqlx::query_as::<_, Address>("SELECT * FROM addresses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::GetFailed)?
            .ok_or_else(|| RepositoryError::NotFound(format!("address with ID {}", id)))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_entity(e, ENTITY, RepositoryError::DeleteFailed))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("address with ID {}", id)));
        }
        Ok(())
    }
}
