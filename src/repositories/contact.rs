use async_trait::async_trait;
use chrono::Utc;
use log::error;
#[cfg(test)]
use mockall::automock;
use sqlx::{PgExecutor, PgPool};

use crate::db::Database;
use crate::errors::RepositoryError;
use crate::models::Contact;

type Result<T> = std::result::Result<T, RepositoryError>;

const ENTITY: &str = "contact";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContactRepositoryTrait: Send + Sync {
    async fn create(&self, contact: &Contact) -> Result<Contact>;
    async fn get_by_id(&self, id: i64) -> Result<Contact>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub async fn insert_contact<'e, E: PgExecutor<'e>>(executor: E, contact: &Contact) -> Result<Contact> {
    let now = Utc::now();
    sqlx::query_as::<_, Contact>(
        r#"
            INSERT INTO contacts
            (supplier_id, client_id, contact_name, contact_position, email, phone, cell, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING *
        "#,
    )
    .bind(contact.supplier_id)
    .bind(contact.client_id)
    .bind(&contact.contact_name)
    .bind(&contact.contact_position)
    .bind(&contact.email)
    .bind(&contact.phone)
    .bind(&contact.cell)
    .bind(now)
    .fetch_one(executor)
    .await
    .map_err(|e| {
        error!("Failed to insert contact: {}", e);
        RepositoryError::from_entity(e, ENTITY, RepositoryError::CreateFailed)
    })
}

pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.get_pool().clone(),
        }
    }
}

#[async_trait]
impl ContactRepositoryTrait for ContactRepository {
    async fn create(&self, contact: &Contact) -> Result<Contact> {
        insert_contact(&self.pool, contact).await
    }

    async fn get_by_id(&self, id: i64) -> Result<Contact> {
        sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::GetFailed)?
            .ok_or_else(|| RepositoryError::NotFound(format!("contact with ID {}", id)))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_entity(e, ENTITY, RepositoryError::DeleteFailed))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("contact with ID {}", id)));
        }
        Ok(())
    }
}
