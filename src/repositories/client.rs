use async_trait::async_trait;
use chrono::Utc;
use log::{debug, error};
#[cfg(test)]
use mockall::automock;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::db::Database;
use crate::errors::RepositoryError;
use crate::models::{Client, ClientFilter};

type Result<T> = std::result::Result<T, RepositoryError>;

const ENTITY: &str = "client";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClientRepositoryTrait: Send + Sync {
    /// Inserts a client at version 1
    ///
    /// ### Errors
    /// * `RepositoryError::Duplicate` - Email or CPF already registered
    /// * `RepositoryError::CreateFailed` - Any other database failure
    async fn create(&self, client: &Client) -> Result<Client>;

    async fn get_by_id(&self, id: i64) -> Result<Client>;

    /// Lists clients matching every filter that is set
    async fn get_all(&self, filter: &ClientFilter) -> Result<Vec<Client>>;

    /// Writes the client if its `version` still matches the stored one,
    /// bumping the version
    ///
    /// ### Errors
    /// * `RepositoryError::VersionConflict` - The stored version moved on
    /// * `RepositoryError::Duplicate` - Email or CPF taken by another client
    async fn update(&self, client: &Client) -> Result<Client>;

    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.get_pool().clone(),
        }
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &ClientFilter) {
    if let Some(name) = &filter.name {
        builder.push(" AND name ILIKE ");
        builder.push_bind(format!("%{}%", name));
    }

    if let Some(email) = &filter.email {
        builder.push(" AND email = ");
        builder.push_bind(email.to_lowercase());
    }

    if let Some(cpf) = &filter.cpf {
        builder.push(" AND cpf = ");
        builder.push_bind(cpf.clone());
    }

    if let Some(status) = filter.status {
        builder.push(" AND status = ");
        builder.push_bind(status);
    }

    if let Some(from) = filter.created_from {
        builder.push(" AND created_at::date >= ");
        builder.push_bind(from);
    }

    if let Some(to) = filter.created_to {
        builder.push(" AND created_at::date <= ");
        builder.push_bind(to);
    }
}

#[async_trait]
impl ClientRepositoryTrait for ClientRepository {
    async fn create(&self, client: &Client) -> Result<Client> {
        let now = Utc::now();
        sqlx::query_as::<_, Client>(
            r#"
                INSERT INTO clients (name, email, cpf, status, version, created_at, updated_at)
                VALUES ($1, $2, $3, $4, 1, $5, $5)
                RETURNING *
            "#,
        )
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.cpf)
        .bind(client.status)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to insert client: {}", e);
            RepositoryError::from_entity(e, ENTITY, RepositoryError::CreateFailed)
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Client> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::GetFailed)?
            .ok_or_else(|| RepositoryError::NotFound(format!("client with ID {}", id)))
    }

    async fn get_all(&self, filter: &ClientFilter) -> Result<Vec<Client>> {
        let mut builder = QueryBuilder::new("SELECT * FROM clients WHERE 1=1");
        push_filters(&mut builder, filter);

        builder.push(" ORDER BY id LIMIT ");
        builder.push_bind(filter.limit);
        builder.push(" OFFSET ");
        builder.push_bind(filter.offset);

        debug!("Listing clients with filter: {:?}", filter);

        builder
            .build_query_as::<Client>()
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::GetFailed)
    }

    async fn update(&self, client: &Client) -> Result<Client> {
        sqlx::query_as::<_, Client>(
            r#"
                UPDATE clients
                SET name = $1, email = $2, cpf = $3, status = $4,
                    version = version + 1, updated_at = $5
                WHERE id = $6 AND version = $7
                RETURNING *
            "#,
        )
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.cpf)
        .bind(client.status)
        .bind(Utc::now())
        .bind(client.id)
        .bind(client.version)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_entity(e, ENTITY, RepositoryError::UpdateFailed))?
        .ok_or_else(|| {
            RepositoryError::VersionConflict(format!(
                "client {} is no longer at version {}",
                client.id, client.version
            ))
        })
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_entity(e, ENTITY, RepositoryError::DeleteFailed))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("client with ID {}", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_only_set_filters_are_rendered() {
        let filter = ClientFilter {
            name: Some("ana".into()),
            email: None,
            cpf: None,
            status: Some(true),
            created_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            created_to: None,
            limit: 100,
            offset: 0,
        };

        let mut builder = QueryBuilder::new("SELECT * FROM clients WHERE 1=1");
        push_filters(&mut builder, &filter);
        let sql = builder.sql();

        assert!(sql.contains("name ILIKE $1"));
        assert!(sql.contains("status = $2"));
        assert!(sql.contains("created_at::date >= $3"));
        assert!(!sql.contains("email"));
        assert!(!sql.contains("cpf"));
    }
}
