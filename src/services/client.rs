use std::sync::Arc;

use log::info;
use validator::Validate;

use crate::errors::{Operation, ServiceError};
use crate::models::{Client, ClientFilter};
use crate::repositories::ClientRepositoryTrait;

type Result<T> = std::result::Result<T, ServiceError>;

pub struct ClientService<T: ClientRepositoryTrait> {
    repository: Arc<T>,
}

impl<T: ClientRepositoryTrait> ClientService<T> {
    pub fn new(repository: Arc<T>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, client: Client) -> Result<Client> {
        client.validate()?;

        let created = self
            .repository
            .create(&client)
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Create, e))?;

        info!("Created client: id={}", created.id);
        Ok(created)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Client> {
        if id <= 0 {
            return Err(ServiceError::ZeroId("id"));
        }

        self.repository
            .get_by_id(id)
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Get, e))
    }

    pub async fn get_all(&self, filter: &ClientFilter) -> Result<Vec<Client>> {
        self.repository
            .get_all(filter)
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Get, e))
    }

    /// Updates a client the caller last read at `client.version`
    pub async fn update(&self, client: Client) -> Result<Client> {
        if client.id <= 0 {
            return Err(ServiceError::ZeroId("id"));
        }
        if client.version <= 0 {
            return Err(ServiceError::InvalidData(
                "version: required for update".to_string(),
            ));
        }
        client.validate()?;

        let current = self.get_by_id(client.id).await?;
        if current.version != client.version {
            return Err(ServiceError::VersionConflict(format!(
                "client {} is at version {}, update was based on version {}",
                client.id, current.version, client.version
            )));
        }

        let updated = self
            .repository
            .update(&client)
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Update, e))?;

        info!("Updated client: id={} version={}", updated.id, updated.version);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.get_by_id(id).await?;

        self.repository
            .delete(id)
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Delete, e))?;

        info!("Deleted client: id={}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::errors::{ErrorKind, RepositoryError};
    use crate::repositories::MockClientRepositoryTrait;

    fn client(id: i64, version: i32) -> Client {
        Client {
            id,
            name: "Maria Souza".into(),
            email: "maria@example.com".into(),
            cpf: "12345678901".into(),
            status: true,
            version,
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn test_stale_version_is_rejected() {
        let mut mock = MockClientRepositoryTrait::new();
        mock.expect_get_by_id()
            .with(eq(3))
            .returning(|id| Ok(client(id, 4)));
        mock.expect_update().times(0);

        let err = ClientService::new(Arc::new(mock))
            .update(client(3, 2))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::VersionConflict);
    }

    #[actix_web::test]
    async fn test_concurrent_bump_surfaces_as_conflict() {
        let mut mock = MockClientRepositoryTrait::new();
        mock.expect_get_by_id().returning(|id| Ok(client(id, 2)));
        mock.expect_update().times(1).returning(|c| {
            Err(RepositoryError::VersionConflict(format!(
                "client {} is no longer at version {}",
                c.id, c.version
            )))
        });

        let err = ClientService::new(Arc::new(mock))
            .update(client(3, 2))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::VersionConflict);
    }

    #[actix_web::test]
    async fn test_matching_version_updates() {
        let mut mock = MockClientRepositoryTrait::new();
        mock.expect_get_by_id().returning(|id| Ok(client(id, 2)));
        mock.expect_update().returning(|c| Ok(client(c.id, c.version + 1)));

        let updated = ClientService::new(Arc::new(mock))
            .update(client(3, 2))
            .await
            .unwrap();
        assert_eq!(updated.version, 3);
    }

    #[actix_web::test]
    async fn test_update_requires_version() {
        let mut mock = MockClientRepositoryTrait::new();
        mock.expect_get_by_id().times(0);

        let err = ClientService::new(Arc::new(mock))
            .update(client(3, 0))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[actix_web::test]
    async fn test_get_all_empty() {
        let mut mock = MockClientRepositoryTrait::new();
        mock.expect_get_all().returning(|_| Ok(Vec::new()));

        let filter = ClientFilter {
            name: None,
            email: None,
            cpf: None,
            status: None,
            created_from: None,
            created_to: None,
            limit: 100,
            offset: 0,
        };
        let clients = ClientService::new(Arc::new(mock)).get_all(&filter).await.unwrap();
        assert!(clients.is_empty());
    }
}
