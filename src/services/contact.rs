use std::sync::Arc;

use validator::Validate;

use crate::errors::{Operation, ServiceError};
use crate::models::Contact;
use crate::repositories::ContactRepositoryTrait;

type Result<T> = std::result::Result<T, ServiceError>;

pub struct ContactService<T: ContactRepositoryTrait> {
    repository: Arc<T>,
}

impl<T: ContactRepositoryTrait> ContactService<T> {
    pub fn new(repository: Arc<T>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, contact: Contact) -> Result<Contact> {
        contact.validate()?;

        self.repository
            .create(&contact)
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Create, e))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Contact> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::repositories::MockContactRepositoryTrait;

    #[actix_web::test]
    async fn test_invalid_phone_rejected() {
        let mut mock = MockContactRepositoryTrait::new();
        mock.expect_create().times(0);

        let contact = Contact {
            contact_name: "João Lima".into(),
            email: "joao@example.com".into(),
            phone: Some("12".into()),
            ..Default::default()
        };
        let err = ContactService::new(Arc::new(mock)).create(contact).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().contains("phone"));
    }
}
