use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use futures::FutureExt;
use log::{error, info, warn};
use validator::Validate;

use crate::errors::{Operation, ServiceError};
use crate::models::{Address, Contact, Supplier, SupplierFull, SupplierFullCreated};
use crate::repositories::{SupplierFullRepositoryTrait, SupplierFullTransaction};

type Result<T> = std::result::Result<T, ServiceError>;

/// Parts of a [`SupplierFull`] that passed validation
struct ValidatedSupplierFull {
    supplier: Supplier,
    address: Address,
    contact: Contact,
    category_ids: Vec<i64>,
}

/// Creates a supplier with its address, contact and category links in one
/// transaction. Either every row is committed or none is.
pub struct SupplierFullService<T: SupplierFullRepositoryTrait> {
    repository: Arc<T>,
}

impl<T: SupplierFullRepositoryTrait> SupplierFullService<T> {
    pub fn new(repository: Arc<T>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, full: SupplierFull) -> Result<SupplierFullCreated> {
        let validated = Self::validate(full)?;

        let mut tx = self
            .repository
            .begin()
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Create, e))?;

        let outcome = AssertUnwindSafe(Self::write_all(tx.as_mut(), validated))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(created)) => match tx.commit().await {
                Ok(()) => {
                    info!(
                        "Created supplier aggregate: supplier_id={} address_id={} contact_id={} categories={}",
                        created.supplier.id,
                        created.address.id,
                        created.contact.id,
                        created.categories.len()
                    );
                    Ok(created)
                }
                Err(e) => {
                    let err = ServiceError::from_repository(Operation::Create, e);
                    Err(Self::rollback(tx.as_mut(), err).await)
                }
            },
            Ok(Err(err)) => Err(Self::rollback(tx.as_mut(), err).await),
            Err(payload) => {
                error!("Panic while creating supplier aggregate, rolling back");
                if let Err(e) = tx.rollback().await {
                    error!("Rollback after panic failed: {}", e);
                }
                panic::resume_unwind(payload)
            }
        }
    }

    /// Checks every part before any database work starts
    fn validate(full: SupplierFull) -> Result<ValidatedSupplierFull> {
        let supplier = full
            .supplier
            .ok_or_else(|| ServiceError::NilModel("supplier is required".to_string()))?;
        let address = full
            .address
            .ok_or_else(|| ServiceError::NilModel("address is required".to_string()))?;
        let contact = full
            .contact
            .ok_or_else(|| ServiceError::NilModel("contact is required".to_string()))?;
        if full.category_ids.is_empty() {
            return Err(ServiceError::NilModel(
                "at least one category is required".to_string(),
            ));
        }

        supplier.validate()?;
        address.validate()?;
        contact.validate()?;

        if full.category_ids.iter().any(|id| *id <= 0) {
            return Err(ServiceError::ZeroId("category_id"));
        }

        // The same category twice would collide on the relation key mid-transaction
        let mut category_ids = Vec::with_capacity(full.category_ids.len());
        for id in full.category_ids {
            if !category_ids.contains(&id) {
                category_ids.push(id);
            }
        }

        Ok(ValidatedSupplierFull {
            supplier,
            address,
            contact,
            category_ids,
        })
    }

    /// Supplier, address, contact, then relations; later steps need the supplier ID
    async fn write_all(
        tx: &mut dyn SupplierFullTransaction,
        validated: ValidatedSupplierFull,
    ) -> Result<SupplierFullCreated> {
        let ValidatedSupplierFull {
            supplier,
            mut address,
            mut contact,
            category_ids,
        } = validated;
        let create_failed = |e| ServiceError::from_repository(Operation::Create, e);

        let supplier = tx.create_supplier(&supplier).await.map_err(create_failed)?;

        address.supplier_id = Some(supplier.id);
        address.client_id = None;
        let address = tx.create_address(&address).await.map_err(create_failed)?;

        contact.supplier_id = Some(supplier.id);
        contact.client_id = None;
        let contact = tx.create_contact(&contact).await.map_err(create_failed)?;

        let mut categories = Vec::with_capacity(category_ids.len());
        for category_id in category_ids {
            let relation = tx
                .create_category_relation(supplier.id, category_id)
                .await
                .map_err(create_failed)?;
            categories.push(relation);
        }

        Ok(SupplierFullCreated {
            supplier: supplier.into(),
            address,
            contact,
            categories,
        })
    }

    /// Rolls back after `err`, folding a rollback failure into the result
    async fn rollback(tx: &mut dyn SupplierFullTransaction, err: ServiceError) -> ServiceError {
        warn!("Rolling back supplier aggregate: {}", err);
        match tx.rollback().await {
            Ok(()) => err,
            Err(rollback_err) => {
                error!("Rollback failed: {}", rollback_err);
                err.with_rollback_failure(rollback_err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::errors::{ErrorKind, RepositoryError};
    use crate::models::SupplierCategoryRelation;

    type RepoResult<T> = std::result::Result<T, RepositoryError>;

    /// Shared view of what the fake database saw
    #[derive(Default)]
    struct Journal {
        begun: usize,
        commits: usize,
        rollbacks: usize,
        /// Rows visible outside the transaction, filled only on commit
        committed_rows: Vec<String>,
    }

    #[derive(Clone, Default)]
    struct Faults {
        fail_relation_at: Option<usize>,
        fail_commit: bool,
        fail_rollback: bool,
        panic_on_contact: bool,
    }

    struct FakeRepository {
        journal: Arc<Mutex<Journal>>,
        faults: Faults,
    }

    struct FakeTransaction {
        journal: Arc<Mutex<Journal>>,
        faults: Faults,
        staged: Vec<String>,
        relations: usize,
    }

    #[async_trait]
    impl SupplierFullRepositoryTrait for FakeRepository {
        async fn begin(&self) -> RepoResult<Box<dyn SupplierFullTransaction>> {
            self.journal.lock().unwrap().begun += 1;
            Ok(Box::new(FakeTransaction {
                journal: self.journal.clone(),
                faults: self.faults.clone(),
                staged: Vec::new(),
                relations: 0,
            }))
        }
    }

    #[async_trait]
    impl SupplierFullTransaction for FakeTransaction {
        async fn create_supplier(&mut self, supplier: &Supplier) -> RepoResult<Supplier> {
            self.staged.push("supplier".into());
            Ok(Supplier {
                id: 10,
                version: 1,
                ..supplier.clone()
            })
        }

        async fn create_address(&mut self, address: &Address) -> RepoResult<Address> {
            assert_eq!(address.supplier_id, Some(10));
            self.staged.push("address".into());
            Ok(Address {
                id: 20,
                ..address.clone()
            })
        }

        async fn create_contact(&mut self, contact: &Contact) -> RepoResult<Contact> {
            if self.faults.panic_on_contact {
                panic!("contact insert blew up");
            }
            assert_eq!(contact.supplier_id, Some(10));
            self.staged.push("contact".into());
            Ok(Contact {
                id: 30,
                ..contact.clone()
            })
        }

        async fn create_category_relation(
            &mut self,
            supplier_id: i64,
            category_id: i64,
        ) -> RepoResult<SupplierCategoryRelation> {
            self.relations += 1;
            if self.faults.fail_relation_at == Some(self.relations) {
                return Err(RepositoryError::InvalidForeignKey(format!(
                    "category {} does not exist",
                    category_id
                )));
            }
            self.staged.push(format!("relation:{}", category_id));
            Ok(SupplierCategoryRelation {
                supplier_id,
                category_id,
                created_at: Utc::now(),
                version: 1,
                updated_at: Utc::now(),
            })
        }

        async fn commit(&mut self) -> RepoResult<()> {
            let mut journal = self.journal.lock().unwrap();
            journal.commits += 1;
            if self.faults.fail_commit {
                return Err(RepositoryError::Transaction("connection reset on commit".into()));
            }
            journal.committed_rows.append(&mut self.staged);
            Ok(())
        }

        async fn rollback(&mut self) -> RepoResult<()> {
            self.staged.clear();
            self.journal.lock().unwrap().rollbacks += 1;
            if self.faults.fail_rollback {
                return Err(RepositoryError::Transaction("rollback lost connection".into()));
            }
            Ok(())
        }
    }

    fn service(faults: Faults) -> (SupplierFullService<FakeRepository>, Arc<Mutex<Journal>>) {
        let journal = Arc::new(Mutex::new(Journal::default()));
        let repository = FakeRepository {
            journal: journal.clone(),
            faults,
        };
        (SupplierFullService::new(Arc::new(repository)), journal)
    }

    fn full(category_ids: Vec<i64>) -> SupplierFull {
        SupplierFull {
            supplier: Some(Supplier {
                name: "Distribuidora Norte".into(),
                cnpj: Some("12345678000199".into()),
                status: true,
                ..Default::default()
            }),
            address: Some(Address {
                street: "Av. Paulista".into(),
                number: "1000".into(),
                city: "São Paulo".into(),
                state: "SP".into(),
                country: "Brasil".into(),
                postal_code: "01310-100".into(),
                ..Default::default()
            }),
            contact: Some(Contact {
                contact_name: "Carla Mendes".into(),
                email: "carla@norte.com.br".into(),
                phone: Some("1133334444".into()),
                ..Default::default()
            }),
            category_ids,
        }
    }

    #[actix_web::test]
    async fn test_success_commits_every_row() {
        let (service, journal) = service(Faults::default());

        let created = service.create(full(vec![1, 2, 2, 3])).await.unwrap();
        assert_eq!(created.supplier.id, 10);
        assert_eq!(created.address.supplier_id, Some(10));
        assert_eq!(created.contact.supplier_id, Some(10));
        assert_eq!(created.categories.len(), 3);

        let journal = journal.lock().unwrap();
        assert_eq!((journal.begun, journal.commits, journal.rollbacks), (1, 1, 0));
        assert_eq!(
            journal.committed_rows,
            vec!["supplier", "address", "contact", "relation:1", "relation:2", "relation:3"]
        );
    }

    #[actix_web::test]
    async fn test_failed_relation_rolls_back_everything() {
        for step in 2..=3 {
            let (service, journal) = service(Faults {
                fail_relation_at: Some(step),
                ..Default::default()
            });

            let err = service.create(full(vec![1, 2, 3])).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidForeignKey);

            let journal = journal.lock().unwrap();
            assert_eq!(journal.rollbacks, 1);
            assert_eq!(journal.commits, 0);
            assert!(journal.committed_rows.is_empty());
        }
    }

    #[actix_web::test]
    async fn test_rollback_failure_is_reported_with_cause() {
        let (service, journal) = service(Faults {
            fail_relation_at: Some(1),
            fail_rollback: true,
            ..Default::default()
        });

        let err = service.create(full(vec![4])).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("category 4 does not exist"));
        assert!(message.contains("rollback lost connection"));
        assert_eq!(err.kind(), ErrorKind::InvalidForeignKey);
        assert_eq!(journal.lock().unwrap().rollbacks, 1);
    }

    #[actix_web::test]
    async fn test_commit_failure_attempts_rollback() {
        let (service, journal) = service(Faults {
            fail_commit: true,
            ..Default::default()
        });

        let err = service.create(full(vec![1])).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transaction);

        let journal = journal.lock().unwrap();
        assert_eq!((journal.commits, journal.rollbacks), (1, 1));
        assert!(journal.committed_rows.is_empty());
    }

    #[actix_web::test]
    async fn test_panic_rolls_back_before_propagating() {
        let (service, journal) = service(Faults {
            panic_on_contact: true,
            ..Default::default()
        });

        let outcome = AssertUnwindSafe(service.create(full(vec![1])))
            .catch_unwind()
            .await;
        assert!(outcome.is_err());

        let journal = journal.lock().unwrap();
        assert_eq!(journal.rollbacks, 1);
        assert!(journal.committed_rows.is_empty());
    }

    #[actix_web::test]
    async fn test_missing_parts_fail_without_transaction() {
        let cases = [
            SupplierFull {
                supplier: None,
                ..full(vec![1])
            },
            SupplierFull {
                address: None,
                ..full(vec![1])
            },
            SupplierFull {
                contact: None,
                ..full(vec![1])
            },
            full(Vec::new()),
        ];

        for case in cases {
            let (service, journal) = service(Faults::default());
            let err = service.create(case).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NilModel);
            assert_eq!(journal.lock().unwrap().begun, 0);
        }
    }

    #[actix_web::test]
    async fn test_invalid_parts_fail_without_transaction() {
        let (service, journal) = service(Faults::default());

        let mut bad_contact = full(vec![1]);
        if let Some(contact) = bad_contact.contact.as_mut() {
            contact.email = "nope".into();
        }
        let err = service.create(bad_contact).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);

        let err = service.create(full(vec![1, 0])).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ZeroId);

        assert_eq!(journal.lock().unwrap().begun, 0);
    }
}
