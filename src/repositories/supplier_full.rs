use async_trait::async_trait;
use log::{debug, error, warn};
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use super::address::insert_address;
use super::contact::insert_contact;
use super::relation::insert_relation;
use super::supplier::insert_supplier;
use crate::db::Database;
use crate::errors::RepositoryError;
use crate::models::{Address, Contact, Supplier, SupplierCategoryRelation};

type Result<T> = std::result::Result<T, RepositoryError>;

/// Writes that make up one SupplierFull create, all on the same open
/// transaction.
///
/// After `commit` or `rollback` the transaction is closed: further writes
/// fail with `RepositoryError::Transaction`, a second `rollback` is a no-op.
#[async_trait]
pub trait SupplierFullTransaction: Send {
    async fn create_supplier(&mut self, supplier: &Supplier) -> Result<Supplier>;
    async fn create_address(&mut self, address: &Address) -> Result<Address>;
    async fn create_contact(&mut self, contact: &Contact) -> Result<Contact>;
    async fn create_category_relation(
        &mut self,
        supplier_id: i64,
        category_id: i64,
    ) -> Result<SupplierCategoryRelation>;
    async fn commit(&mut self) -> Result<()>;
    async fn rollback(&mut self) -> Result<()>;
}

/// Opens transactions for the SupplierFull orchestrator
#[async_trait]
pub trait SupplierFullRepositoryTrait: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn SupplierFullTransaction>>;
}

pub struct SupplierFullRepository {
    pool: PgPool,
}

impl SupplierFullRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.get_pool().clone(),
        }
    }
}

#[async_trait]
impl SupplierFullRepositoryTrait for SupplierFullRepository {
    async fn begin(&self) -> Result<Box<dyn SupplierFullTransaction>> {
        let tx = self.pool.begin().await.map_err(|e| {
            error!("Failed to start database transaction: {}", e);
            RepositoryError::Transaction(e.to_string())
        })?;
        debug!("Opened SupplierFull transaction");

        Ok(Box::new(PgSupplierFullTransaction { tx: Some(tx) }))
    }
}

/// Holds one pooled connection until commit, rollback or drop.
///
/// Dropping it while still open (request cancelled, deadline hit) hands the
/// connection back to sqlx, which rolls the transaction back.
pub struct PgSupplierFullTransaction {
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgSupplierFullTransaction {
    fn conn(&mut self) -> Result<&mut PgConnection> {
        self.tx
            .as_deref_mut()
            .ok_or_else(|| RepositoryError::Transaction("transaction already closed".to_string()))
    }
}

#[async_trait]
impl SupplierFullTransaction for PgSupplierFullTransaction {
    async fn create_supplier(&mut self, supplier: &Supplier) -> Result<Supplier> {
        insert_supplier(self.conn()?, supplier).await
    }

    async fn create_address(&mut self, address: &Address) -> Result<Address> {
        insert_address(self.conn()?, address).await
    }

    async fn create_contact(&mut self, contact: &Contact) -> Result<Contact> {
        insert_contact(self.conn()?, contact).await
    }

    async fn create_category_relation(
        &mut self,
        supplier_id: i64,
        category_id: i64,
    ) -> Result<SupplierCategoryRelation> {
        insert_relation(self.conn()?, supplier_id, category_id).await
    }

    async fn commit(&mut self) -> Result<()> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| RepositoryError::Transaction("transaction already closed".to_string()))?;

        tx.commit().await.map_err(|e| {
            error!("Failed to commit transaction: {}", e);
            RepositoryError::Transaction(e.to_string())
        })
    }

    async fn rollback(&mut self) -> Result<()> {
        match self.tx.take() {
            Some(tx) => tx.rollback().await.map_err(|e| {
                error!("Failed to roll back transaction: {}", e);
                RepositoryError::Transaction(e.to_string())
            }),
            None => Ok(()),
        }
    }
}

impl Drop for PgSupplierFullTransaction {
    fn drop(&mut self) {
        if self.tx.is_some() {
            warn!("SupplierFull transaction dropped while open, rolling back");
        }
    }
}
