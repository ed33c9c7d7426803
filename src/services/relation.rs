use std::{marker::PhantomData, sync::Arc};

use log::{debug, info, warn};

use crate::errors::{Operation, RepositoryError, ServiceError};
use crate::models::Relation;
use crate::repositories::RelationRepositoryTrait;

type Result<T> = std::result::Result<T, ServiceError>;

/// Business rules around a join table.
///
/// Creating a pair that already exists is not an error: the stored row is
/// returned with `created == false`, so callers never need to pre-check.
pub struct RelationService<R, T> {
    repository: Arc<T>,
    _relation: PhantomData<fn() -> R>,
}

impl<R, T> RelationService<R, T>
where
    R: Relation,
    T: RelationRepositoryTrait<R>,
{
    pub fn new(repository: Arc<T>) -> Self {
        Self {
            repository,
            _relation: PhantomData,
        }
    }

    fn check_parent(parent_id: i64) -> Result<()> {
        if parent_id <= 0 {
            return Err(ServiceError::ZeroId(R::PARENT_COLUMN));
        }
        Ok(())
    }

    fn check_pair(parent_id: i64, child_id: i64) -> Result<()> {
        Self::check_parent(parent_id)?;
        if child_id <= 0 {
            return Err(ServiceError::ZeroId(R::CHILD_COLUMN));
        }
        Ok(())
    }

    /// Creates the pair or returns the stored one.
    ///
    /// Returns the relation and whether this call inserted it.
    pub async fn create(&self, parent_id: i64, child_id: i64) -> Result<(R, bool)> {
        Self::check_pair(parent_id, child_id)?;

        match self.repository.create(parent_id, child_id).await {
            Ok(relation) => {
                info!(
                    "Created {}: parent_id={} child_id={}",
                    R::NAME,
                    parent_id,
                    child_id
                );
                Ok((relation, true))
            }
            Err(RepositoryError::RelationExists) => {
                let existing = self
                    .repository
                    .find(parent_id, child_id)
                    .await
                    .map_err(|e| ServiceError::from_repository(Operation::Get, e))?;

                match existing {
                    Some(relation) => {
                        debug!(
                            "{} already exists: parent_id={} child_id={}",
                            R::NAME,
                            relation.parent_id(),
                            relation.child_id()
                        );
                        Ok((relation, false))
                    }
                    None => {
                        // Deleted between the conflicting insert and the lookup
                        warn!(
                            "{} reported as existing but not found: parent_id={} child_id={}",
                            R::NAME,
                            parent_id,
                            child_id
                        );
                        Err(ServiceError::RelationExists)
                    }
                }
            }
            Err(e) => Err(ServiceError::from_repository(Operation::Create, e)),
        }
    }

    pub async fn has_relation(&self, parent_id: i64, child_id: i64) -> Result<bool> {
        Self::check_pair(parent_id, child_id)?;

        self.repository
            .has_relation(parent_id, child_id)
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Get, e))
    }

    pub async fn get_all_by_parent_id(&self, parent_id: i64) -> Result<Vec<R>> {
        Self::check_parent(parent_id)?;

        self.repository
            .get_all_by_parent_id(parent_id)
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Get, e))
    }

    pub async fn delete(&self, parent_id: i64, child_id: i64) -> Result<()> {
        Self::check_pair(parent_id, child_id)?;

        self.repository
            .delete(parent_id, child_id)
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Delete, e))?;

        info!(
            "Deleted {}: parent_id={} child_id={}",
            R::NAME,
            parent_id,
            child_id
        );
        Ok(())
    }

    pub async fn delete_all(&self, parent_id: i64) -> Result<()> {
        Self::check_parent(parent_id)?;

        self.repository
            .delete_all(parent_id)
            .await
            .map_err(|e| ServiceError::from_repository(Operation::Delete, e))
    }
}
