mod address;
mod category;
mod client;
mod contact;
mod relation;
mod supplier;
mod supplier_full;

pub use address::{AddressRepository, AddressRepositoryTrait};
pub use category::{CategoryRepository, CategoryRepositoryTrait};
pub use client::{ClientRepository, ClientRepositoryTrait};
pub use contact::{ContactRepository, ContactRepositoryTrait};
pub use relation::{PgRelationRepository, RelationRepositoryTrait};
pub use supplier::{SupplierRepository, SupplierRepositoryTrait};
pub use supplier_full::{
    SupplierFullRepository, SupplierFullRepositoryTrait, SupplierFullTransaction,
};

#[cfg(test)]
pub use address::MockAddressRepositoryTrait;
#[cfg(test)]
pub use category::MockCategoryRepositoryTrait;
#[cfg(test)]
pub use client::MockClientRepositoryTrait;
#[cfg(test)]
pub use contact::MockContactRepositoryTrait;
#[cfg(test)]
pub use relation::MockRelationRepositoryTrait;
#[cfg(test)]
pub use supplier::MockSupplierRepositoryTrait;
