mod address;
mod category;
mod client;
mod contact;
mod relation;
mod supplier;
mod supplier_full;

pub use address::{Address, AddressDto};
pub use category::{CategoryDto, CategoryResponseDto, ProductCategory};
pub use client::{Client, ClientDto, ClientFilter, ClientFilterDto, ClientResponseDto};
pub use contact::{Contact, ContactDto};
pub use relation::{
    ProductCategoryRelation, Relation, RelationEnvelopeDto, RelationExistsDto,
    RelationResponseDto, SupplierCategoryRelation, SupplierContactRelation, UserCategoryRelation,
};
pub use supplier::{
    Supplier, SupplierDto, SupplierFilter, SupplierFilterDto, SupplierResponseDto,
};
pub use supplier_full::{SupplierFull, SupplierFullCreated, SupplierFullDto};
