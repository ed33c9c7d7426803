use serde::{Deserialize, Serialize};

use super::{
    Address, AddressDto, Contact, ContactDto, Supplier, SupplierCategoryRelation, SupplierDto,
    SupplierResponseDto,
};

/// Supplier aggregate created in one transaction.
///
/// Never stored as one row: it is split into the supplier, address and
/// contact rows plus one supplier–category relation per category.
#[derive(Debug, Clone, Default)]
pub struct SupplierFull {
    pub supplier: Option<Supplier>,
    pub address: Option<Address>,
    pub contact: Option<Contact>,
    pub category_ids: Vec<i64>,
}

/// Rows written by a committed [`SupplierFull`] create
#[derive(Debug, Serialize)]
pub struct SupplierFullCreated {
    pub supplier: SupplierResponseDto,
    pub address: Address,
    pub contact: Contact,
    pub categories: Vec<SupplierCategoryRelation>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryRefDto {
    pub id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SupplierFullDto {
    pub supplier: Option<SupplierDto>,
    pub address: Option<AddressDto>,
    pub contact: Option<ContactDto>,
    #[serde(default)]
    pub categories: Vec<CategoryRefDto>,
}

impl From<SupplierFullDto> for SupplierFull {
    fn from(dto: SupplierFullDto) -> Self {
        SupplierFull {
            supplier: dto.supplier.map(Supplier::from),
            address: dto.address.map(Address::from),
            contact: dto.contact.map(Contact::from),
            category_ids: dto.categories.into_iter().map(|c| c.id).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_missing_parts_stay_empty() {
        let dto: SupplierFullDto = serde_json::from_value(json!({
            "supplier": {"name": "Acme"},
            "categories": [{"id": 3}, {"id": 5}]
        }))
        .unwrap();

        let full = SupplierFull::from(dto);
        assert_eq!(full.supplier.unwrap().name, "Acme");
        assert!(full.address.is_none());
        assert!(full.contact.is_none());
        assert_eq!(full.category_ids, vec![3, 5]);
    }
}
