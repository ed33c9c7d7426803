use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::{postgres::PgRow, FromRow};

/// A row of a many-to-many join table.
///
/// The `(parent_id, child_id)` pair is the primary key; the constants describe
/// where the pair lives so a single repository implementation can serve every
/// join table.
pub trait Relation:
    for<'r> FromRow<'r, PgRow> + Serialize + Clone + Debug + Send + Sync + Unpin + 'static
{
    const TABLE: &'static str;
    const PARENT_COLUMN: &'static str;
    const CHILD_COLUMN: &'static str;
    /// Human-readable name used in logs and error messages
    const NAME: &'static str;

    fn parent_id(&self) -> i64;
    fn child_id(&self) -> i64;
}

macro_rules! relation {
    (
        $(#[$meta:meta])*
        $name:ident {
            table: $table:literal,
            name: $label:literal,
            parent: $parent:ident,
            child: $child:ident,
            $( $field:ident : $ty:ty, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
        pub struct $name {
            pub $parent: i64,
            pub $child: i64,
            pub created_at: DateTime<Utc>,
            $( pub $field: $ty, )*
        }

        impl Relation for $name {
            const TABLE: &'static str = $table;
            const PARENT_COLUMN: &'static str = stringify!($parent);
            const CHILD_COLUMN: &'static str = stringify!($child);
            const NAME: &'static str = $label;

            fn parent_id(&self) -> i64 {
                self.$parent
            }

            fn child_id(&self) -> i64 {
                self.$child
            }
        }
    };
}

relation! {
    /// Links a product to one of its categories
    ProductCategoryRelation {
        table: "product_category_relations",
        name: "product category relation",
        parent: product_id,
        child: category_id,
    }
}

relation! {
    /// Links a supplier to a category it supplies. Versioned.
    SupplierCategoryRelation {
        table: "supplier_category_relations",
        name: "supplier category relation",
        parent: supplier_id,
        child: category_id,
        version: i32,
        updated_at: DateTime<Utc>,
    }
}

relation! {
    /// Links a user to a category of interest
    UserCategoryRelation {
        table: "user_category_relations",
        name: "user category relation",
        parent: user_id,
        child: category_id,
    }
}

relation! {
    /// Links a supplier to one of its contacts
    SupplierContactRelation {
        table: "supplier_contact_relations",
        name: "supplier contact relation",
        parent: supplier_id,
        child: contact_id,
    }
}

/// Request body for relation creation: `{"relation": {"category_id": 3}}`.
///
/// A missing `relation` object is rejected by the handler with a 400.
#[derive(Debug, Deserialize)]
pub struct RelationEnvelopeDto {
    pub relation: Option<RelationDto>,
}

/// Child side of a relation request, keyed by the join table's child column
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct RelationDto {
    fields: Map<String, Value>,
}

impl RelationDto {
    /// The child id stored under `R::CHILD_COLUMN`; other keys are ignored
    pub fn child_id<R: Relation>(&self) -> Option<i64> {
        self.fields.get(R::CHILD_COLUMN).and_then(Value::as_i64)
    }
}

/// Relation as returned to clients, flagged with whether this call created it
#[derive(Debug, Serialize)]
pub struct RelationResponseDto<R> {
    pub created: bool,
    #[serde(flatten)]
    pub relation: R,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RelationExistsDto {
    pub exists: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_relation_metadata() {
        assert_eq!(SupplierContactRelation::TABLE, "supplier_contact_relations");
        assert_eq!(SupplierContactRelation::PARENT_COLUMN, "supplier_id");
        assert_eq!(SupplierContactRelation::CHILD_COLUMN, "contact_id");
        assert_eq!(ProductCategoryRelation::CHILD_COLUMN, "category_id");
    }

    #[test]
    fn test_envelope_reads_own_child_column() {
        let dto: RelationEnvelopeDto =
            serde_json::from_value(json!({"relation": {"category_id": 4}})).unwrap();
        let child = dto.relation.unwrap();
        assert_eq!(child.child_id::<ProductCategoryRelation>(), Some(4));
        assert_eq!(child.child_id::<SupplierContactRelation>(), None);

        let dto: RelationEnvelopeDto =
            serde_json::from_value(json!({"relation": {"contact_id": "4"}})).unwrap();
        assert_eq!(dto.relation.unwrap().child_id::<SupplierContactRelation>(), None);

        let dto: RelationEnvelopeDto = serde_json::from_value(json!({})).unwrap();
        assert!(dto.relation.is_none());
    }

    #[test]
    fn test_response_flattens_relation() {
        let relation = UserCategoryRelation {
            user_id: 1,
            category_id: 2,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(RelationResponseDto {
            created: false,
            relation,
        })
        .unwrap();
        assert_eq!(value["created"], false);
        assert_eq!(value["user_id"], 1);
        assert_eq!(value["category_id"], 2);
    }
}
