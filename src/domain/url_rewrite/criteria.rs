use super::entity::EntityType;

/// Lookup criteria for stored rewrites.
/// Unset optional fields match any value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRewriteCriteria {
    pub entity_type: EntityType,
    pub entity_id: Option<u64>,
    pub store_id: Option<u32>,
}

impl UrlRewriteCriteria {
    /// All rewrites of one entity in one store
    pub fn for_entity(entity_type: EntityType, entity_id: u64, store_id: u32) -> Self {
        Self {
            entity_type,
            entity_id: Some(entity_id),
            store_id: Some(store_id),
        }
    }

    /// All rewrites of one entity across every store
    pub fn for_entity_in_all_stores(entity_type: EntityType, entity_id: u64) -> Self {
        Self {
            entity_type,
            entity_id: Some(entity_id),
            store_id: None,
        }
    }
}
