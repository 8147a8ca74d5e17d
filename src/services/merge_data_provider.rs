// src/services/merge_data_provider.rs
//
// Accumulates generated rewrites under their merge key ("{request_path}_{store_id}").
// A later rewrite for the same key replaces the earlier one.

use std::collections::BTreeMap;

use crate::domain::UrlRewrite;

/// Generated rewrites keyed by `{request_path}_{store_id}`
pub type UrlRewriteMap = BTreeMap<String, UrlRewrite>;

#[derive(Debug, Clone, Default)]
pub struct MergeDataProvider {
    data: UrlRewriteMap,
}

impl MergeDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrites with an empty request path produce the key "_{store_id}"
    /// and are skipped.
    pub fn merge<I>(&mut self, rewrites: I)
    where
        I: IntoIterator<Item = UrlRewrite>,
    {
        for rewrite in rewrites {
            if rewrite.request_path.is_empty() {
                log::warn!(
                    "Skipping rewrite with empty request path for {} {} in store {}",
                    rewrite.entity_type,
                    rewrite.entity_id,
                    rewrite.store_id
                );
                continue;
            }
            self.data.insert(rewrite.merge_key(), rewrite);
        }
    }

    pub fn into_data(self) -> UrlRewriteMap {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
