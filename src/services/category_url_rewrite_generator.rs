// src/services/category_url_rewrite_generator.rs
//
// Full rewrite set for one category: the canonical rewrite plus the
// regenerated stored rewrites, per store.

use std::sync::Arc;

use crate::domain::{validate_category, Category};
use crate::error::AppResult;
use crate::services::canonical_url_rewrite_generator::CanonicalUrlRewriteGenerator;
use crate::services::current_url_rewrites_regenerator::CurrentUrlRewritesRegenerator;
use crate::services::merge_data_provider::{MergeDataProvider, UrlRewriteMap};

pub struct CategoryUrlRewriteGenerator {
    canonical: CanonicalUrlRewriteGenerator,
    current: CurrentUrlRewritesRegenerator,
}

impl CategoryUrlRewriteGenerator {
    pub fn new(canonical: CanonicalUrlRewriteGenerator, current: CurrentUrlRewritesRegenerator) -> Self {
        Self { canonical, current }
    }

    /// Generate rewrites for `target` in every given store.
    /// `original` is the category as stored before the change.
    pub fn generate(
        &self,
        original: &Category,
        target: &Category,
        store_ids: &[u32],
    ) -> AppResult<UrlRewriteMap> {
        validate_category(target)?;

        let mut merged = MergeDataProvider::new();
        for &store_id in store_ids {
            merged.merge(self.canonical.generate(store_id, target).into_values());
            merged.merge(self.current.generate(store_id, original, target)?.into_values());
        }

        log::info!(
            "Generated {} rewrites for category {} across {} stores",
            merged.len(),
            target.entity_id,
            store_ids.len()
        );

        Ok(merged.into_data())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RewriteConfig;
    use crate::domain::{EntityType, RedirectType, UrlRewrite};
    use crate::repositories::MockUrlRewriteFinder;
    use crate::services::category_url_path_generator::CategoryUrlPathGenerator;

    fn generator(finder: MockUrlRewriteFinder) -> CategoryUrlRewriteGenerator {
        let config = Arc::new(RewriteConfig::default());
        let paths = Arc::new(CategoryUrlPathGenerator::new(config.clone()));
        CategoryUrlRewriteGenerator::new(
            CanonicalUrlRewriteGenerator::new(paths.clone()),
            CurrentUrlRewritesRegenerator::new(paths, Arc::new(finder), config),
        )
    }

    #[test]
    fn test_moved_category_gets_canonical_and_redirect() {
        let original = Category::new(12, "Tops").with_parent("men", 2);
        let target = Category::new(12, "Tops")
            .with_parent("women", 2)
            .with_save_rewrites_history(true);

        let mut finder = MockUrlRewriteFinder::new();
        finder.expect_find_all_by_data().times(2).returning(|c| {
            let store_id = c.store_id.unwrap_or_default();
            Ok(vec![UrlRewrite::new(
                EntityType::Category,
                12,
                store_id,
                "men/tops.html",
                "catalog/category/view/id/12",
            )
            .with_autogenerated(true)])
        });

        let result = generator(finder).generate(&original, &target, &[1, 2]).unwrap();

        assert_eq!(result.len(), 4);
        for store_id in [1, 2] {
            let canonical = &result[&format!("women/tops.html_{}", store_id)];
            assert!(canonical.is_autogenerated);
            assert_eq!(canonical.target_path, "catalog/category/view/id/12");

            let redirect = &result[&format!("men/tops.html_{}", store_id)];
            assert_eq!(redirect.redirect_type, RedirectType::Permanent);
            assert_eq!(redirect.target_path, "women/tops.html");
        }
    }

    #[test]
    fn test_invalid_category_rejected() {
        let mut finder = MockUrlRewriteFinder::new();
        finder.expect_find_all_by_data().times(0);

        let category = Category::new(12, "");
        assert!(generator(finder).generate(&category, &category, &[1]).is_err());
    }
}
