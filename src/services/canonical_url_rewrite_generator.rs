// src/services/canonical_url_rewrite_generator.rs
//
// Emits the one autogenerated rewrite that maps a category's storefront
// path onto its system route.

use std::sync::Arc;

use crate::domain::{Category, EntityType, UrlRewrite};
use crate::services::category_url_path_generator::UrlPathGenerator;
use crate::services::merge_data_provider::{MergeDataProvider, UrlRewriteMap};

pub struct CanonicalUrlRewriteGenerator {
    path_generator: Arc<dyn UrlPathGenerator>,
}

impl CanonicalUrlRewriteGenerator {
    pub fn new(path_generator: Arc<dyn UrlPathGenerator>) -> Self {
        Self { path_generator }
    }

    /// Empty for categories without a storefront path
    pub fn generate(&self, store_id: u32, category: &Category) -> UrlRewriteMap {
        let mut merged = MergeDataProvider::new();

        if let Some(request_path) = self.path_generator.url_path_with_suffix(category, store_id) {
            let target_path = self.path_generator.canonical_url_path(category);
            merged.merge(Some(
                UrlRewrite::new(
                    EntityType::Category,
                    category.entity_id,
                    store_id,
                    request_path,
                    target_path,
                )
                .with_autogenerated(true),
            ));
        }

        merged.into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RewriteConfig;
    use crate::domain::RedirectType;
    use crate::services::category_url_path_generator::CategoryUrlPathGenerator;

    fn generator() -> CanonicalUrlRewriteGenerator {
        CanonicalUrlRewriteGenerator::new(Arc::new(CategoryUrlPathGenerator::new(Arc::new(
            RewriteConfig::default(),
        ))))
    }

    #[test]
    fn test_canonical_rewrite() {
        let category = Category::new(12, "Tops").with_parent("men", 2);
        let result = generator().generate(1, &category);

        let rewrite = &result["men/tops.html_1"];
        assert_eq!(rewrite.target_path, "catalog/category/view/id/12");
        assert_eq!(rewrite.redirect_type, RedirectType::NoRedirect);
        assert!(rewrite.is_autogenerated);
    }

    #[test]
    fn test_root_category_gets_nothing() {
        let root = Category::new(2, "Default Category").with_level(1);
        assert!(generator().generate(1, &root).is_empty());
    }
}
