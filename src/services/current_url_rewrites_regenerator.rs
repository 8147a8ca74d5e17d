// src/services/current_url_rewrites_regenerator.rs
//
// Current URL Rewrites Regenerator
//
// Decides, for every rewrite currently stored for a category in a store,
// whether it survives a category change and where it points afterwards.
//
// CRITICAL RULES:
// - Read-only: never persists, persistence belongs to the caller
// - Autogenerated rewrites only survive as permanent redirects, and only
//   when the category keeps its rewrite history
// - Custom rewrites keep request path, redirect type and description
// - A rewrite whose request path equals its resolved target is dropped
// - Missing current path or no stored rewrites => empty result, not an error

use std::cell::OnceCell;
use std::sync::Arc;

use crate::config::RewriteConfig;
use crate::domain::{
    validate_url_rewrite, Category, EntityType, RedirectType, UrlRewrite, UrlRewriteCriteria,
};
use crate::error::AppResult;
use crate::repositories::UrlRewriteFinder;
use crate::services::category_url_path_generator::UrlPathGenerator;
use crate::services::merge_data_provider::{MergeDataProvider, UrlRewriteMap};

pub struct CurrentUrlRewritesRegenerator {
    path_generator: Arc<dyn UrlPathGenerator>,
    finder: Arc<dyn UrlRewriteFinder>,
    config: Arc<RewriteConfig>,
}

impl CurrentUrlRewritesRegenerator {
    pub fn new(
        path_generator: Arc<dyn UrlPathGenerator>,
        finder: Arc<dyn UrlRewriteFinder>,
        config: Arc<RewriteConfig>,
    ) -> Self {
        Self {
            path_generator,
            finder,
            config,
        }
    }

    /// Regenerate the stored rewrites of `original` for `target`.
    ///
    /// Stored rewrites are looked up by the original category's id; emitted
    /// rewrites belong to the target category. Both are the same category
    /// for a plain save.
    pub fn generate(
        &self,
        store_id: u32,
        original: &Category,
        target: &Category,
    ) -> AppResult<UrlRewriteMap> {
        let criteria =
            UrlRewriteCriteria::for_entity(EntityType::Category, original.entity_id, store_id);
        let current_rewrites = self.finder.find_all_by_data(&criteria)?;

        let current_target_path = OnceCell::new();
        let mut merged = MergeDataProvider::new();

        for rewrite in &current_rewrites {
            let generated = if rewrite.is_autogenerated {
                self.generate_for_autogenerated(rewrite, store_id, target, &current_target_path)
            } else {
                self.generate_for_custom(rewrite, store_id, target, &current_target_path)
            };
            merged.merge(generated.filter(is_valid));
        }

        log::debug!(
            "Regenerated {} of {} stored rewrites for category {} in store {}",
            merged.len(),
            current_rewrites.len(),
            target.entity_id,
            store_id
        );

        Ok(merged.into_data())
    }

    /// Current storefront path of the target category, computed on first use
    fn current_target_path<'c>(
        &self,
        cache: &'c OnceCell<Option<String>>,
        target: &Category,
        store_id: u32,
    ) -> Option<&'c str> {
        cache
            .get_or_init(|| self.path_generator.url_path_with_suffix(target, store_id))
            .as_deref()
    }

    fn generate_for_autogenerated(
        &self,
        rewrite: &UrlRewrite,
        store_id: u32,
        target: &Category,
        cache: &OnceCell<Option<String>>,
    ) -> Option<UrlRewrite> {
        if !target.saves_rewrites_history(self.config.save_rewrites_history_default) {
            log::debug!("Dropping autogenerated rewrite '{}': history not kept", rewrite.request_path);
            return None;
        }

        let target_path = self.current_target_path(cache, target, store_id)?;
        if rewrite.request_path == target_path {
            return None;
        }

        Some(
            UrlRewrite::new(
                EntityType::Category,
                target.entity_id,
                store_id,
                rewrite.request_path.clone(),
                target_path,
            )
            .with_redirect_type(RedirectType::Permanent)
            .with_autogenerated(false)
            .with_metadata(rewrite.metadata.clone()),
        )
    }

    /// A non-redirecting custom rewrite points at a target the user chose,
    /// which is kept. A redirecting one pointed at the category's generated
    /// path, which moves with the category.
    fn generate_for_custom(
        &self,
        rewrite: &UrlRewrite,
        store_id: u32,
        target: &Category,
        cache: &OnceCell<Option<String>>,
    ) -> Option<UrlRewrite> {
        let target_path = if rewrite.is_redirect() {
            self.current_target_path(cache, target, store_id)?
        } else {
            rewrite.target_path.as_str()
        };

        if rewrite.request_path == target_path {
            return None;
        }

        Some(
            UrlRewrite::new(
                EntityType::Category,
                target.entity_id,
                store_id,
                rewrite.request_path.clone(),
                target_path,
            )
            .with_redirect_type(rewrite.redirect_type)
            .with_autogenerated(false)
            .with_description(rewrite.description.clone())
            .with_metadata(rewrite.metadata.clone()),
        )
    }
}

fn is_valid(rewrite: &UrlRewrite) -> bool {
    match validate_url_rewrite(rewrite) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Skipping regenerated rewrite '{}': {}", rewrite.request_path, e);
            false
        }
    }
}
