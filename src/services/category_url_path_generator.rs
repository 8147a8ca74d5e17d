// src/services/category_url_path_generator.rs
//
// Category URL Path Generator
//
// Computes the storefront path a category currently resolves to.
// Deterministic: the same category state always yields the same path.

use std::sync::Arc;

use regex::Regex;

use crate::config::RewriteConfig;
use crate::domain::Category;

/// System route every category rewrite ultimately points at
pub const CATEGORY_CANONICAL_PATH_PREFIX: &str = "catalog/category/view/id/";

/// Computes category paths for rewrite generation
#[cfg_attr(test, mockall::automock)]
pub trait UrlPathGenerator: Send + Sync {
    /// Storefront path with the store's suffix, e.g. "men/tops.html".
    /// None when the category has no storefront path (tree roots).
    fn url_path_with_suffix(&self, category: &Category, store_id: u32) -> Option<String>;

    /// System path of the category page, e.g. "catalog/category/view/id/12"
    fn canonical_url_path(&self, category: &Category) -> String;
}

pub struct CategoryUrlPathGenerator {
    config: Arc<RewriteConfig>,
    non_url_chars: Regex,
}

impl CategoryUrlPathGenerator {
    pub fn new(config: Arc<RewriteConfig>) -> Self {
        Self {
            config,
            non_url_chars: Regex::new(r"[^\p{L}\p{N}]+").unwrap(),
        }
    }

    /// Lowercase, runs of anything but letters and digits collapse to one '-'
    pub fn format_url_key(&self, value: &str) -> String {
        let lowered = value.to_lowercase();
        self.non_url_chars
            .replace_all(&lowered, "-")
            .trim_matches('-')
            .to_string()
    }

    /// Explicit URL key, or one derived from the name
    pub fn url_key(&self, category: &Category) -> String {
        match category.url_key.as_deref() {
            Some(key) if !key.trim().is_empty() => self.format_url_key(key),
            _ => self.format_url_key(&category.name),
        }
    }

    /// Path without suffix: explicit url_path, else parent path + url key.
    /// Empty for root categories.
    pub fn url_path(&self, category: &Category) -> String {
        if category.is_root() {
            return String::new();
        }
        if let Some(path) = category.url_path.as_deref().filter(|p| !p.is_empty()) {
            return path.trim_matches('/').to_string();
        }

        let url_key = self.url_key(category);
        match category.parent_url_path.as_deref().map(|p| p.trim_matches('/')) {
            Some(parent) if !parent.is_empty() && !url_key.is_empty() => {
                format!("{}/{}", parent, url_key)
            }
            _ => url_key,
        }
    }
}

impl UrlPathGenerator for CategoryUrlPathGenerator {
    fn url_path_with_suffix(&self, category: &Category, store_id: u32) -> Option<String> {
        let path = self.url_path(category);
        if path.is_empty() {
            return None;
        }
        Some(format!("{}{}", path, self.config.category_url_suffix_for(store_id)))
    }

    fn canonical_url_path(&self, category: &Category) -> String {
        format!("{}{}", CATEGORY_CANONICAL_PATH_PREFIX, category.entity_id)
    }
}
