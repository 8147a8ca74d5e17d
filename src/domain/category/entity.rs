use serde::{Deserialize, Serialize};

/// Level at and below which a category is a tree root with no storefront URL
pub const ROOT_CATEGORY_LEVEL: u32 = 1;

/// A catalog category, as seen by URL rewrite generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub entity_id: u64,

    pub name: String,

    /// Explicit URL key. When absent the key is derived from the name.
    pub url_key: Option<String>,

    /// URL path of the parent category, if the parent has one
    pub parent_url_path: Option<String>,

    /// Explicit full URL path, overrides the computed one
    pub url_path: Option<String>,

    /// Depth in the category tree (0 = tree root, 1 = store root)
    pub level: u32,

    /// Keep the old URLs as permanent redirects when the path changes.
    /// None defers to the configured default.
    pub save_rewrites_history: Option<bool>,
}

impl Category {
    /// Create a first-level storefront category
    pub fn new(entity_id: u64, name: impl Into<String>) -> Self {
        Self {
            entity_id,
            name: name.into(),
            url_key: None,
            parent_url_path: None,
            url_path: None,
            level: ROOT_CATEGORY_LEVEL + 1,
            save_rewrites_history: None,
        }
    }

    pub fn with_url_key(mut self, url_key: impl Into<String>) -> Self {
        self.url_key = Some(url_key.into());
        self
    }

    /// Place the category under a parent with the given URL path
    pub fn with_parent(mut self, parent_url_path: impl Into<String>, parent_level: u32) -> Self {
        self.parent_url_path = Some(parent_url_path.into());
        self.level = parent_level + 1;
        self
    }

    pub fn with_url_path(mut self, url_path: impl Into<String>) -> Self {
        self.url_path = Some(url_path.into());
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_save_rewrites_history(mut self, save: bool) -> Self {
        self.save_rewrites_history = Some(save);
        self
    }

    /// Resolved history flag
    pub fn saves_rewrites_history(&self, default: bool) -> bool {
        self.save_rewrites_history.unwrap_or(default)
    }

    /// Root categories are containers only and get no rewrites
    pub fn is_root(&self) -> bool {
        self.level <= ROOT_CATEGORY_LEVEL
    }
}
