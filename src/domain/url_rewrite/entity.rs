use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Free-form rewrite metadata, stored as a JSON object
pub type RewriteMetadata = serde_json::Map<String, serde_json::Value>;

/// One stored mapping from a request path to a target path
/// for a single entity in a single store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRewrite {
    /// Storage identifier (None until persisted)
    pub url_rewrite_id: Option<i64>,

    /// Path the storefront receives
    pub request_path: String,

    /// Path the request resolves or redirects to
    pub target_path: String,

    pub store_id: u32,

    pub entity_id: u64,

    pub entity_type: EntityType,

    /// True when the system created the rewrite, false for user-created ones.
    /// Never derived, always taken from the source record.
    pub is_autogenerated: bool,

    pub redirect_type: RedirectType,

    pub description: Option<String>,

    pub metadata: RewriteMetadata,
}

/// Kind of entity a rewrite points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityType {
    Category,
    Product,
    CmsPage,
    Custom,
}

/// Redirect behaviour when the request path is traversed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum RedirectType {
    /// Internal rewrite, no redirect (code 0)
    #[default]
    NoRedirect,
    /// HTTP 301
    Permanent,
    /// HTTP 302
    Temporary,
}

impl UrlRewrite {
    /// Create a blank, non-redirecting custom rewrite.
    /// Callers fill in the remaining fields with the `with_*` setters.
    pub fn new(
        entity_type: EntityType,
        entity_id: u64,
        store_id: u32,
        request_path: impl Into<String>,
        target_path: impl Into<String>,
    ) -> Self {
        Self {
            url_rewrite_id: None,
            request_path: request_path.into(),
            target_path: target_path.into(),
            store_id,
            entity_id,
            entity_type,
            is_autogenerated: false,
            redirect_type: RedirectType::NoRedirect,
            description: None,
            metadata: RewriteMetadata::new(),
        }
    }

    pub fn with_redirect_type(mut self, redirect_type: RedirectType) -> Self {
        self.redirect_type = redirect_type;
        self
    }

    pub fn with_autogenerated(mut self, is_autogenerated: bool) -> Self {
        self.is_autogenerated = is_autogenerated;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_metadata(mut self, metadata: RewriteMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Key used to merge generated rewrites: `{request_path}_{store_id}`
    pub fn merge_key(&self) -> String {
        format!("{}_{}", self.request_path, self.store_id)
    }

    /// Whether traversing the request path redirects the client
    pub fn is_redirect(&self) -> bool {
        self.redirect_type != RedirectType::NoRedirect
    }
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Category => "category",
            EntityType::Product => "product",
            EntityType::CmsPage => "cms-page",
            EntityType::Custom => "custom",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "category" => Ok(EntityType::Category),
            "product" => Ok(EntityType::Product),
            "cms-page" => Ok(EntityType::CmsPage),
            "custom" => Ok(EntityType::Custom),
            other => Err(DomainError::UnknownEntityType(other.to_string())),
        }
    }
}

impl RedirectType {
    pub fn code(&self) -> u16 {
        match self {
            RedirectType::NoRedirect => 0,
            RedirectType::Permanent => 301,
            RedirectType::Temporary => 302,
        }
    }

    pub fn from_code(code: u16) -> DomainResult<Self> {
        match code {
            0 => Ok(RedirectType::NoRedirect),
            301 => Ok(RedirectType::Permanent),
            302 => Ok(RedirectType::Temporary),
            other => Err(DomainError::UnknownRedirectType(other)),
        }
    }
}

impl From<RedirectType> for u16 {
    fn from(redirect_type: RedirectType) -> Self {
        redirect_type.code()
    }
}

impl TryFrom<u16> for RedirectType {
    type Error = DomainError;

    fn try_from(code: u16) -> DomainResult<Self> {
        RedirectType::from_code(code)
    }
}

impl std::fmt::Display for RedirectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
