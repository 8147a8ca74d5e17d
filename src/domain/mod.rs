// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod category;
pub mod url_rewrite;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Category Domain
pub use category::{validate_category, Category, ROOT_CATEGORY_LEVEL};

// URL Rewrite Domain
pub use url_rewrite::{
    validate_url_rewrite, EntityType, RedirectType, RewriteMetadata, UrlRewrite,
    UrlRewriteCriteria,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Unknown redirect type code {0}")]
    UnknownRedirectType(u16),

    #[error("Unknown entity type '{0}'")]
    UnknownEntityType(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
