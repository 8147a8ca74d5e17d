use super::entity::UrlRewrite;
use crate::domain::{DomainError, DomainResult};

/// Validates all UrlRewrite invariants
pub fn validate_url_rewrite(rewrite: &UrlRewrite) -> DomainResult<()> {
    validate_path("Request path", &rewrite.request_path)?;
    validate_path("Target path", &rewrite.target_path)?;
    Ok(())
}

/// Paths are stored without surrounding whitespace and cannot be empty
fn validate_path(label: &str, path: &str) -> DomainResult<()> {
    if path.trim().is_empty() {
        return Err(DomainError::InvariantViolation(format!(
            "{} cannot be empty",
            label
        )));
    }
    if path.trim() != path {
        return Err(DomainError::InvariantViolation(format!(
            "{} '{}' has surrounding whitespace",
            label, path
        )));
    }
    Ok(())
}

/// Invariants that must hold true for UrlRewrite domain:
///
/// 1. Request path is never empty
/// 2. Target path is never empty
/// 3. The autogenerated flag comes from the source record, never derived
/// 4. Redirect type is one of 0, 301, 302 (enforced by the type)
/// 5. (request_path, store_id) identifies at most one stored rewrite
