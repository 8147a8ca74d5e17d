use super::entity::Category;
use crate::domain::{DomainError, DomainResult};

/// Validates all Category invariants relevant to URL generation
pub fn validate_category(category: &Category) -> DomainResult<()> {
    validate_name(&category.name)?;
    if let Some(url_key) = &category.url_key {
        validate_url_key(url_key)?;
    }
    Ok(())
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Category name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// A URL key is a single path segment
fn validate_url_key(url_key: &str) -> DomainResult<()> {
    if url_key.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "URL key cannot be empty".to_string(),
        ));
    }
    if url_key.contains('/') {
        return Err(DomainError::InvariantViolation(format!(
            "URL key '{}' cannot contain '/'",
            url_key
        )));
    }
    Ok(())
}
