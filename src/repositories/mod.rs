// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - Explicit SQL only

pub mod url_rewrite_repository;

pub use url_rewrite_repository::{SqliteUrlRewriteRepository, UrlRewriteFinder, UrlRewritePersister};

#[cfg(test)]
pub use url_rewrite_repository::{MockUrlRewriteFinder, MockUrlRewritePersister};
