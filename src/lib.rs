// src/lib.rs
// Catalog URL Rewrite - category URL rewrite generation and regeneration
//
// Architecture:
// - Domain-centric: rewrite and category rules live in the domain
// - Generators are pure over their collaborators (path generator, finder)
// - Persistence and events are the service layer's job
// - Explicit: No implicit behavior, no magic

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_category,
    validate_url_rewrite,
    // Category
    Category,
    EntityType,
    RedirectType,
    RewriteMetadata,
    // URL Rewrite
    UrlRewrite,
    UrlRewriteCriteria,
};

// ============================================================================
// PUBLIC API - Errors & Configuration
// ============================================================================

pub use config::RewriteConfig;
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{create_event_bus, DomainEvent, EventBus, UrlRewritesDeleted, UrlRewritesRegenerated};

// ============================================================================
// PUBLIC API - Database & Repositories
// ============================================================================

pub use db::{create_connection_pool, create_memory_pool, initialize_database, open_database, ConnectionPool};

pub use repositories::{SqliteUrlRewriteRepository, UrlRewriteFinder, UrlRewritePersister};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    CanonicalUrlRewriteGenerator,
    CategoryUrlPathGenerator,
    CategoryUrlRewriteGenerator,
    CurrentUrlRewritesRegenerator,
    MergeDataProvider,
    UrlPathGenerator,
    UrlRewriteMap,
    UrlRewriteService,
};
