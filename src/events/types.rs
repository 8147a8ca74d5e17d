// src/events/types.rs
//
// Domain events emitted by the rewrite service.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events carry only the data needed to react

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// URL REWRITE EVENTS
// ============================================================================

/// Emitted after a category's rewrites were regenerated and stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlRewritesRegenerated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub category_id: u64,
    pub store_ids: Vec<u32>,
    pub rewrite_count: usize,
    /// Rewrites now acting as redirects to the current path
    pub redirect_count: usize,
}

impl UrlRewritesRegenerated {
    pub fn new(category_id: u64, store_ids: Vec<u32>, rewrite_count: usize, redirect_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            category_id,
            store_ids,
            rewrite_count,
            redirect_count,
        }
    }
}

impl DomainEvent for UrlRewritesRegenerated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "UrlRewritesRegenerated" }
}

/// Emitted after all rewrites of a category were deleted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlRewritesDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub category_id: u64,
    pub deleted_count: usize,
}

impl UrlRewritesDeleted {
    pub fn new(category_id: u64, deleted_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            category_id,
            deleted_count,
        }
    }
}

impl DomainEvent for UrlRewritesDeleted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "UrlRewritesDeleted" }
}
