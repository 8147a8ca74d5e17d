// src/services/url_rewrite_service.rs
//
// URL Rewrite Service - Category save / delete orchestration
//
// CRITICAL RULES:
// - Generation is delegated to CategoryUrlRewriteGenerator
// - Persistence goes through UrlRewritePersister only
// - Events are emitted after storage succeeded

use std::sync::Arc;

use crate::domain::{Category, EntityType, UrlRewrite, UrlRewriteCriteria};
use crate::error::AppResult;
use crate::events::{EventBus, UrlRewritesDeleted, UrlRewritesRegenerated};
use crate::repositories::UrlRewritePersister;
use crate::services::category_url_rewrite_generator::CategoryUrlRewriteGenerator;

pub struct UrlRewriteService {
    generator: CategoryUrlRewriteGenerator,
    persister: Arc<dyn UrlRewritePersister>,
    event_bus: Arc<EventBus>,
}

impl UrlRewriteService {
    pub fn new(
        generator: CategoryUrlRewriteGenerator,
        persister: Arc<dyn UrlRewritePersister>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            generator,
            persister,
            event_bus,
        }
    }

    /// Regenerate and store the rewrites of a saved category
    ///
    /// `original` is the category before the save, `target` after it.
    /// Returns the stored rewrites.
    pub fn regenerate_for_category(
        &self,
        original: &Category,
        target: &Category,
        store_ids: &[u32],
    ) -> AppResult<Vec<UrlRewrite>> {
        // 1. Generate
        let generated: Vec<UrlRewrite> = self
            .generator
            .generate(original, target, store_ids)?
            .into_values()
            .collect();

        // 2. Persist, clearing every regenerated store even when it got no rewrites
        let mut scopes: Vec<UrlRewriteCriteria> = store_ids
            .iter()
            .map(|&store_id| UrlRewriteCriteria::for_entity(EntityType::Category, target.entity_id, store_id))
            .collect();
        if original.entity_id != target.entity_id {
            scopes.extend(
                store_ids
                    .iter()
                    .map(|&store_id| UrlRewriteCriteria::for_entity(EntityType::Category, original.entity_id, store_id)),
            );
        }
        let stored = self.persister.replace(&scopes, &generated)?;

        // 3. Emit event
        let redirect_count = stored.iter().filter(|r| r.is_redirect()).count();
        self.event_bus.emit(UrlRewritesRegenerated::new(
            target.entity_id,
            store_ids.to_vec(),
            stored.len(),
            redirect_count,
        ));

        Ok(stored)
    }

    /// Delete every rewrite of a category in every store
    pub fn delete_for_category(&self, category_id: u64) -> AppResult<usize> {
        let criteria = UrlRewriteCriteria::for_entity_in_all_stores(EntityType::Category, category_id);
        let deleted = self.persister.delete_by_data(&criteria)?;

        log::info!("Deleted {} rewrites of category {}", deleted, category_id);
        self.event_bus.emit(UrlRewritesDeleted::new(category_id, deleted));

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RewriteConfig;
    use crate::db::{create_memory_pool, get_connection, initialize_database};
    use crate::domain::RedirectType;
    use crate::error::AppError;
    use crate::repositories::{
        MockUrlRewritePersister, SqliteUrlRewriteRepository, UrlRewriteFinder, UrlRewritePersister,
    };
    use crate::services::{
        CanonicalUrlRewriteGenerator, CategoryUrlPathGenerator, CurrentUrlRewritesRegenerator,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixture {
        service: UrlRewriteService,
        repository: Arc<SqliteUrlRewriteRepository>,
        event_bus: Arc<EventBus>,
    }

    fn fixture() -> Fixture {
        let pool = create_memory_pool().unwrap();
        {
            let conn = get_connection(&pool).unwrap();
            initialize_database(&conn).unwrap();
        }
        let repository = Arc::new(SqliteUrlRewriteRepository::new(Arc::new(pool)));
        let config = Arc::new(RewriteConfig::default());
        let paths = Arc::new(CategoryUrlPathGenerator::new(config.clone()));
        let generator = CategoryUrlRewriteGenerator::new(
            CanonicalUrlRewriteGenerator::new(paths.clone()),
            CurrentUrlRewritesRegenerator::new(paths, repository.clone(), config),
        );
        let event_bus = Arc::new(EventBus::new());

        Fixture {
            service: UrlRewriteService::new(generator, repository.clone(), event_bus.clone()),
            repository,
            event_bus,
        }
    }

    fn stored_for(repository: &SqliteUrlRewriteRepository, category_id: u64, store_id: u32) -> Vec<UrlRewrite> {
        repository
            .find_all_by_data(&UrlRewriteCriteria::for_entity(EntityType::Category, category_id, store_id))
            .unwrap()
    }

    #[test]
    fn test_first_save_stores_canonical_rewrite() {
        let f = fixture();
        let category = Category::new(12, "Tops").with_parent("men", 2);

        let stored = f.service.regenerate_for_category(&category, &category, &[1]).unwrap();

        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].request_path, "men/tops.html");
        assert!(stored[0].is_autogenerated);
        assert_eq!(stored_for(&f.repository, 12, 1), stored);
    }

    #[test]
    fn test_move_with_history_keeps_old_path_as_redirect() {
        let f = fixture();
        let before = Category::new(12, "Tops").with_parent("men", 2);
        f.service.regenerate_for_category(&before, &before, &[1]).unwrap();

        let after = Category::new(12, "Tops")
            .with_parent("women", 2)
            .with_save_rewrites_history(true);
        f.service.regenerate_for_category(&before, &after, &[1]).unwrap();

        let stored = stored_for(&f.repository, 12, 1);
        assert_eq!(stored.len(), 2);

        let redirect = stored.iter().find(|r| r.request_path == "men/tops.html").unwrap();
        assert_eq!(redirect.target_path, "women/tops.html");
        assert_eq!(redirect.redirect_type, RedirectType::Permanent);
        assert!(!redirect.is_autogenerated);

        let canonical = stored.iter().find(|r| r.request_path == "women/tops.html").unwrap();
        assert!(canonical.is_autogenerated);
    }

    #[test]
    fn test_move_without_history_drops_old_path() {
        let f = fixture();
        let before = Category::new(12, "Tops").with_parent("men", 2);
        f.service.regenerate_for_category(&before, &before, &[1]).unwrap();

        let after = Category::new(12, "Tops")
            .with_parent("women", 2)
            .with_save_rewrites_history(false);
        f.service.regenerate_for_category(&before, &after, &[1]).unwrap();

        let stored = stored_for(&f.repository, 12, 1);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].request_path, "women/tops.html");
    }

    #[test]
    fn test_resave_is_idempotent() {
        let f = fixture();
        let category = Category::new(12, "Tops")
            .with_parent("men", 2)
            .with_save_rewrites_history(true);

        f.service.regenerate_for_category(&category, &category, &[1]).unwrap();
        f.service.regenerate_for_category(&category, &category, &[1]).unwrap();

        let stored = stored_for(&f.repository, 12, 1);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].request_path, "men/tops.html");
    }

    #[test]
    fn test_category_becoming_root_clears_its_rewrites() {
        let f = fixture();
        let before = Category::new(12, "Tops").with_parent("men", 2);
        f.service.regenerate_for_category(&before, &before, &[1]).unwrap();

        let after = before.clone().with_level(1).with_save_rewrites_history(false);
        let stored = f.service.regenerate_for_category(&before, &after, &[1]).unwrap();

        assert!(stored.is_empty());
        assert!(stored_for(&f.repository, 12, 1).is_empty());
    }

    #[test]
    fn test_empty_regeneration_still_clears_every_store() {
        let f = fixture();
        let before = Category::new(12, "Tops").with_parent("men", 2);
        f.service.regenerate_for_category(&before, &before, &[1, 2]).unwrap();

        let mut persister = MockUrlRewritePersister::new();
        persister
            .expect_replace()
            .withf(|scopes, rewrites| {
                scopes.len() == 2
                    && scopes.iter().all(|s| s.entity_id == Some(12))
                    && rewrites.is_empty()
            })
            .times(1)
            .returning(|_, rewrites| Ok(rewrites.to_vec()));

        let config = Arc::new(RewriteConfig::default());
        let paths = Arc::new(CategoryUrlPathGenerator::new(config.clone()));
        let service = UrlRewriteService::new(
            CategoryUrlRewriteGenerator::new(
                CanonicalUrlRewriteGenerator::new(paths.clone()),
                CurrentUrlRewritesRegenerator::new(paths, f.repository.clone(), config),
            ),
            Arc::new(persister),
            f.event_bus.clone(),
        );

        let root = before.clone().with_level(1).with_save_rewrites_history(false);
        assert!(service.regenerate_for_category(&before, &root, &[1, 2]).unwrap().is_empty());
    }

    #[test]
    fn test_changed_entity_id_clears_original_rewrites() {
        let f = fixture();
        let original = Category::new(12, "Tops").with_parent("men", 2);
        f.service.regenerate_for_category(&original, &original, &[1]).unwrap();

        let copy = Category::new(13, "Tops").with_parent("women", 2);
        f.service.regenerate_for_category(&original, &copy, &[1]).unwrap();

        assert!(stored_for(&f.repository, 12, 1).is_empty());
        let stored = stored_for(&f.repository, 13, 1);
        assert!(stored.iter().any(|r| r.request_path == "women/tops.html"));
    }

    #[test]
    fn test_path_held_by_custom_rewrite_is_a_conflict() {
        let f = fixture();
        let custom = UrlRewrite::new(EntityType::Custom, 0, 1, "women/tops.html", "cms/page/7");
        f.repository.replace(&[], &[custom]).unwrap();

        let before = Category::new(12, "Tops").with_parent("men", 2);
        f.service.regenerate_for_category(&before, &before, &[1]).unwrap();
        let events_before = f.event_bus.get_event_log().len();

        let after = before.clone().with_parent("women", 2);
        let result = f.service.regenerate_for_category(&before, &after, &[1]);
        assert!(matches!(result, Err(AppError::Conflict(_))));

        let custom_rows = f
            .repository
            .find_all_by_data(&UrlRewriteCriteria::for_entity(EntityType::Custom, 0, 1))
            .unwrap();
        assert_eq!(custom_rows.len(), 1);
        assert_eq!(custom_rows[0].target_path, "cms/page/7");

        let kept = stored_for(&f.repository, 12, 1);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].request_path, "men/tops.html");
        assert_eq!(f.event_bus.get_event_log().len(), events_before);
    }

    #[test]
    fn test_regenerate_emits_event() {
        let f = fixture();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = Arc::clone(&seen);
        f.event_bus.subscribe::<UrlRewritesRegenerated, _>(move |event| {
            seen_clone.fetch_add(event.rewrite_count, Ordering::SeqCst);
        });

        let category = Category::new(12, "Tops").with_parent("men", 2);
        f.service.regenerate_for_category(&category, &category, &[1, 2]).unwrap();

        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_delete_for_category() {
        let f = fixture();
        let category = Category::new(12, "Tops").with_parent("men", 2);
        f.service.regenerate_for_category(&category, &category, &[1, 2]).unwrap();

        assert_eq!(f.service.delete_for_category(12).unwrap(), 2);
        assert!(stored_for(&f.repository, 12, 1).is_empty());

        let log = f.event_bus.get_event_log();
        assert_eq!(log.last().unwrap().event_type, "UrlRewritesDeleted");
    }

    #[test]
    fn test_persist_failure_emits_nothing() {
        let f = fixture();
        let mut persister = MockUrlRewritePersister::new();
        persister
            .expect_replace()
            .times(1)
            .returning(|_, _| Err(AppError::Other("disk full".to_string())));

        let config = Arc::new(RewriteConfig::default());
        let paths = Arc::new(CategoryUrlPathGenerator::new(config.clone()));
        let service = UrlRewriteService::new(
            CategoryUrlRewriteGenerator::new(
                CanonicalUrlRewriteGenerator::new(paths.clone()),
                CurrentUrlRewritesRegenerator::new(paths, f.repository.clone(), config),
            ),
            Arc::new(persister),
            f.event_bus.clone(),
        );

        let category = Category::new(12, "Tops");
        assert!(service.regenerate_for_category(&category, &category, &[1]).is_err());
        assert!(f.event_bus.get_event_log().is_empty());
    }
}
