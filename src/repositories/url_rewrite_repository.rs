// src/repositories/url_rewrite_repository.rs
//
// URL rewrite persistence

use std::collections::BTreeSet;
use std::sync::Arc;

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

use crate::db::ConnectionPool;
use crate::domain::{EntityType, RedirectType, RewriteMetadata, UrlRewrite, UrlRewriteCriteria};
use crate::error::{AppError, AppResult};

/// Read side: looks up stored rewrites
#[cfg_attr(test, mockall::automock)]
pub trait UrlRewriteFinder: Send + Sync {
    fn find_all_by_data(&self, criteria: &UrlRewriteCriteria) -> AppResult<Vec<UrlRewrite>>;
}

/// Write side: stores generated rewrites
#[cfg_attr(test, mockall::automock)]
pub trait UrlRewritePersister: Send + Sync {
    /// Delete every stored rewrite matching `scopes` or sharing an
    /// (entity_type, entity_id, store_id) group with the batch, then insert the batch.
    /// A request path still held by another entity in the same store is a
    /// `Conflict` and nothing is written.
    /// Returns the batch with storage ids assigned.
    fn replace(&self, scopes: &[UrlRewriteCriteria], rewrites: &[UrlRewrite]) -> AppResult<Vec<UrlRewrite>>;

    /// Returns the number of deleted rows
    fn delete_by_data(&self, criteria: &UrlRewriteCriteria) -> AppResult<usize>;
}

pub struct SqliteUrlRewriteRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteUrlRewriteRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to UrlRewrite - returns rusqlite::Error for query_map compatibility
    fn row_to_rewrite(row: &Row) -> Result<UrlRewrite, rusqlite::Error> {
        let entity_type_str: String = row.get("entity_type")?;
        let entity_type = entity_type_str
            .parse::<EntityType>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e)))?;

        let redirect_code: i64 = row.get("redirect_type")?;
        let redirect_type = u16::try_from(redirect_code)
            .ok()
            .and_then(|code| RedirectType::from_code(code).ok())
            .ok_or(rusqlite::Error::IntegralValueOutOfRange(0, redirect_code))?;

        let metadata_json: String = row.get("metadata")?;
        let metadata: RewriteMetadata = serde_json::from_str(&metadata_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e)))?;

        let entity_id: i64 = row.get("entity_id")?;
        let entity_id = u64::try_from(entity_id)
            .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(0, entity_id))?;

        let store_id: i64 = row.get("store_id")?;
        let store_id = u32::try_from(store_id)
            .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(0, store_id))?;

        Ok(UrlRewrite {
            url_rewrite_id: Some(row.get("url_rewrite_id")?),
            request_path: row.get("request_path")?,
            target_path: row.get("target_path")?,
            store_id,
            entity_id,
            entity_type,
            is_autogenerated: row.get("is_autogenerated")?,
            redirect_type,
            description: row.get("description")?,
            metadata,
        })
    }

    /// WHERE clause and bound values for the criteria
    fn where_clause(criteria: &UrlRewriteCriteria) -> (String, Vec<Value>) {
        let mut conditions = vec!["entity_type = ?".to_string()];
        let mut values = vec![Value::Text(criteria.entity_type.as_str().to_string())];

        if let Some(entity_id) = criteria.entity_id {
            conditions.push("entity_id = ?".to_string());
            values.push(Value::Integer(entity_id as i64));
        }
        if let Some(store_id) = criteria.store_id {
            conditions.push("store_id = ?".to_string());
            values.push(Value::Integer(store_id as i64));
        }

        (conditions.join(" AND "), values)
    }
}

impl UrlRewriteFinder for SqliteUrlRewriteRepository {
    fn find_all_by_data(&self, criteria: &UrlRewriteCriteria) -> AppResult<Vec<UrlRewrite>> {
        let conn = self.pool.get()?;
        let (where_sql, values) = Self::where_clause(criteria);

        let mut stmt = conn.prepare(&format!(
            "SELECT url_rewrite_id, entity_type, entity_id, request_path, target_path,
                    redirect_type, store_id, description, is_autogenerated, metadata
             FROM url_rewrite
             WHERE {}
             ORDER BY url_rewrite_id",
            where_sql
        ))?;

        let rewrites = stmt
            .query_map(params_from_iter(values), Self::row_to_rewrite)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rewrites)
    }
}

impl UrlRewritePersister for SqliteUrlRewriteRepository {
    fn replace(&self, scopes: &[UrlRewriteCriteria], rewrites: &[UrlRewrite]) -> AppResult<Vec<UrlRewrite>> {
        if scopes.is_empty() && rewrites.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let groups: BTreeSet<(EntityType, u64, u32)> = rewrites
            .iter()
            .map(|r| (r.entity_type, r.entity_id, r.store_id))
            .collect();
        let cleared = scopes.iter().cloned().chain(
            groups
                .into_iter()
                .map(|(entity_type, entity_id, store_id)| UrlRewriteCriteria::for_entity(entity_type, entity_id, store_id)),
        );

        for criteria in cleared {
            let (where_sql, values) = Self::where_clause(&criteria);
            tx.execute(
                &format!("DELETE FROM url_rewrite WHERE {}", where_sql),
                params_from_iter(values),
            )?;
        }

        let mut persisted = Vec::with_capacity(rewrites.len());
        for rewrite in rewrites {
            // Returning before commit rolls the deletes back
            let holder: Option<(String, i64)> = tx
                .query_row(
                    "SELECT entity_type, entity_id FROM url_rewrite WHERE request_path = ?1 AND store_id = ?2",
                    params![rewrite.request_path, rewrite.store_id],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;
            if let Some((holder_type, holder_id)) = holder {
                let message = format!(
                    "Request path '{}' in store {} already belongs to {} {}",
                    rewrite.request_path, rewrite.store_id, holder_type, holder_id
                );
                log::warn!("{}", message);
                return Err(AppError::Conflict(message));
            }

            let metadata_json = serde_json::to_string(&rewrite.metadata)?;
            tx.execute(
                "INSERT INTO url_rewrite (
                    entity_type, entity_id, request_path, target_path, redirect_type,
                    store_id, description, is_autogenerated, metadata
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    rewrite.entity_type.as_str(),
                    rewrite.entity_id as i64,
                    rewrite.request_path,
                    rewrite.target_path,
                    rewrite.redirect_type.code(),
                    rewrite.store_id,
                    rewrite.description,
                    rewrite.is_autogenerated,
                    metadata_json,
                ],
            )?;

            let mut stored = rewrite.clone();
            stored.url_rewrite_id = Some(tx.last_insert_rowid());
            persisted.push(stored);
        }

        tx.commit()?;
        Ok(persisted)
    }

    fn delete_by_data(&self, criteria: &UrlRewriteCriteria) -> AppResult<usize> {
        let conn = self.pool.get()?;
        let (where_sql, values) = Self::where_clause(criteria);

        let deleted = conn.execute(
            &format!("DELETE FROM url_rewrite WHERE {}", where_sql),
            params_from_iter(values),
        )?;

        Ok(deleted)
    }
}
