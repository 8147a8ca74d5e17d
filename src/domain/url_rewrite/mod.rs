pub mod criteria;
pub mod entity;
pub mod invariants;

pub use criteria::UrlRewriteCriteria;
pub use entity::{EntityType, RedirectType, RewriteMetadata, UrlRewrite};
pub use invariants::validate_url_rewrite;
