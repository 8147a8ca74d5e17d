// src/services/mod.rs
//
// Services Module - Generation and Orchestration Layer

pub mod canonical_url_rewrite_generator;
pub mod category_url_path_generator;
pub mod category_url_rewrite_generator;
pub mod current_url_rewrites_regenerator;
pub mod merge_data_provider;
pub mod url_rewrite_service;

pub use canonical_url_rewrite_generator::CanonicalUrlRewriteGenerator;

pub use category_url_path_generator::{
    CategoryUrlPathGenerator,
    UrlPathGenerator,
    CATEGORY_CANONICAL_PATH_PREFIX,
};

pub use category_url_rewrite_generator::CategoryUrlRewriteGenerator;

pub use current_url_rewrites_regenerator::CurrentUrlRewritesRegenerator;

pub use merge_data_provider::{MergeDataProvider, UrlRewriteMap};

pub use url_rewrite_service::UrlRewriteService;
