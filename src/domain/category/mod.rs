pub mod entity;
pub mod invariants;

pub use entity::{Category, ROOT_CATEGORY_LEVEL};
pub use invariants::validate_category;
