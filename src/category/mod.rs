//! Category selection model.
//!
//! - `store` - the category list, toggle propagation and change diffing
//! - `search` - type-ahead name filtering
//! - `summary` - counter and subcategory sentences
//! - `types` - the `Category` record and its errors

pub mod search;
mod store;
pub mod summary;
mod types;

pub use store::CategoryStore;
pub use types::{Category, CategoryError};
