//! Database layer - storage trait and Postgres implementation

pub mod escape;
pub mod store;
pub mod traits;

pub use store::PostgresCatalogStore;
pub use traits::{CatalogStore, LocationRow, PopularSearch, RankedId};
