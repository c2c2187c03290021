//! Search and comparison aggregation pipeline
//!
//! One request flows through: filter compilation → text-match resolution
//! (per entity kind, concurrently) → predicate-based fetch → per-test price
//! aggregation → combine/sort/paginate. All persistence goes through the
//! injected [`crate::db::CatalogStore`]; no stage holds global state.

pub mod aggregate;
pub mod combine;
pub mod engine;
pub mod filter;
pub mod text;

pub use engine::EngineOutput;
pub use filter::{CompiledFilters, FacilityPredicates, IdConstraint, PriceRange, TestPredicates};
pub use text::TextMatch;
