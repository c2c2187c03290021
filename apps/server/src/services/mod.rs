//! Domain services sitting between the HTTP handlers and the store.

pub mod compare;
pub mod search;
pub mod suggest;

pub use search::SearchService;
