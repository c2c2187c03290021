//! Text-match resolution against the ranked full-text search capability
//!
//! A blank query skips this stage entirely (no constraint). A non-blank
//! query that yields zero candidates resolves to the impossible-match
//! sentinel so "no text matches" never degenerates into "return everything".

use crate::{
    db::{CatalogStore, RankedId},
    search::filter::IdConstraint,
    Result,
};
use std::collections::HashMap;
use uuid::Uuid;

/// Entity kinds the resolver can search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Facility,
    Test,
}

/// Outcome of resolving one entity kind's text match.
#[derive(Debug, Clone)]
pub enum TextMatch {
    /// Blank query: all entities remain candidates.
    Skipped,
    /// Candidate ids in descending relevance order, with their ranks.
    Candidates(Vec<RankedId>),
}

impl TextMatch {
    /// The id constraint this resolution contributes. Zero candidates yield
    /// the impossible constraint.
    pub fn constraint(&self) -> IdConstraint {
        match self {
            TextMatch::Skipped => IdConstraint::Unconstrained,
            TextMatch::Candidates(ranked) => {
                IdConstraint::Only(ranked.iter().map(|r| r.id).collect())
            }
        }
    }

    /// Relevance rank per candidate id. Entities absent from the map (no
    /// text query ran) rank as 0.
    pub fn ranks(&self) -> HashMap<Uuid, f32> {
        match self {
            TextMatch::Skipped => HashMap::new(),
            TextMatch::Candidates(ranked) => ranked.iter().map(|r| (r.id, r.rank)).collect(),
        }
    }
}

/// Resolve the text match for one entity kind.
pub async fn resolve(store: &dyn CatalogStore, kind: EntityKind, query: &str) -> Result<TextMatch> {
    if query.trim().is_empty() {
        return Ok(TextMatch::Skipped);
    }

    let ranked = match kind {
        EntityKind::Facility => store.search_hospital_ids(query).await?,
        EntityKind::Test => store.search_test_ids(query).await?,
    };

    Ok(TextMatch::Candidates(ranked))
}
