//! Autocomplete suggestions
//!
//! Pulls matching hospital names, test names and locations, deduplicates
//! while preserving order of first appearance, and caps the combined list.

use crate::{db::CatalogStore, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Hospital,
    Test,
    Location,
}

pub async fn suggest(
    store: &dyn CatalogStore,
    query: &str,
    limit: usize,
) -> Result<Vec<Suggestion>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let per_kind = limit as i64;
    let (hospitals, tests, locations) = tokio::try_join!(
        store.suggest_hospital_names(query, per_kind),
        store.suggest_test_names(query, per_kind),
        store.suggest_locations(query, per_kind),
    )?;

    let mut suggestions = Vec::new();
    for name in hospitals {
        suggestions.push(Suggestion {
            text: name,
            kind: SuggestionKind::Hospital,
        });
    }
    for name in tests {
        suggestions.push(Suggestion {
            text: name,
            kind: SuggestionKind::Test,
        });
    }
    for row in locations {
        for text in [row.area, row.city, row.division] {
            if text.to_lowercase().contains(&query.to_lowercase()) {
                suggestions.push(Suggestion {
                    text,
                    kind: SuggestionKind::Location,
                });
            }
        }
    }

    // Dedup on the text, first kind wins, order preserved.
    let mut seen = std::collections::HashSet::new();
    suggestions.retain(|s| seen.insert(s.text.to_lowercase()));
    suggestions.truncate(limit);

    Ok(suggestions)
}
