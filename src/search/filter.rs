//! Case-insensitive substring filter on titles
//!
//! Blank queries return the catalog untouched. Matching never reorders:
//! results come back in catalog order.

use crate::models::{Catalog, CatalogEntry, Titled};

/// Filter `catalog` by `query`.
///
/// An empty or whitespace-only query yields the whole catalog.
pub fn filter<T: Titled + Clone>(catalog: &[T], query: &str) -> Vec<T> {
    if query.trim().is_empty() {
        return catalog.to_vec();
    }

    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|item| item.title().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Filtered games and shows for one query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    pub games: Vec<CatalogEntry>,
    pub shows: Vec<CatalogEntry>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.games.is_empty() && self.shows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.games.len() + self.shows.len()
    }

    /// Entry at a flat index: games first, then shows
    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.games
            .get(index)
            .or_else(|| self.shows.get(index.checked_sub(self.games.len())?))
    }
}

/// Apply `filter` to both catalog sections
pub fn filter_catalog(catalog: &Catalog, query: &str) -> SearchResults {
    SearchResults {
        games: filter(&catalog.games, query),
        shows: filter(&catalog.shows, query),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str) -> CatalogEntry {
        CatalogEntry {
            id: title.to_lowercase().replace(' ', "-"),
            title: title.to_string(),
            image_url: None,
            kind: "TV Show".to_string(),
        }
    }

    #[test]
    fn test_blank_query_returns_everything() {
        let catalog = vec![entry("Breaking Bad"), entry("Better Call Saul")];
        assert_eq!(filter(&catalog, ""), catalog);
        assert_eq!(filter(&catalog, "   \t"), catalog);
    }

    #[test]
    fn test_bet_matches_only_better_call_saul() {
        let catalog = vec![entry("Breaking Bad"), entry("Better Call Saul")];
        let result = filter(&catalog, "bet");
        assert_eq!(result, vec![entry("Better Call Saul")]);
    }

    #[test]
    fn test_case_insensitive_and_order_preserved() {
        let catalog = vec![entry("Dead Cells"), entry("Hades"), entry("DEADWOOD")];
        let titles: Vec<String> = filter(&catalog, "dEaD")
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["Dead Cells", "DEADWOOD"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let catalog = vec![entry("Hades")];
        assert!(filter(&catalog, "zelda").is_empty());
    }

    #[test]
    fn test_search_results_flat_index() {
        let results = SearchResults {
            games: vec![entry("Hades")],
            shows: vec![entry("Lucifer"), entry("Wednesday")],
        };
        assert_eq!(results.len(), 3);
        assert_eq!(results.get(0).map(|e| e.title.as_str()), Some("Hades"));
        assert_eq!(results.get(2).map(|e| e.title.as_str()), Some("Wednesday"));
        assert!(results.get(3).is_none());
    }
}
