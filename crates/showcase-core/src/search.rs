//! Free-text search over grouped capabilities, plus search history.
//!
//! # Search Scoring
//!
//! The query is lowercased and split on whitespace. Each term scores
//! against a group:
//!
//! | Signal | Points |
//! |--------|--------|
//! | group title contains term | 100 |
//! | group description contains term | 50 |
//! | any group keyword contains term | 80 |
//! | any category short name contains term | 70 |
//! | `k > 0` capability titles contain term | 40 + 10k |
//!
//! Term scores are summed; for multi-term queries with a positive total
//! the sum is divided by the number of terms. Groups scoring at least
//! [`SEARCH_THRESHOLD`] are shown, best first. An empty query scores every
//! group 100 and disables filtering.

use serde::{Deserialize, Serialize};

use crate::categories;
use crate::matching::GroupedCapabilities;

/// Minimum score for a group to survive filtering.
pub const SEARCH_THRESHOLD: f64 = 40.0;

/// Number of queries kept in [`SearchHistory`].
pub const HISTORY_CAPACITY: usize = 5;

/// Scores one group against a free-text query.
pub fn calculate_search_score(grouped: &GroupedCapabilities, query: &str) -> f64 {
    let query = query.trim();
    if query.is_empty() {
        return 100.0;
    }

    let lowered = query.to_lowercase();
    let terms: Vec<&str> = lowered.split_whitespace().collect();
    let group = &grouped.group;

    let title = group.title.to_lowercase();
    let description = group.description.to_lowercase();
    let keywords: Vec<String> = group.keywords.iter().map(|k| k.to_lowercase()).collect();
    let category_names: Vec<String> = group
        .categories
        .iter()
        .filter_map(|c| categories::short_name(c))
        .map(str::to_lowercase)
        .collect();

    let mut total = 0.0;
    for term in &terms {
        let mut term_score = 0.0;

        if title.contains(term) {
            term_score += 100.0;
        }
        if description.contains(term) {
            term_score += 50.0;
        }
        if keywords.iter().any(|k| k.contains(term)) {
            term_score += 80.0;
        }
        if category_names.iter().any(|c| c.contains(term)) {
            term_score += 70.0;
        }

        let hits = grouped
            .all_capabilities
            .iter()
            .filter(|cap| cap.title.to_lowercase().contains(term))
            .count();
        if hits > 0 {
            term_score += 40.0 + hits as f64 * 10.0;
        }

        total += term_score;
    }

    if terms.len() > 1 && total > 0.0 {
        total /= terms.len() as f64;
    }
    total
}

/// A group that survived filtering, with its score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredGroup<'a> {
    pub score: f64,
    #[serde(flatten)]
    pub grouped: &'a GroupedCapabilities,
}

/// Groups matching `query`, best first, or `None` when the query is
/// blank and the caller should show every group unfiltered.
pub fn filter_groups<'a>(
    grouped: &'a [GroupedCapabilities],
    query: &str,
) -> Option<Vec<ScoredGroup<'a>>> {
    if query.trim().is_empty() {
        return None;
    }

    let mut scored: Vec<ScoredGroup<'a>> = grouped
        .iter()
        .map(|g| ScoredGroup {
            score: calculate_search_score(g, query),
            grouped: g,
        })
        .filter(|s| s.score >= SEARCH_THRESHOLD)
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Some(scored)
}

/// Recent queries, newest first.
///
/// Serializes as a plain JSON array so callers can keep it wherever they
/// like (a browser's local storage, a file, a cookie).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a history from stored entries, enforcing capacity and
    /// dropping blanks and duplicates.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut history = Self::new();
        for entry in entries {
            let entry: String = entry.into();
            let trimmed = entry.trim();
            if trimmed.is_empty() || history.contains(trimmed) {
                continue;
            }
            if history.entries.len() == HISTORY_CAPACITY {
                break;
            }
            history.entries.push(trimmed.to_string());
        }
        history
    }

    /// Records a query. Returns `false` if it was blank or already present;
    /// existing entries keep their position.
    pub fn record(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() || self.contains(query) {
            return false;
        }
        self.entries.insert(0, query.to_string());
        self.entries.truncate(HISTORY_CAPACITY);
        true
    }

    pub fn contains(&self, query: &str) -> bool {
        self.entries.iter().any(|e| e == query)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// The result of running a search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome<'a> {
    pub query: String,
    /// `false` when the query was blank and all groups are shown.
    pub filtering: bool,
    pub groups: Vec<ScoredGroup<'a>>,
}

/// Runs `query` over `grouped` and records it in `history`.
pub fn execute_search<'a>(
    grouped: &'a [GroupedCapabilities],
    query: &str,
    history: &mut SearchHistory,
) -> SearchOutcome<'a> {
    match filter_groups(grouped, query) {
        Some(groups) => {
            history.record(query);
            SearchOutcome {
                query: query.to_string(),
                filtering: true,
                groups,
            }
        }
        None => SearchOutcome {
            query: query.to_string(),
            filtering: false,
            groups: grouped
                .iter()
                .map(|g| ScoredGroup {
                    score: 100.0,
                    grouped: g,
                })
                .collect(),
        },
    }
}

/// Re-runs the `index`-th stored query. Returns `None` for an index past
/// the end of the history.
pub fn search_from_history<'a>(
    grouped: &'a [GroupedCapabilities],
    history: &mut SearchHistory,
    index: usize,
) -> Option<SearchOutcome<'a>> {
    let query = history.get(index)?.to_string();
    Some(execute_search(grouped, &query, history))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups;
    use crate::models::AiCapability;

    fn grouped(id: &str, titles: &[&str]) -> GroupedCapabilities {
        let caps: Vec<AiCapability> = titles
            .iter()
            .enumerate()
            .map(|(i, t)| AiCapability {
                id: format!("{}-{}", id, i),
                title: t.to_string(),
                ..Default::default()
            })
            .collect();
        GroupedCapabilities {
            group: *groups::find(id).unwrap(),
            capabilities: caps.clone(),
            all_capabilities: caps,
        }
    }

    #[test]
    fn test_blank_query_scores_100() {
        let g = grouped("email_support", &[]);
        assert_eq!(calculate_search_score(&g, "   "), 100.0);
    }

    #[test]
    fn test_single_term_signals() {
        let g = grouped("email_support", &["メール自動返信", "メールチェック"]);
        // Title "メールの返信を即座に作成してくれる" (100), description mentions
        // "メール" (50), keyword "メール" (80), category 文章作成 no,
        // two capability titles (40 + 20).
        assert_eq!(calculate_search_score(&g, "メール"), 100.0 + 50.0 + 80.0 + 60.0);
    }

    #[test]
    fn test_category_display_name_signal() {
        let g = grouped("email_support", &[]);
        // "文章作成" is only the display name of text_creation.
        assert_eq!(calculate_search_score(&g, "文章作成"), 70.0);
    }

    #[test]
    fn test_unknown_group_category_is_not_a_signal() {
        // banner_creation's only category, "design", is not in the catalog.
        let g = GroupedCapabilities::empty(*groups::find("banner_creation").unwrap());
        assert_eq!(calculate_search_score(&g, "design"), 0.0);
        let all = vec![g];
        assert!(filter_groups(&all, "design").unwrap().is_empty());
    }

    #[test]
    fn test_category_signal_uses_short_names() {
        // minutes_creation -> meeting_support, short name 会議支援.
        let g = grouped("minutes_creation", &[]);
        assert_eq!(calculate_search_score(&g, "会議支援"), 70.0);
        // Only the long catalog name contains ミーティング.
        assert_eq!(calculate_search_score(&g, "ミーティング"), 0.0);
    }

    #[test]
    fn test_multi_term_average() {
        let g = grouped("business_translation", &[]);
        // "翻訳": title 100 + description 50 + keyword 80 + category 70 = 300.
        // "zzz": 0. Average over two terms.
        assert_eq!(calculate_search_score(&g, "翻訳 zzz"), 150.0);
    }

    #[test]
    fn test_filter_groups_threshold_and_order() {
        let all = vec![
            grouped("email_support", &[]),
            grouped("business_translation", &[]),
            grouped("video_editing", &[]),
        ];
        let result = filter_groups(&all, "翻訳").unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].grouped.group.id, "business_translation");

        assert!(filter_groups(&all, "").is_none());
    }

    #[test]
    fn test_history_dedupes_and_caps() {
        let mut history = SearchHistory::new();
        for q in ["a", "b", "c", "a", " d ", "", "e", "f"] {
            history.record(q);
        }
        assert_eq!(history.entries(), &["f", "e", "d", "c", "b"]);
        assert!(!history.record("c"));
        assert_eq!(history.get(0), Some("f"));
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_history_serde_is_plain_array() {
        let history = SearchHistory::from_entries(["x", "y", "x", ""]);
        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(json, r#"["x","y"]"#);
        let back: SearchHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
    }

    #[test]
    fn test_execute_search_records_only_real_queries() {
        let all = vec![grouped("email_support", &[])];
        let mut history = SearchHistory::new();

        let outcome = execute_search(&all, "  ", &mut history);
        assert!(!outcome.filtering);
        assert_eq!(outcome.groups.len(), 1);
        assert!(history.is_empty());

        let outcome = execute_search(&all, " メール ", &mut history);
        assert!(outcome.filtering);
        assert_eq!(history.entries(), &["メール"]);
    }

    #[test]
    fn test_search_from_history() {
        let all = vec![grouped("business_translation", &[])];
        let mut history = SearchHistory::from_entries(["翻訳", "zzz"]);

        let outcome = search_from_history(&all, &mut history, 0).unwrap();
        assert_eq!(outcome.query, "翻訳");
        assert_eq!(outcome.groups.len(), 1);

        let outcome = search_from_history(&all, &mut history, 1).unwrap();
        assert!(outcome.groups.is_empty());
        assert_eq!(history.len(), 2);

        assert!(search_from_history(&all, &mut history, 7).is_none());
    }
}
