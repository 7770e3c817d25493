//! Sorting capabilities into [`CapabilityGroup`]s.
//!
//! # Match Scoring
//!
//! | Signal | Points |
//! |--------|--------|
//! | group category matched by a capability tag | 50 each |
//! | keyword in title | 30 each |
//! | keyword in description | 20 each |
//! | keyword in `detail` | 10 each |
//! | category short name in title | 40 each |
//! | published within 14 days | 40 |
//! | published within 30 days | 20 |
//!
//! Keyword checks are case-insensitive substring matches. A capability
//! belongs to a group when its score is positive.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

use crate::categories::{self, match_category_string};
use crate::groups::CapabilityGroup;
use crate::models::AiCapability;

const CATEGORY_POINTS: u32 = 50;
const TITLE_KEYWORD_POINTS: u32 = 30;
const DESCRIPTION_KEYWORD_POINTS: u32 = 20;
const DETAIL_KEYWORD_POINTS: u32 = 10;
const TITLE_CATEGORY_POINTS: u32 = 40;
const FRESH_POINTS: u32 = 40;
const RECENT_POINTS: u32 = 20;

/// Number of capabilities shown per group before "show more".
pub const GROUP_PREVIEW_LEN: usize = 5;

/// Result of scoring one capability against one group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub score: u32,
    /// Group keywords found anywhere, in first-seen order.
    pub matched_keywords: Vec<String>,
}

/// Scores `cap` against `group` at time `now`.
pub fn calculate_match_score(
    cap: &AiCapability,
    group: &CapabilityGroup,
    now: DateTime<Utc>,
) -> MatchResult {
    let mut result = MatchResult::default();

    let category_hits = group
        .categories
        .iter()
        .filter(|group_cat| {
            cap.category
                .iter()
                .any(|tag| match_category_string(tag, group_cat))
        })
        .count() as u32;
    result.score += category_hits * CATEGORY_POINTS;

    let title = cap.title.to_lowercase();
    let description = cap.description.to_lowercase();
    let detail = cap.detail.as_deref().map(str::to_lowercase);

    for keyword in group.keywords {
        let needle = keyword.to_lowercase();
        if title.contains(&needle) {
            result.score += TITLE_KEYWORD_POINTS;
            result.note_keyword(keyword);
        }
    }
    for keyword in group.keywords {
        let needle = keyword.to_lowercase();
        if description.contains(&needle) {
            result.score += DESCRIPTION_KEYWORD_POINTS;
            result.note_keyword(keyword);
        }
    }

    for name in group.categories.iter().filter_map(|c| categories::short_name(c)) {
        if cap.title.contains(name) {
            result.score += TITLE_CATEGORY_POINTS;
        }
    }

    if let Some(detail) = &detail {
        for keyword in group.keywords {
            if detail.contains(&keyword.to_lowercase()) {
                result.score += DETAIL_KEYWORD_POINTS;
                result.note_keyword(keyword);
            }
        }
    }

    if let Some(published_at) = cap.timestamps.published_at {
        let age_days = (now - published_at).num_days();
        if age_days <= 14 {
            result.score += FRESH_POINTS;
        } else if age_days <= 30 {
            result.score += RECENT_POINTS;
        }
    }

    result
}

impl MatchResult {
    fn note_keyword(&mut self, keyword: &str) {
        if !self.matched_keywords.iter().any(|k| k == keyword) {
            self.matched_keywords.push(keyword.to_string());
        }
    }
}

/// A group together with the capabilities sorted into it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedCapabilities {
    #[serde(flatten)]
    pub group: CapabilityGroup,
    /// The first [`GROUP_PREVIEW_LEN`] of `all_capabilities`.
    pub capabilities: Vec<AiCapability>,
    /// Every matching capability, best score first.
    pub all_capabilities: Vec<AiCapability>,
}

impl GroupedCapabilities {
    /// A group with nothing sorted into it yet.
    pub fn empty(group: CapabilityGroup) -> Self {
        Self {
            group,
            capabilities: Vec::new(),
            all_capabilities: Vec::new(),
        }
    }
}

/// Sorts `capabilities` into every group.
///
/// Within a group, capabilities are ordered by descending score; ties keep
/// input order.
pub fn match_capabilities_to_groups(
    capabilities: &[AiCapability],
    groups: &[CapabilityGroup],
    now: DateTime<Utc>,
) -> Vec<GroupedCapabilities> {
    groups
        .iter()
        .map(|group| {
            let mut scored: Vec<(u32, &AiCapability)> = capabilities
                .iter()
                .map(|cap| (calculate_match_score(cap, group, now).score, cap))
                .filter(|(score, _)| *score > 0)
                .collect();
            scored.sort_by(|a, b| b.0.cmp(&a.0));

            let all_capabilities: Vec<AiCapability> =
                scored.into_iter().map(|(_, cap)| cap.clone()).collect();
            let capabilities = all_capabilities
                .iter()
                .take(GROUP_PREVIEW_LEN)
                .cloned()
                .collect();

            GroupedCapabilities {
                group: *group,
                capabilities,
                all_capabilities,
            }
        })
        .collect()
}

/// Capabilities that appear in no group's preview list.
pub fn unmatched_capabilities<'a>(
    capabilities: &'a [AiCapability],
    grouped: &[GroupedCapabilities],
) -> Vec<&'a AiCapability> {
    let shown: HashSet<&str> = grouped
        .iter()
        .flat_map(|g| g.capabilities.iter().map(|c| c.id.as_str()))
        .collect();

    capabilities
        .iter()
        .filter(|cap| !shown.contains(cap.id.as_str()))
        .collect()
}
