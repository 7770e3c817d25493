//! Capability catalog: every capability sorted into purpose groups.
//!
//! Built once per request (or CLI invocation) from the content service,
//! then queried for group listings, search, and category pages.

use anyhow::Result;
use chrono::{DateTime, Utc};
use showcase_core::categories::{self, CategoryContents};
use showcase_core::groups::CAPABILITY_GROUPS;
use showcase_core::matching::{match_capabilities_to_groups, unmatched_capabilities, GroupedCapabilities};
use showcase_core::models::AiCapability;
use showcase_core::search::{execute_search, SearchHistory, SearchOutcome};

use crate::content::ContentService;

pub struct Catalog {
    capabilities: Vec<AiCapability>,
    grouped: Vec<GroupedCapabilities>,
}

impl Catalog {
    pub fn build(capabilities: Vec<AiCapability>, now: DateTime<Utc>) -> Self {
        let grouped = match_capabilities_to_groups(&capabilities, CAPABILITY_GROUPS, now);
        Self {
            capabilities,
            grouped,
        }
    }

    pub async fn load(service: &ContentService) -> Result<Self> {
        let capabilities = service.get_all_capabilities().await?;
        let catalog = Self::build(capabilities, Utc::now());
        tracing::info!(
            capabilities = catalog.capabilities.len(),
            unmatched = catalog.unmatched().len(),
            "catalog built"
        );
        Ok(catalog)
    }

    pub fn capabilities(&self) -> &[AiCapability] {
        &self.capabilities
    }

    pub fn grouped(&self) -> &[GroupedCapabilities] {
        &self.grouped
    }

    /// Groups that received at least one capability.
    pub fn non_empty_groups(&self) -> impl Iterator<Item = &GroupedCapabilities> {
        self.grouped.iter().filter(|g| !g.all_capabilities.is_empty())
    }

    pub fn unmatched(&self) -> Vec<&AiCapability> {
        unmatched_capabilities(&self.capabilities, &self.grouped)
    }

    pub fn search<'a>(&'a self, query: &str, history: &mut SearchHistory) -> SearchOutcome<'a> {
        execute_search(&self.grouped, query, history)
    }

    pub fn category<'a>(&'a self, category_id: &'a str) -> CategoryContents<'a> {
        categories::related_content_by_category(&self.capabilities, category_id)
    }
}
