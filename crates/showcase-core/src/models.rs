//! Content records served by the headless CMS.
//!
//! All types mirror the camelCase JSON shapes returned by microCMS. The CMS
//! owns validation, so every field that a `fields=` projection can drop is
//! optional or defaulted here: a list request only returns card fields, a
//! detail request returns everything.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An image reference (`MicroCMSImage`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

impl Image {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            height: None,
            width: None,
        }
    }
}

/// Timestamps the CMS attaches to every list content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsTimestamps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revised_at: Option<DateTime<Utc>>,
}

/// How a case demonstrates itself on its detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DemoType {
    DemoTool,
    DemoVideo,
    ArticleOnly,
    /// Any value added in the CMS after this build.
    #[serde(untagged)]
    Other(String),
}

/// A business case study.
///
/// `case_type`, `industry` and the tag lists are closed selections in the
/// CMS schema (e.g. `AI活用`, `React`, `業務効率化`), but they are kept as
/// strings so that a new option in the CMS never breaks decoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub core_technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frameworks: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub purpose_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problems: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_steps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_type: Option<DemoType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Rich-text body (formerly `detail`).
    #[serde(default, alias = "detail")]
    pub body: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<Image>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_cases: Vec<Case>,
    /// Tool articles referenced from the detail page.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_articles: Vec<RelatedCapability>,
    #[serde(flatten)]
    pub timestamps: CmsTimestamps,
}

/// A lightweight reference to another capability, shown in the
/// related-articles carousel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedCapability {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Image>,
}

/// An "AI capability" listing entry.
///
/// `category` holds raw CMS tags, which may be plain ids
/// (`text_creation`) or bilingual labels (`text_creation（文章作成）`).
/// See [`crate::categories`] for how they are resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiCapability {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail01: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail02: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail03: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail04: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail05: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail06: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail07: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail08: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail09: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail10: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail11: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail12: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail13: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_capabilities: Vec<RelatedCapability>,
    #[serde(flatten)]
    pub timestamps: CmsTimestamps,
}

/// Paginated list envelope returned by the CMS list API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub contents: Vec<T>,
    #[serde(default)]
    pub total_count: usize,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub limit: usize,
}

impl<T> ListResponse<T> {
    /// Wraps a full record set as a single page of `limit` 10, which is
    /// the CMS default page size.
    pub fn from_contents(contents: Vec<T>) -> Self {
        let total_count = contents.len();
        Self {
            contents,
            total_count,
            offset: 0,
            limit: 10,
        }
    }

    /// Converts every record, keeping the paging fields.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> ListResponse<U> {
        ListResponse {
            contents: self.contents.into_iter().map(f).collect(),
            total_count: self.total_count,
            offset: self.offset,
            limit: self.limit,
        }
    }
}
