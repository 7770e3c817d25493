//! Static fixtures served when the CMS is unreachable or disabled.
//!
//! - [`mock_cases`] / [`mock_capabilities`]: realistic records used as a
//!   fallback by the data-access layer.
//! - [`dummy_list`] / [`dummy_item`]: generic placeholders returned in safe
//!   mode, for any endpoint, without touching the network.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use crate::models::{AiCapability, Case, CmsTimestamps, Image, ListResponse};

const PLACEHOLDER_THUMBNAIL: &str = "https://placehold.jp/300x200.png";
const PLACEHOLDER_DUMMY: &str = "https://placehold.jp/150x150.png";
const PLACEHOLDER_DETAIL: &str = "これは詳細な説明文です。実際の導入事例についての詳細が入ります。";

/// Fixed timestamps: midnight UTC on 2023-01-`day`.
fn fixture_timestamps(day: u32) -> CmsTimestamps {
    let at: Option<DateTime<Utc>> = Utc.with_ymd_and_hms(2023, 1, day, 0, 0, 0).single();
    CmsTimestamps {
        created_at: at,
        updated_at: at,
        published_at: at,
        revised_at: at,
    }
}

fn mock_case(day: u32, title: &str, description: &str) -> Case {
    Case {
        id: format!("case{}", day),
        title: title.to_string(),
        description: description.to_string(),
        thumbnail: Some(Image::new(PLACEHOLDER_THUMBNAIL)),
        body: PLACEHOLDER_DETAIL.to_string(),
        timestamps: fixture_timestamps(day),
        ..Default::default()
    }
}

/// Three sample case studies.
pub fn mock_cases() -> ListResponse<Case> {
    ListResponse::from_contents(vec![
        mock_case(1, "企業のチャットボット導入事例", "顧客対応の効率化と満足度向上を実現"),
        mock_case(2, "画像認識AIによる製品検査の自動化", "製造業における品質管理プロセスの革新"),
        mock_case(3, "AI文書要約ツールの導入事例", "法務部門の業務効率化を実現"),
    ])
}

struct CapabilityFixture {
    title: &'static str,
    description: &'static str,
    category: &'static [&'static str],
    technologies: &'static [&'static str],
    detail: &'static str,
    difficulty: u8,
}

const CAPABILITY_FIXTURES: &[CapabilityFixture] = &[
    CapabilityFixture {
        title: "AIチャットボット",
        description: "24時間対応の自動顧客対応ツール",
        category: &["customer_support", "communication"],
        technologies: &["自然言語処理", "テキスト解析"],
        detail: "これは詳細な説明文です。実際の機能についての詳細が入ります。",
        difficulty: 2,
    },
    CapabilityFixture {
        title: "AI画像生成",
        description: "高品質な画像を自動生成するツール",
        category: &["image_generation", "design_support"],
        technologies: &["GANs", "Diffusion Models"],
        detail: "これは詳細な説明文です。実際の機能についての詳細が入ります。",
        difficulty: 3,
    },
    CapabilityFixture {
        title: "AI文書作成支援",
        description: "効率的な文書作成をサポート",
        category: &["text_creation", "document_creation"],
        technologies: &["自然言語生成", "テキスト分析"],
        detail: "これは詳細な説明文です。実際の機能についての詳細が入ります。",
        difficulty: 1,
    },
    CapabilityFixture {
        title: "AIデータ分析",
        description: "大量のデータから傾向を抽出",
        category: &["data_analysis"],
        technologies: &["機械学習", "データマイニング"],
        detail: "データ分析の詳細説明",
        difficulty: 3,
    },
    CapabilityFixture {
        title: "会議録自動作成",
        description: "会議の音声から自動で議事録を作成",
        category: &["meeting_support", "document_creation"],
        technologies: &["音声認識", "自然言語処理"],
        detail: "会議支援ツールの詳細説明",
        difficulty: 2,
    },
];

/// Five sample capabilities, ids `capability1`..`capability5`.
pub fn mock_capabilities() -> Vec<AiCapability> {
    CAPABILITY_FIXTURES
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let n = i as u32 + 1;
            AiCapability {
                id: format!("capability{}", n),
                title: f.title.to_string(),
                description: f.description.to_string(),
                category: f.category.iter().map(|s| s.to_string()).collect(),
                technologies: f.technologies.iter().map(|s| s.to_string()).collect(),
                thumbnail: Some(Image::new(PLACEHOLDER_THUMBNAIL)),
                difficulty_level: Some(f.difficulty),
                detail: Some(f.detail.to_string()),
                timestamps: fixture_timestamps(n),
                ..Default::default()
            }
        })
        .collect()
}

/// Mock capabilities wrapped in a list envelope.
pub fn mock_capability_list() -> ListResponse<AiCapability> {
    ListResponse::from_contents(mock_capabilities())
}

/// The mock list for `endpoint` as JSON, if one exists.
pub fn mock_list(endpoint: &str) -> Option<Value> {
    match endpoint {
        "cases" => serde_json::to_value(mock_cases()).ok(),
        "capabilities" => serde_json::to_value(mock_capability_list()).ok(),
        _ => None,
    }
}

/// The mock record `id` from `endpoint`, falling back to the first record
/// when the id is unknown.
pub fn mock_item(endpoint: &str, id: &str) -> Option<Value> {
    match endpoint {
        "cases" => {
            let cases = mock_cases().contents;
            let found = cases.iter().find(|c| c.id == id).or_else(|| cases.first());
            found.and_then(|c| serde_json::to_value(c).ok())
        }
        "capabilities" => {
            let caps = mock_capabilities();
            let found = caps.iter().find(|c| c.id == id).or_else(|| caps.first());
            found.and_then(|c| serde_json::to_value(c).ok())
        }
        _ => None,
    }
}

/// Safe-mode placeholder list: five generic records for any endpoint.
pub fn dummy_list(endpoint: &str, now: DateTime<Utc>) -> Value {
    let stamp = now.to_rfc3339();
    let contents: Vec<Value> = (1..=5)
        .map(|i| {
            json!({
                "id": format!("dummy-{}-{}", endpoint, i),
                "title": format!("Dummy {} Title {}", endpoint, i),
                "description": format!("This is a dummy {} content.", endpoint),
                "categories": ["dummy-category-1", "dummy-category-2"],
                "thumbnail": { "url": PLACEHOLDER_DUMMY },
                "createdAt": stamp,
                "updatedAt": stamp,
            })
        })
        .collect();

    json!({
        "contents": contents,
        "totalCount": 5,
        "offset": 0,
        "limit": 10,
    })
}

/// Safe-mode placeholder for a single content id.
pub fn dummy_item(endpoint: &str, id: &str, now: DateTime<Utc>) -> Value {
    let stamp = now.to_rfc3339();
    json!({
        "id": id,
        "title": format!("Dummy {} Title", endpoint),
        "description": format!("This is a dummy {} content.", endpoint),
        "content": format!("Detailed content for {}", id),
        "createdAt": stamp,
        "updatedAt": stamp,
        "categories": ["dummy-category-1", "dummy-category-2"],
        "thumbnail": { "url": PLACEHOLDER_DUMMY },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_fixture_ids() {
        let cases = mock_cases();
        assert_eq!(cases.total_count, 3);
        assert_eq!(cases.contents[2].id, "case3");

        let caps = mock_capabilities();
        assert_eq!(caps.len(), 5);
        assert_eq!(caps[4].id, "capability5");
        assert_eq!(caps[4].difficulty_level, Some(2));
    }

    #[test]
    fn test_mock_item_falls_back_to_first() {
        let hit = mock_item("capabilities", "capability3").unwrap();
        assert_eq!(hit["title"], "AI文書作成支援");

        let miss = mock_item("cases", "nope").unwrap();
        assert_eq!(miss["id"], "case1");

        assert!(mock_item("tools", "x").is_none());
        assert!(mock_list("tools").is_none());
    }

    #[test]
    fn test_mock_list_is_cms_shaped() {
        let list = mock_list("capabilities").unwrap();
        assert_eq!(list["totalCount"], 5);
        assert_eq!(list["contents"][0]["category"][0], "customer_support");
        assert_eq!(list["contents"][0]["publishedAt"], "2023-01-01T00:00:00Z");
    }

    #[test]
    fn test_dummy_records() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let list = dummy_list("news", now);
        assert_eq!(list["contents"].as_array().unwrap().len(), 5);
        assert_eq!(list["contents"][4]["id"], "dummy-news-5");

        let item = dummy_item("news", "abc", now);
        assert_eq!(item["id"], "abc");
        assert_eq!(item["content"], "Detailed content for abc");
    }
}
