//! Display projections for cards and detail pages.
//!
//! The CMS stores long-form sections as rich-text HTML. Detail pages need
//! an outline of those sections (`h2`/`h3` headings with the markup that
//! follows each one), a difficulty rating, and trimmed tag lists for cards.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use crate::models::{AiCapability, Case, DemoType, Image, RelatedCapability};

/// Default difficulty when a capability carries no star rating.
pub const DEFAULT_DIFFICULTY: usize = 2;

/// One heading of a rich-text section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// `heading-{n}` in document order.
    pub id: String,
    /// 2 or 3.
    pub level: u8,
    pub text: String,
    /// Outer HTML of the sibling elements up to the next heading.
    pub content: String,
}

fn is_heading(element: &ElementRef<'_>) -> bool {
    matches!(element.value().name(), "h2" | "h3")
}

/// Extracts `h2`/`h3` headings from an HTML fragment.
pub fn extract_headings(html: &str) -> Vec<Heading> {
    if html.trim().is_empty() {
        return Vec::new();
    }

    let Ok(selector) = Selector::parse("h2, h3") else {
        return Vec::new();
    };
    let fragment = Html::parse_fragment(html);

    fragment
        .select(&selector)
        .enumerate()
        .map(|(index, heading)| {
            let level = if heading.value().name() == "h2" { 2 } else { 3 };
            let content = heading
                .next_siblings()
                .filter_map(ElementRef::wrap)
                .take_while(|el| !is_heading(el))
                .map(|el| el.html())
                .collect::<String>();

            Heading {
                id: format!("heading-{}", index),
                level,
                text: heading.text().collect::<String>(),
                content,
            }
        })
        .collect()
}

/// Difficulty from a star rating such as `★★★☆☆`: the number of filled
/// stars, or [`DEFAULT_DIFFICULTY`] when there are none.
pub fn difficulty_from_stars(text: &str) -> usize {
    match text.chars().filter(|c| *c == '★').count() {
        0 => DEFAULT_DIFFICULTY,
        n => n,
    }
}

/// A case as shown on list cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<Image>,
    pub case_type: Option<String>,
    pub frameworks: Vec<String>,
    pub purpose_tags: Vec<String>,
    pub roles: Vec<String>,
    pub demo_type: Option<DemoType>,
}

impl From<&Case> for CaseCard {
    fn from(case: &Case) -> Self {
        Self {
            id: case.id.clone(),
            title: case.title.clone(),
            description: case.description.clone(),
            thumbnail: case.thumbnail.clone(),
            case_type: case.case_type.clone(),
            frameworks: case.frameworks.iter().take(4).cloned().collect(),
            purpose_tags: case.purpose_tags.iter().take(4).cloned().collect(),
            roles: case.roles.iter().take(3).cloned().collect(),
            demo_type: case.demo_type.clone(),
        }
    }
}

/// Outline of a capability detail page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityOutline {
    pub id: String,
    pub title: String,
    /// From `difficultyLevel`, else the stars in `detail01`.
    pub difficulty: usize,
    /// Table of contents of `detail`.
    pub contents: Vec<Heading>,
    /// Usage scenarios (`detail07`).
    pub scenarios: Vec<Heading>,
    /// Expected effects (`detail08`).
    pub effects: Vec<Heading>,
    pub related: Vec<RelatedCapability>,
}

impl From<&AiCapability> for CapabilityOutline {
    fn from(cap: &AiCapability) -> Self {
        let difficulty = match cap.difficulty_level {
            Some(level) if level > 0 => level as usize,
            _ => difficulty_from_stars(cap.detail01.as_deref().unwrap_or_default()),
        };

        Self {
            id: cap.id.clone(),
            title: cap.title.clone(),
            difficulty,
            contents: extract_headings(cap.detail.as_deref().unwrap_or_default()),
            scenarios: extract_headings(cap.detail07.as_deref().unwrap_or_default()),
            effects: extract_headings(cap.detail08.as_deref().unwrap_or_default()),
            related: cap.related_capabilities.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_headings_collects_following_siblings() {
        let html = "<p>intro</p><h2>概要</h2><p>one</p><ul><li>two</li></ul>\
                    <h3>詳細</h3><p>three</p><h2>まとめ</h2>";
        let headings = extract_headings(html);
        assert_eq!(headings.len(), 3);

        assert_eq!(headings[0].id, "heading-0");
        assert_eq!(headings[0].level, 2);
        assert_eq!(headings[0].text, "概要");
        assert_eq!(headings[0].content, "<p>one</p><ul><li>two</li></ul>");

        assert_eq!(headings[1].level, 3);
        assert_eq!(headings[1].content, "<p>three</p>");

        assert_eq!(headings[2].text, "まとめ");
        assert!(headings[2].content.is_empty());
    }

    #[test]
    fn test_extract_headings_empty_input() {
        assert!(extract_headings("").is_empty());
        assert!(extract_headings("<p>no headings</p>").is_empty());
    }

    #[test]
    fn test_difficulty_from_stars() {
        assert_eq!(difficulty_from_stars("★★★☆☆"), 3);
        assert_eq!(difficulty_from_stars("<p>難易度: ★</p>"), 1);
        assert_eq!(difficulty_from_stars("普通"), DEFAULT_DIFFICULTY);
    }

    #[test]
    fn test_case_card_trims_tags() {
        let case = Case {
            id: "c".into(),
            frameworks: ["React", "Next.js", "TypeScript", "Vite", "Vercel"]
                .map(String::from)
                .to_vec(),
            roles: ["エンジニア", "営業", "人事", "経営者"].map(String::from).to_vec(),
            ..Default::default()
        };
        let card = CaseCard::from(&case);
        assert_eq!(card.frameworks.len(), 4);
        assert_eq!(card.roles, vec!["エンジニア", "営業", "人事"]);
        assert!(card.purpose_tags.is_empty());
    }

    #[test]
    fn test_outline_prefers_difficulty_level() {
        let mut cap = AiCapability {
            id: "x".into(),
            detail01: Some("★★★★".into()),
            detail07: Some("<h2>営業で使う</h2><p>a</p>".into()),
            ..Default::default()
        };
        assert_eq!(CapabilityOutline::from(&cap).difficulty, 4);

        cap.difficulty_level = Some(1);
        let outline = CapabilityOutline::from(&cap);
        assert_eq!(outline.difficulty, 1);
        assert_eq!(outline.scenarios.len(), 1);
        assert!(outline.effects.is_empty());
    }
}
