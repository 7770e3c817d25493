//! Category catalog and category matching.
//!
//! Capabilities are tagged in the CMS with free-form category strings.
//! Editors use several spellings for the same category, so matching is a
//! heuristic over:
//!
//! - the bare id (`text_creation`),
//! - a bilingual label `"{id}（{display}）"` (full-width parentheses),
//! - the Japanese display name alone (`文章作成`),
//! - sub-category ids sharing the id as a prefix (`text_creation_blog`).
//!
//! The catalog below is the single source of truth for ids, display names
//! and aliases. Groupings built on top of it (purpose groups, related
//! categories, departments) reference categories by id.

use serde::Serialize;
use std::borrow::Cow;

use crate::models::AiCapability;

/// Full-width opening parenthesis used in bilingual labels.
const LABEL_OPEN: char = '（';
/// Full-width closing parenthesis used in bilingual labels.
const LABEL_CLOSE: char = '）';

/// A display category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    /// Japanese display name.
    pub display: &'static str,
    /// Shorter name the capability list scores titles and queries against.
    /// `None` for categories the list does not show.
    pub short: Option<&'static str>,
    /// The business problem this category addresses.
    pub challenge: &'static str,
}

impl Category {
    /// The bilingual label the CMS uses for this category,
    /// e.g. `text_creation（文章作成）`.
    pub fn alias(&self) -> String {
        format!("{}{}{}{}", self.id, LABEL_OPEN, self.display, LABEL_CLOSE)
    }
}

macro_rules! category {
    ($id:literal, $display:literal, $challenge:literal) => {
        Category {
            id: $id,
            display: $display,
            short: None,
            challenge: $challenge,
        }
    };
    ($id:literal, $display:literal / $short:literal, $challenge:literal) => {
        Category {
            id: $id,
            display: $display,
            short: Some($short),
            challenge: $challenge,
        }
    };
}

/// All known categories, in display order.
pub const CATEGORIES: &[Category] = &[
    category!("text_creation", "文章作成" / "文章作成", "高品質な文章コンテンツを効率的に作成したい"),
    category!("image_generation", "画像生成" / "画像生成", "クオリティの高い画像・イラストを素早く生成したい"),
    category!("video_creation", "動画作成" / "動画作成", "魅力的な動画コンテンツを手軽に制作したい"),
    category!("shift_management", "シフト管理" / "シフト管理", "複雑なシフト管理を効率化し最適なスケジュールを作成したい"),
    category!("document_creation", "文書作成・管理" / "文書作成・管理", "ビジネス文書の作成・管理の手間を削減したい"),
    category!("meeting_support", "会議・ミーティング支援" / "会議支援", "会議の準備・運営・フォローアップの効率を高めたい"),
    category!("customer_support", "カスタマーサポート" / "カスタマーサポート", "顧客対応の質を維持しながら業務負担を軽減したい"),
    category!("data_analysis", "データ分析・レポート" / "データ分析", "大量のデータから有益な洞察を効率的に抽出したい"),
    category!("translation", "翻訳・多言語対応" / "翻訳・多言語化", "正確で自然な翻訳を素早く行いたい"),
    category!("design_support", "デザイン支援" / "デザイン支援", "クリエイティブなデザイン作業を効率化したい"),
    category!("code_generation", "コード生成・開発支援" / "コード生成・開発支援", "プログラミング作業を効率化し開発スピードを向上させたい"),
    category!("marketing_analysis", "マーケティング分析" / "マーケティング分析", "マーケティング戦略の立案と効果測定を強化したい"),
    category!("content_planning", "コンテンツ企画" / "コンテンツ企画", "魅力的なコンテンツのアイデア創出を効率化したい"),
    category!("sales_support", "営業支援" / "営業支援", "営業活動の効率と成約率を向上させたい"),
    category!("social_media", "SNS運用支援" / "SNS運用", "SNSの運用管理と効果的な投稿作成を効率化したい"),
    category!("market_research", "市場調査・分析" / "市場調査", "市場動向の把握と分析を迅速に行いたい"),
    category!("recruitment", "採用・人材管理" / "採用・人材", "採用プロセスと人材管理を効率化したい"),
    category!("training_support", "研修・教育支援" / "研修・教育支援", "効果的な研修・教育プログラムを作成・実施したい"),
    category!("performance_evaluation", "評価・フィードバック", "公平で効果的な人事評価とフィードバックを実現したい"),
    category!("workflow_optimization", "業務フロー最適化", "複雑な業務プロセスを見直し効率化したい"),
    category!("automation", "業務自動化", "定型業務の自動化で工数削減と精度向上を実現したい"),
    category!("knowledge_management", "ナレッジ管理", "組織内の知識・情報を効率的に管理・活用したい"),
    category!("communication", "コミュニケーション改善", "社内外のコミュニケーションを円滑化したい"),
    category!("life_planning", "ライフプランニング", "個人の生活設計や将来計画をサポートしたい"),
    category!("health_care", "ヘルスケア・健康管理", "健康維持・管理を効率的にサポートしたい"),
    category!("learning_support", "学習・自己啓発", "効果的な学習法と自己成長をサポートしたい"),
    category!("entertainment", "エンターテインメント", "新しい娯楽体験とコンテンツ消費を充実させたい"),
    category!("personal_finance", "家計・資産管理", "個人の財務管理と資産運用を最適化したい"),
    category!("research_support", "研究・開発支援", "研究開発プロセスを効率化し革新的な成果を生み出したい"),
    category!("legal_support", "法務・コンプライアンス", "法的要件の遵守と法務業務の効率化を実現したい"),
    category!("risk_management", "リスク管理・セキュリティ", "組織のリスクを把握し適切な対策を実施したい"),
];

/// Related categories, used to pad thin category pages.
///
/// Order matters: secondary matches are taken category by category.
const RELATED_CATEGORIES: &[(&str, &[&str])] = &[
    ("text_creation", &["content_planning", "social_media", "marketing_analysis"]),
    ("image_generation", &["design_support", "content_planning", "social_media"]),
    ("video_creation", &["content_planning", "social_media"]),
    ("design_support", &["image_generation", "content_planning"]),
    ("content_planning", &["text_creation", "social_media", "marketing_analysis"]),
    ("shift_management", &["workflow_optimization", "automation"]),
    ("document_creation", &["text_creation", "knowledge_management"]),
    ("workflow_optimization", &["automation", "knowledge_management"]),
    ("automation", &["workflow_optimization", "knowledge_management"]),
    ("knowledge_management", &["document_creation", "communication"]),
    ("data_analysis", &["market_research", "marketing_analysis", "research_support"]),
    ("market_research", &["data_analysis", "marketing_analysis"]),
    ("marketing_analysis", &["market_research", "data_analysis", "content_planning", "social_media"]),
    ("research_support", &["data_analysis", "code_generation"]),
    ("meeting_support", &["communication", "knowledge_management"]),
    ("communication", &["meeting_support", "translation"]),
    ("translation", &["communication", "text_creation"]),
    ("social_media", &["content_planning", "marketing_analysis", "text_creation"]),
    ("customer_support", &["sales_support", "communication"]),
    ("sales_support", &["customer_support", "marketing_analysis"]),
    ("recruitment", &["training_support", "performance_evaluation"]),
    ("training_support", &["learning_support", "recruitment", "performance_evaluation"]),
    ("performance_evaluation", &["recruitment", "training_support"]),
    ("learning_support", &["training_support", "entertainment"]),
    ("health_care", &["life_planning", "personal_finance"]),
    ("entertainment", &["learning_support"]),
    ("life_planning", &["health_care", "personal_finance"]),
    ("personal_finance", &["life_planning"]),
    ("legal_support", &["risk_management", "document_creation"]),
    ("risk_management", &["legal_support", "code_generation"]),
    ("code_generation", &["research_support", "automation"]),
];

/// A "what do you want to do" purpose group on the capabilities overview.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PurposeGroup {
    pub title: &'static str,
    pub description: &'static str,
    pub categories: &'static [&'static str],
}

pub const PURPOSE_GROUPS: &[PurposeGroup] = &[
    PurposeGroup {
        title: "コンテンツを作る",
        description: "文章・画像・動画などの作成と編集",
        categories: &["text_creation", "image_generation", "video_creation", "design_support", "content_planning"],
    },
    PurposeGroup {
        title: "業務を効率化する",
        description: "日常業務の自動化と管理の最適化",
        categories: &["shift_management", "document_creation", "workflow_optimization", "automation", "knowledge_management"],
    },
    PurposeGroup {
        title: "情報を分析・活用する",
        description: "データから洞察を得て意思決定を支援",
        categories: &["data_analysis", "market_research", "marketing_analysis", "research_support"],
    },
    PurposeGroup {
        title: "コミュニケーションを改善する",
        description: "人と人、組織間の対話をスムーズに",
        categories: &["meeting_support", "communication", "translation", "social_media"],
    },
    PurposeGroup {
        title: "顧客・営業活動を強化する",
        description: "顧客体験と営業プロセスの質を高める",
        categories: &["customer_support", "sales_support"],
    },
    PurposeGroup {
        title: "人材・組織を育てる",
        description: "採用から育成、評価までの人材マネジメント",
        categories: &["recruitment", "training_support", "performance_evaluation"],
    },
    PurposeGroup {
        title: "個人の生活を豊かにする",
        description: "学習、健康、娯楽、資産管理をサポート",
        categories: &["learning_support", "entertainment", "health_care", "life_planning", "personal_finance"],
    },
    PurposeGroup {
        title: "リスク管理と安全を確保する",
        description: "法令遵守とセキュリティ対策",
        categories: &["legal_support", "risk_management", "code_generation"],
    },
];

/// A business department and the capability groups relevant to it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Department {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Ids from [`crate::groups::CAPABILITY_GROUPS`].
    pub related_capabilities: &'static [&'static str],
}

pub const DEPARTMENTS: &[Department] = &[
    Department { id: "general", title: "総合", description: "全業種で活用できる基本的なAI機能", related_capabilities: &["email_support", "task_management", "document_check"] },
    Department { id: "sales", title: "営業", description: "営業活動や商談に関するAI機能", related_capabilities: &["customer_analysis", "sales_support", "proposal_writing"] },
    Department { id: "accounting", title: "経理", description: "経理業務や財務管理に関するAI機能", related_capabilities: &["expense_automation", "invoice_processing", "financial_report"] },
    Department { id: "general_affairs", title: "総務", description: "社内の管理業務全般に関するAI機能", related_capabilities: &["document_management", "facility_management", "schedule_optimization"] },
    Department { id: "quality_management", title: "品質管理", description: "製品やサービスの品質向上に関するAI機能", related_capabilities: &["quality_inspection", "process_optimization", "defect_detection"] },
    Department { id: "manufacturing", title: "製造", description: "製造工程や生産管理に関するAI機能", related_capabilities: &["production_scheduling", "inventory_optimization", "equipment_maintenance"] },
    Department { id: "hr", title: "人事", description: "採用や人材育成に関するAI機能", related_capabilities: &["resume_screening", "interview_preparation", "training_management"] },
    Department { id: "marketing", title: "マーケティング", description: "広告やプロモーションに関するAI機能", related_capabilities: &["content_creation", "market_analysis", "social_media_management"] },
    Department { id: "service", title: "サービス", description: "カスタマーサポートやサービス改善に関するAI機能", related_capabilities: &["chat_support", "customer_feedback", "service_optimization"] },
    Department { id: "creative", title: "クリエイティブ", description: "デザインやコンテンツ制作に関するAI機能", related_capabilities: &["banner_creation", "video_editing", "illustration_generation"] },
    Department { id: "education", title: "教育", description: "研修や教育支援に関するAI機能", related_capabilities: &["learning_support", "manual_creation", "training_content"] },
];

// ============ Lookups ============

/// Looks up a category by id.
pub fn find(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// Short scoring name for a category id. `None` for ids outside the
/// catalog and for categories without one.
pub fn short_name(id: &str) -> Option<&'static str> {
    find(id).and_then(|c| c.short)
}

/// Display name for a category id, falling back to the id itself.
pub fn display_name(id: &str) -> &str {
    match find(id) {
        Some(category) => category.display,
        None => id,
    }
}

/// Reverse lookup from a Japanese display name.
pub fn id_by_display_name(display: &str) -> Option<&'static str> {
    CATEGORIES.iter().find(|c| c.display == display).map(|c| c.id)
}

/// Looks up a category by id, then by display name.
pub fn lookup(key: &str) -> Option<&'static Category> {
    find(key).or_else(|| id_by_display_name(key).and_then(find))
}

/// Related category ids for `id`, empty when none are defined.
pub fn related(id: &str) -> &'static [&'static str] {
    RELATED_CATEGORIES
        .iter()
        .find(|(key, _)| *key == id)
        .map(|(_, related)| *related)
        .unwrap_or(&[])
}

// ============ Label parsing ============

/// The two halves of a CMS category tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label<'a> {
    /// Trimmed text before `（`, or the whole trimmed tag.
    pub base: &'a str,
    /// Trimmed text after the first `（` and before any second one, with
    /// the first `）` removed. `None` unless the tag contains `（`.
    pub japanese: Option<Cow<'a, str>>,
}

/// Splits a tag like `text_creation（文章作成）` into its parts.
///
/// Text after the closing parenthesis stays in the Japanese part, so
/// `x（文章作成）補足` yields `文章作成補足`.
pub fn parse_label(tag: &str) -> Label<'_> {
    let Some((base, rest)) = tag.split_once(LABEL_OPEN) else {
        return Label {
            base: tag.trim(),
            japanese: None,
        };
    };

    let segment = rest.split(LABEL_OPEN).next().unwrap_or(rest);
    let japanese = match segment.split_once(LABEL_CLOSE) {
        Some((inner, "")) => Cow::Borrowed(inner.trim()),
        Some((inner, after)) => Cow::Owned(format!("{}{}", inner, after).trim().to_string()),
        None => Cow::Borrowed(segment.trim()),
    };

    Label {
        base: base.trim(),
        japanese: Some(japanese),
    }
}

// ============ Matching ============

/// Whether a single CMS tag belongs to `category_id`.
pub fn tag_matches(tag: &str, category_id: &str) -> bool {
    if tag == category_id {
        return true;
    }

    let label = parse_label(tag);
    if label.base == category_id {
        return true;
    }

    let prefix = format!("{}_", category_id);
    if tag.starts_with(&prefix) || label.base.starts_with(&prefix) {
        return true;
    }

    let Some(category) = find(category_id) else {
        return false;
    };

    tag == category.alias()
        || tag == category.display
        || label.japanese.as_deref() == Some(category.display)
}

/// Whether any of the capability's tags belongs to `category_id`.
pub fn matches_category(capability: &AiCapability, category_id: &str) -> bool {
    capability
        .category
        .iter()
        .any(|tag| tag_matches(tag, category_id))
}

/// Strict matching used by group scoring: exact equality, or `cms_tag`
/// is the bilingual alias of the catalog entry `group_category`.
pub fn match_category_string(cms_tag: &str, group_category: &str) -> bool {
    if cms_tag == group_category {
        return true;
    }

    CATEGORIES
        .iter()
        .find(|c| c.alias() == cms_tag)
        .is_some_and(|c| c.id == group_category)
}

/// Capabilities in `category_id`, in input order.
pub fn filter_by_category<'a>(
    capabilities: &'a [AiCapability],
    category_id: &str,
) -> Vec<&'a AiCapability> {
    capabilities
        .iter()
        .filter(|cap| matches_category(cap, category_id))
        .collect()
}

/// How many related-category items to show after `primary_count`
/// direct matches.
pub fn secondary_limit(primary_count: usize) -> usize {
    if primary_count < 3 {
        4
    } else if primary_count < 5 {
        3
    } else {
        2
    }
}

/// A category page: direct matches followed by a few items from related
/// categories.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryContents<'a> {
    pub category: &'a str,
    pub display_name: &'a str,
    pub primary: Vec<&'a AiCapability>,
    pub secondary: Vec<&'a AiCapability>,
}

impl<'a> CategoryContents<'a> {
    /// Primary then secondary, as rendered.
    pub fn items(&self) -> impl Iterator<Item = &'a AiCapability> + '_ {
        self.primary.iter().chain(self.secondary.iter()).copied()
    }
}

/// Builds the category page for `category_id`.
///
/// Secondary items come from [`related`] categories in order, skipping
/// anything already shown, and are capped by [`secondary_limit`].
pub fn related_content_by_category<'a>(
    capabilities: &'a [AiCapability],
    category_id: &'a str,
) -> CategoryContents<'a> {
    let primary = filter_by_category(capabilities, category_id);

    let mut secondary: Vec<&AiCapability> = Vec::new();
    for related_id in related(category_id) {
        for cap in filter_by_category(capabilities, related_id) {
            let seen = primary.iter().chain(secondary.iter()).any(|p| p.id == cap.id);
            if !seen {
                secondary.push(cap);
            }
        }
    }
    secondary.truncate(secondary_limit(primary.len()));

    CategoryContents {
        category: category_id,
        display_name: display_name(category_id),
        primary,
        secondary,
    }
}
