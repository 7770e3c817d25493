//! "What AI can do for you" groups.
//!
//! Each group is a plain-language promise ("メールの返信を即座に作成してくれる")
//! that capabilities are sorted into by [`crate::matching`]. Groups name
//! categories loosely: some ids come from the category catalog, others
//! (`chat_bot`, `finance`, ...) are free tags that only match capabilities
//! carrying exactly that tag.

use serde::Serialize;

/// A capability group definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapabilityGroup {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub categories: &'static [&'static str],
    pub keywords: &'static [&'static str],
}

macro_rules! group {
    ($id:literal, $title:literal, $description:literal, [$($cat:literal),* $(,)?], [$($kw:literal),* $(,)?]) => {
        CapabilityGroup {
            id: $id,
            title: $title,
            description: $description,
            categories: &[$($cat),*],
            keywords: &[$($kw),*],
        }
    };
}

pub const CAPABILITY_GROUPS: &[CapabilityGroup] = &[
    // Writing & documents
    group!("email_support", "メールの返信を即座に作成してくれる", "クレームメールや問い合わせへの返信文を、適切な言葉遣いでAIが作成", ["text_creation"], ["メール", "返信", "クレーム対応", "ビジネスメール"]),
    group!("proposal_writing", "企画書や提案書を素早く作ってくれる", "企画のポイントを入力するだけで、説得力のある提案書をAIが作成", ["document_creation"], ["企画書", "提案書", "プレゼン資料"]),
    group!("minutes_creation", "会議の音声から議事録を自動作成", "会議の録音データから、要点をまとめた議事録をAIが作成します", ["meeting_support"], ["議事録", "会議", "音声認識", "テキスト化"]),
    // Customer contact
    group!("chat_support", "チャットでの問い合わせに24時間対応", "よくある質問への回答や簡単な問い合わせに、AIが即座に対応します", ["customer_support", "chat_bot"], ["チャットボット", "FAQ", "問い合わせ対応"]),
    group!("inquiry_classification", "問い合わせ内容を自動で振り分けてくれる", "メールやチャットの内容を解析し、適切な部署や担当者へAIが振り分け", ["workflow"], ["問い合わせ管理", "業務振り分け", "自動分類"]),
    // Creative
    group!("banner_creation", "プロ品質のバナーをサクッと作れる", "商品画像とキャッチコピーを入力するだけで、魅力的なバナーをAIが生成", ["design"], ["バナー", "広告", "デザイン"]),
    group!("social_media_content", "SNSの投稿文と画像をまとめて作成", "商品やサービスの情報から、SNSに最適な投稿文と画像をAIが生成", ["marketing"], ["SNS", "投稿", "コンテンツ"]),
    // Back office
    group!("shift_management", "シフト表を自動で最適化してくれる", "スタッフの希望と店舗の繁閑期を考慮して、最適なシフトをAIが作成", ["scheduling"], ["シフト管理", "勤怠", "スケジュール"]),
    group!("expense_automation", "領収書をアップするだけで経費精算書を作成", "領収書を撮影するだけで、経費精算に必要な情報をAIが自動で抽出・入力", ["finance"], ["経費精算", "領収書", "会計"]),
    // Language
    group!("business_translation", "ビジネス文書を最適な表現で翻訳", "業界用語や文脈を考慮して、ビジネス文書を適切な表現でAIが翻訳", ["translation"], ["翻訳", "多言語", "国際化"]),
    group!("realtime_translation", "オンライン会議でリアルタイム翻訳", "海外との会議で、リアルタイムに音声翻訳をAIが実施", ["communication"], ["通訳", "オンライン会議", "グローバル"]),
    // Analysis
    group!("sales_forecast", "売上予測を簡単にシミュレーション", "過去のデータから将来の売上をAIが予測し、わかりやすくグラフ化", ["analysis"], ["売上予測", "データ分析", "経営"]),
    group!("market_analysis", "市場トレンドをリアルタイムで分析", "SNSやニュースの情報から、市場トレンドをAIがリアルタイムで分析", ["marketing"], ["トレンド分析", "市場調査", "マーケティング"]),
    // Quality & legal
    group!("document_check", "文書のミスを自動でチェック", "文書の誤字脱字や表現の不備を、AIが自動でチェックして指摘", ["quality"], ["校正", "チェック", "品質管理"]),
    group!("contract_review", "契約書の内容を自動でチェック", "契約書の重要項目や リスク箇所をAIが自動で識別してチェック", ["legal"], ["契約書", "法務", "リスク管理"]),
    // HR
    group!("resume_screening", "応募者の書類を自動で評価", "履歴書や職務経歴書から、求める人材要件との適合度をAIが評価", ["hr"], ["採用", "人事", "スクリーニング"]),
    group!("interview_preparation", "面接の質問と評価シートを自動作成", "応募者のプロフィールから、最適な面接質問とポイントをAIが提案", ["recruitment"], ["面接", "採用", "評価"]),
    // Training
    group!("manual_creation", "業務マニュアルを簡単に作成", "作業手順を入力するだけで、わかりやすいマニュアルをAIが作成", ["documentation"], ["マニュアル", "手順書", "教育"]),
    group!("learning_support", "個人の理解度に合わせて学習をサポート", "一人ひとりの理解度や進捗に合わせて、最適な学習内容をAIが提案", ["education"], ["研修", "教育", "学習支援"]),
    // Projects
    group!("task_management", "タスクの優先順位を自動で整理", "期限や重要度を考慮して、タスクの最適な実行順序をAIが提案", ["project"], ["タスク管理", "優先順位", "スケジュール"]),
    group!("risk_detection", "プロジェクトのリスクを早期に発見", "進捗データや報告書から、プロジェクトのリスクをAIが早期に検知", ["management"], ["リスク管理", "プロジェクト", "予防"]),
    // Sales
    group!("sales_support", "商談の内容を自動で議事録化", "商談の録音データから、重要なポイントと次のアクションをAIが整理", ["sales"], ["営業", "商談", "フォローアップ"]),
    group!("customer_analysis", "顧客の行動パターンを分析", "顧客データから購買傾向や離反リスクをAIが分析し、最適なアプローチを提案", ["crm"], ["顧客分析", "CRM", "マーケティング"]),
    // Operations
    group!("inventory_optimization", "在庫の発注タイミングを最適化", "販売データと在庫状況から、最適な発注のタイミングをAIが提案", ["inventory"], ["在庫管理", "発注", "最適化"]),
    group!("quality_inspection", "製品の品質検査を自動化", "画像認識技術で製品の不良をAIが自動で検出し、品質を保証", ["manufacturing"], ["品質管理", "検査", "不良品検出"]),
    // Collaboration
    group!("meeting_facilitation", "会議の進行をスムーズにサポート", "議題の管理や発言の整理など、会議の進行をAIがサポート", ["meeting"], ["会議", "ファシリテーション", "時間管理"]),
    group!("team_communication", "チーム内の情報共有を効率化", "必要な情報を必要な人に、最適なタイミングでAIが共有", ["collaboration"], ["情報共有", "チーム", "コミュニケーション"]),
    // Management
    group!("business_insight", "経営データをわかりやすくレポート", "複雑な経営データを、誰でも理解できる形でAIが可視化", ["management"], ["経営分析", "レポート", "意思決定"]),
    group!("market_monitoring", "市場の変化をリアルタイムで監視", "ニュースやSNSから市場の変化をAIが検知し、早期の対応を支援", ["strategy"], ["市場分析", "モニタリング", "リスク管理"]),
    // Content production
    group!("thumbnail_creation", "魅力的なサムネイル画像を即座に生成", "ブログやYouTubeのサムネイル画像を、テーマに合わせてAIが自動生成", ["image_generation"], ["サムネイル", "YouTube", "ブログ", "アイキャッチ"]),
    group!("catchphrase_generation", "商品の特徴を活かしたキャッチコピーを作成", "商品の特徴や強みから、印象に残るキャッチフレーズをAIが提案", ["text_creation", "marketing"], ["キャッチコピー", "広告", "プロモーション"]),
    group!("video_editing", "動画の編集や要約を自動で実行", "長い動画から重要なシーンを抽出し、短い動画にAIが自動編集", ["video_creation"], ["動画編集", "ショート動画", "ダイジェスト"]),
    group!("social_post_set", "SNS投稿セットを一括で作成", "画像、本文、ハッシュタグまで、SNSに最適な投稿セットをAIが生成", ["content_creation", "social_media"], ["SNS", "Instagram", "Twitter", "投稿"]),
    group!("illustration_generation", "可愛いイラストやアイコンを簡単作成", "ブログやSNS用のオリジナルイラストやアイコンをAIが生成", ["image_generation"], ["イラスト", "アイコン", "装飾"]),
    group!("product_photo", "商品写真を自然な感じに補正・加工", "商品写真の背景除去や色調整、自然な見栄えへの加工をAIが実行", ["image_processing"], ["商品写真", "画像加工", "EC"]),
    group!("presentation_design", "見やすいプレゼン資料を自動デザイン", "文章を入力するだけで、図解やグラフを含むスライドをAIが作成", ["presentation", "design"], ["プレゼン", "スライド", "資料作成"]),
    group!("blog_content", "ブログ記事を構成から一括作成", "テーマに沿って、見出し構成から本文まで、読みやすい記事をAIが作成", ["content_creation", "writing"], ["ブログ", "記事作成", "コンテンツ"]),
    group!("infographic_creation", "データをわかりやすいインフォグラフィックに", "複雑なデータや情報を、視覚的にわかりやすい図解にAIが変換", ["design", "data_visualization"], ["インフォグラフィック", "図解", "データ可視化"]),
    group!("voice_narration", "自然な声のナレーション音声を生成", "テキストから、感情豊かな自然な音声ナレーションをAIが作成", ["audio_creation"], ["ナレーション", "音声", "動画制作"]),
];

/// Looks up a group by id.
pub fn find(id: &str) -> Option<&'static CapabilityGroup> {
    CAPABILITY_GROUPS.iter().find(|g| g.id == id)
}

/// A one-click search suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PopularTag {
    pub label: &'static str,
    /// Space-separated query terms run when the tag is picked.
    pub keyword: &'static str,
}

/// Looks up a popular tag by its label.
pub fn popular_tag(label: &str) -> Option<&'static PopularTag> {
    POPULAR_TAGS.iter().find(|t| t.label == label)
}

pub const POPULAR_TAGS: &[PopularTag] = &[
    PopularTag { label: "文章作成", keyword: "文章 作成 レポート" },
    PopularTag { label: "画像生成", keyword: "画像 生成 イラスト" },
    PopularTag { label: "データ分析", keyword: "データ 分析 グラフ" },
    PopularTag { label: "音声認識", keyword: "音声 文字起こし 議事録" },
    PopularTag { label: "翻訳", keyword: "翻訳 多言語" },
    PopularTag { label: "コード生成", keyword: "プログラミング コード" },
    PopularTag { label: "メール対応", keyword: "メール 返信" },
    PopularTag { label: "要約", keyword: "要約 抽出" },
    PopularTag { label: "動画編集", keyword: "動画 字幕" },
    PopularTag { label: "業務効率化", keyword: "効率化 自動化" },
    PopularTag { label: "営業支援", keyword: "営業 提案書 顧客" },
    PopularTag { label: "人事管理", keyword: "採用 人事 評価" },
    PopularTag { label: "財務分析", keyword: "財務 予算 会計" },
    PopularTag { label: "マーケティング", keyword: "マーケティング 広告" },
    PopularTag { label: "カスタマーサポート", keyword: "サポート 問い合わせ" },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::DEPARTMENTS;

    #[test]
    fn test_group_ids_are_unique() {
        for (i, a) in CAPABILITY_GROUPS.iter().enumerate() {
            assert!(
                CAPABILITY_GROUPS[i + 1..].iter().all(|b| b.id != a.id),
                "duplicate group id {}",
                a.id
            );
        }
    }

    #[test]
    fn test_every_group_has_keywords_and_categories() {
        for group in CAPABILITY_GROUPS {
            assert!(!group.keywords.is_empty(), "{} has no keywords", group.id);
            assert!(!group.categories.is_empty(), "{} has no categories", group.id);
        }
    }

    #[test]
    fn test_departments_reference_some_known_groups() {
        let sales = DEPARTMENTS.iter().find(|d| d.id == "sales").unwrap();
        let known: Vec<&str> = sales
            .related_capabilities
            .iter()
            .filter_map(|id| find(id).map(|g| g.id))
            .collect();
        assert_eq!(known, vec!["customer_analysis", "sales_support", "proposal_writing"]);
    }

    #[test]
    fn test_popular_tags() {
        assert_eq!(POPULAR_TAGS.len(), 15);
        assert!(POPULAR_TAGS.iter().all(|t| !t.keyword.trim().is_empty()));
        assert_eq!(popular_tag("翻訳").map(|t| t.keyword), Some("翻訳 多言語"));
        assert!(popular_tag("翻訳 多言語").is_none());
    }
}
