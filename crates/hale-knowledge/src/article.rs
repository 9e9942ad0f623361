//! Article records parsed from the knowledge dataset.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A static reference document used as a retrieval and citation source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeArticle {
    pub id: String,
    pub category: String,
    pub title: String,
    pub url: String,
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    /// Full article body. Present only in per-category detail files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// An article paired with its query-time relevance score.
///
/// The score is ephemeral: it exists only on search results and is never
/// written back to the dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredArticle {
    pub article: KnowledgeArticle,
    pub score: i64,
}

/// Corpus statistics: total article count plus per-category counts.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct KnowledgeStats {
    pub total_articles: usize,
    pub categories: BTreeMap<String, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_deserialize_minimal() {
        let json = r#"{
            "id": "sleep-tips",
            "category": "sleep",
            "title": "Sleep Tips",
            "url": "https://example.com/sleep-tips",
            "summary": "Practical ways to fall asleep faster."
        }"#;
        let article: KnowledgeArticle = serde_json::from_str(json).unwrap();
        assert_eq!(article.id, "sleep-tips");
        assert!(article.key_points.is_empty());
        assert!(article.content.is_none());
    }

    #[test]
    fn test_article_serialize_omits_missing_content() {
        let article = KnowledgeArticle {
            id: "a".to_string(),
            category: "energy".to_string(),
            title: "Energy".to_string(),
            url: "https://example.com/a".to_string(),
            summary: "s".to_string(),
            key_points: vec![],
            content: None,
        };
        let json = serde_json::to_string(&article).unwrap();
        assert!(!json.contains("content"));
    }

    #[test]
    fn test_stats_default() {
        let stats = KnowledgeStats::default();
        assert_eq!(stats.total_articles, 0);
        assert!(stats.categories.is_empty());
    }
}
