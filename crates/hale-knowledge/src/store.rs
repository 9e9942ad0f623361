//! Keyword search and context rendering over the knowledge corpus.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::article::{KnowledgeArticle, KnowledgeStats, ScoredArticle};
use crate::dataset::{self, Dataset};

/// Score added per query word found in the title.
const TITLE_WORD_SCORE: i64 = 10;
/// Score added per query word found in the summary.
const SUMMARY_WORD_SCORE: i64 = 3;
/// Score added per query word found in the category name.
const CATEGORY_WORD_SCORE: i64 = 5;
/// Score added per key point containing a query word. Each key point is
/// checked independently and the bonus is cumulative.
const KEY_POINT_WORD_SCORE: i64 = 2;
/// Bonus when the full lowercased query appears verbatim in the title.
const EXACT_TITLE_SCORE: i64 = 20;
/// Query words this short carry no signal and are skipped.
const MIN_WORD_CHARS: usize = 3;
/// Key points rendered per article in a context block.
const CONTEXT_KEY_POINTS: usize = 3;

/// Read access to the static knowledge corpus.
///
/// The parsed dataset is shared process-wide: repeated opens of the same
/// path reuse one immutable snapshot; opening a different path replaces it.
pub struct KnowledgeStore {
    base: PathBuf,
    data: Arc<Dataset>,
    detail_cache: Mutex<HashMap<String, Arc<Vec<KnowledgeArticle>>>>,
}

impl KnowledgeStore {
    /// Open the store over the dataset directory at `base`.
    ///
    /// Never fails: a missing or unreadable dataset degrades to an empty
    /// corpus with a logged warning.
    pub fn open(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref().to_path_buf();
        let data = dataset::load_cached(&base);
        Self {
            base,
            data,
            detail_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Keyword search over the corpus.
    ///
    /// Scores each article against the lowercased query words, drops
    /// non-matches, and returns at most `max_results` articles ordered by
    /// descending score. The sort is stable, so equal scores keep dataset
    /// order.
    pub fn search(&self, query: &str, max_results: usize) -> Vec<ScoredArticle> {
        let query_lower = query.to_lowercase();
        let words: Vec<&str> = query_lower
            .split_whitespace()
            .filter(|w| w.chars().count() >= MIN_WORD_CHARS)
            .collect();

        let mut results: Vec<ScoredArticle> = self
            .data
            .articles
            .iter()
            .filter_map(|article| {
                let score = score_article(article, &query_lower, &words);
                (score > 0).then(|| ScoredArticle {
                    article: article.clone(),
                    score,
                })
            })
            .collect();

        results.sort_by(|a, b| b.score.cmp(&a.score));
        results.truncate(max_results);
        debug!(query, hits = results.len(), "knowledge search");
        results
    }

    /// Render the top search hits as a reference-material block for the
    /// system prompt.
    ///
    /// Returns the empty string exactly when the search finds nothing.
    pub fn build_context(&self, query: &str, max_articles: usize) -> String {
        let hits = self.search(query, max_articles);
        if hits.is_empty() {
            return String::new();
        }
        let blocks: Vec<String> = hits.iter().map(|hit| render_article(&hit.article)).collect();
        blocks.join("\n\n")
    }

    /// Condensed articles in `category`, in dataset order.
    pub fn articles_in_category(&self, category: &str, max_results: usize) -> Vec<KnowledgeArticle> {
        self.data
            .articles
            .iter()
            .filter(|a| a.category.eq_ignore_ascii_case(category))
            .take(max_results)
            .cloned()
            .collect()
    }

    /// Look up a single article by its id.
    pub fn article_by_id(&self, id: &str) -> Option<KnowledgeArticle> {
        self.data.articles.iter().find(|a| a.id == id).cloned()
    }

    /// Full articles for `category`, loaded from its detail file on demand
    /// and cached for the lifetime of this store.
    ///
    /// Falls back to the condensed subset when the category has no detail
    /// file or the file is unreadable.
    pub fn category_detail(&self, category: &str) -> Arc<Vec<KnowledgeArticle>> {
        if let Ok(cache) = self.detail_cache.lock() {
            if let Some(detail) = cache.get(category) {
                return Arc::clone(detail);
            }
        }

        let loaded = Arc::new(self.load_category_detail(category));
        if let Ok(mut cache) = self.detail_cache.lock() {
            cache.insert(category.to_string(), Arc::clone(&loaded));
        }
        loaded
    }

    /// Corpus statistics.
    pub fn stats(&self) -> KnowledgeStats {
        let mut categories: BTreeMap<String, usize> = BTreeMap::new();
        for article in &self.data.articles {
            *categories.entry(article.category.clone()).or_insert(0) += 1;
        }
        KnowledgeStats {
            total_articles: self.data.articles.len(),
            categories,
        }
    }

    fn load_category_detail(&self, category: &str) -> Vec<KnowledgeArticle> {
        let Some(entry) = self.data.categories.get(category) else {
            return self.articles_in_category(category, usize::MAX);
        };

        let path = self.base.join(&entry.file);
        match dataset::read_json::<Vec<KnowledgeArticle>>(&path) {
            Ok(articles) => articles,
            Err(e) => {
                warn!(
                    category,
                    error = %e,
                    "category detail file unavailable, using condensed articles"
                );
                self.articles_in_category(category, usize::MAX)
            }
        }
    }
}

fn score_article(article: &KnowledgeArticle, query_lower: &str, words: &[&str]) -> i64 {
    let title = article.title.to_lowercase();
    let summary = article.summary.to_lowercase();
    let category = article.category.to_lowercase();
    let key_points: Vec<String> = article
        .key_points
        .iter()
        .map(|p| p.to_lowercase())
        .collect();

    let mut score = 0;
    for word in words {
        if title.contains(word) {
            score += TITLE_WORD_SCORE;
        }
        if summary.contains(word) {
            score += SUMMARY_WORD_SCORE;
        }
        if category.contains(word) {
            score += CATEGORY_WORD_SCORE;
        }
        for point in &key_points {
            if point.contains(word) {
                score += KEY_POINT_WORD_SCORE;
            }
        }
    }

    if !query_lower.trim().is_empty() && title.contains(query_lower) {
        score += EXACT_TITLE_SCORE;
    }
    score
}

fn render_article(article: &KnowledgeArticle) -> String {
    let mut lines = vec![
        format!("### {}", article.title),
        format!("Source: {}", article.url),
        article.summary.clone(),
    ];
    if !article.key_points.is_empty() {
        lines.push("Key points:".to_string());
        for point in article.key_points.iter().take(CONTEXT_KEY_POINTS) {
            lines.push(format!("- {}", point));
        }
    }
    lines.join("\n")
}

// =============================================================================
// Tests
// =============================================================================
