//! Dataset loading and the process-wide cache.
//!
//! The parsed dataset is loaded lazily on first use and cached keyed by its
//! directory path. Opening a different path atomically replaces the cached
//! entry; readers hold an `Arc` to an immutable snapshot, so a swap never
//! exposes a half-updated dataset.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::Deserialize;
use tracing::{debug, warn};

use hale_core::Result;

use crate::article::KnowledgeArticle;

/// Category index file inside the dataset directory.
const INDEX_FILE: &str = "index.json";
/// Flattened article list inside the dataset directory.
const CONDENSED_FILE: &str = "condensed.json";

/// One entry in the category index.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CategoryEntry {
    /// Number of articles in the category.
    pub count: usize,
    /// Detail file name, relative to the dataset directory.
    pub file: String,
}

#[derive(Debug, Default, Deserialize)]
struct CategoryIndex {
    #[serde(default)]
    categories: BTreeMap<String, CategoryEntry>,
}

/// Parsed, immutable dataset snapshot.
#[derive(Debug, Default)]
pub struct Dataset {
    /// Condensed articles in dataset order. Search results preserve this
    /// order on score ties.
    pub articles: Vec<KnowledgeArticle>,
    /// Category index, sorted by category name.
    pub categories: BTreeMap<String, CategoryEntry>,
}

impl Dataset {
    /// Read and parse the dataset under `base`.
    ///
    /// Missing or unreadable files degrade to an empty dataset with a logged
    /// warning; retrieval then finds no sources instead of failing the
    /// request.
    fn load(base: &Path) -> Self {
        let categories = match read_json::<CategoryIndex>(&base.join(INDEX_FILE)) {
            Ok(index) => index.categories,
            Err(e) => {
                warn!(
                    path = %base.join(INDEX_FILE).display(),
                    error = %e,
                    "knowledge category index unavailable, continuing without it"
                );
                BTreeMap::new()
            }
        };

        let articles = match read_json::<Vec<KnowledgeArticle>>(&base.join(CONDENSED_FILE)) {
            Ok(articles) => articles,
            Err(e) => {
                warn!(
                    path = %base.join(CONDENSED_FILE).display(),
                    error = %e,
                    "knowledge article list unavailable, continuing with an empty corpus"
                );
                Vec::new()
            }
        };

        debug!(
            articles = articles.len(),
            categories = categories.len(),
            "knowledge dataset loaded"
        );
        Self {
            articles,
            categories,
        }
    }
}

/// Read a whole JSON file into `T`.
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

struct CachedDataset {
    base: PathBuf,
    data: Arc<Dataset>,
}

static CACHE: RwLock<Option<CachedDataset>> = RwLock::new(None);

/// Return the dataset for `base`, loading and caching it on first use.
///
/// A concurrent first load may repeat the read; both loads produce
/// equivalent immutable snapshots and the last cache write wins.
pub(crate) fn load_cached(base: &Path) -> Arc<Dataset> {
    if let Ok(guard) = CACHE.read() {
        if let Some(cached) = guard.as_ref() {
            if cached.base == base {
                return Arc::clone(&cached.data);
            }
        }
    }

    let data = Arc::new(Dataset::load(base));
    if let Ok(mut guard) = CACHE.write() {
        *guard = Some(CachedDataset {
            base: base.to_path_buf(),
            data: Arc::clone(&data),
        });
    }
    data
}
