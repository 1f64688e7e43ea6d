// crates/isbmap-core/src/store.rs

//! # Facility Store
//!
//! In-memory mapping from category to facility list, populated once from
//! the static dataset files and read-only afterwards.
//!
//! Each category loads independently: a transport or parse failure marks
//! that one category failed and leaves its list empty, while the others
//! proceed. Only a total failure (zero categories loaded) is fatal, and
//! that decision is left to the caller.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{info, warn};

use crate::error::{Result, StoreError};
use crate::model::{Category, Facility, FeatureCollectionRaw};

/// Load outcome of a single category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Pending,
    Loaded,
    Failed,
}

/// Fan-in summary of [`FacilityStore::load_all_from_dir`].
///
/// Partial success is a valid outcome; the report is only produced after
/// every category has settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub failed: usize,
}

impl LoadReport {
    pub fn total(&self) -> usize {
        self.loaded + self.failed
    }

    /// Zero categories loaded: the one fatal condition.
    pub fn is_total_failure(&self) -> bool {
        self.loaded == 0
    }

    pub fn is_partial(&self) -> bool {
        self.failed > 0 && self.loaded > 0
    }
}

/// Per-category counts for the stats dashboard.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct StoreStats {
    pub total: usize,
    pub per_category: Vec<(Category, usize)>,
}

/// In-memory facility database. See the module docs for the load policy.
#[derive(Debug, Default)]
pub struct FacilityStore {
    lists: [Vec<Facility>; 7],
    states: [LoadState; 7],
}

impl FacilityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and ingest one category document from JSON text.
    ///
    /// On any failure the category is marked [`LoadState::Failed`], its
    /// list stays empty and the error is returned for reporting; other
    /// categories are unaffected. Records with unusable geometry or a
    /// duplicate id are skipped individually.
    pub fn load_category_json(&mut self, category: Category, json: &str) -> Result<usize> {
        match Self::parse_document(category, json) {
            Ok(features) => {
                let count = self.ingest(category, features);
                self.states[category.index()] = LoadState::Loaded;
                info!("loaded {count} {category}");
                Ok(count)
            }
            Err(err) => {
                self.lists[category.index()].clear();
                self.states[category.index()] = LoadState::Failed;
                warn!("failed to load {category}: {err}");
                Err(err)
            }
        }
    }

    /// Load one category from `<base>/<category>.json`.
    pub fn load_category_from_path(&mut self, category: Category, base: &Path) -> Result<usize> {
        let path = base.join(category.dataset_filename());
        let json = match Self::read_to_string(&path) {
            Ok(json) => json,
            Err(err) => {
                self.states[category.index()] = LoadState::Failed;
                warn!("failed to load {category}: {err}");
                return Err(err);
            }
        };
        self.load_category_json(category, &json)
    }

    /// Load every category from a directory of dataset files.
    ///
    /// Every category is attempted regardless of earlier failures; the
    /// report is produced only after all of them have settled.
    pub fn load_all_from_dir(&mut self, base: &Path) -> LoadReport {
        let mut loaded = 0;
        let mut failed = 0;

        for category in Category::ALL {
            match self.load_category_from_path(category, base) {
                Ok(_) => loaded += 1,
                Err(_) => failed += 1,
            }
        }

        let report = LoadReport { loaded, failed };
        if report.is_total_failure() {
            warn!("no facility data loaded from {}", base.display());
        } else if report.is_partial() {
            warn!(
                "partial load: {}/{} categories loaded",
                report.loaded,
                report.total()
            );
        } else {
            info!("loaded all {} categories, {} facilities", report.loaded, self.total_count());
        }
        report
    }

    fn read_to_string(path: &Path) -> Result<String> {
        let mut file = File::open(path)
            .map_err(|e| StoreError::NotFound(format!("{}: {e}", path.display())))?;
        let mut json = String::new();
        file.read_to_string(&mut json)?;
        Ok(json)
    }

    fn parse_document(category: Category, json: &str) -> Result<Vec<crate::model::FeatureRaw>> {
        let doc: FeatureCollectionRaw = serde_json::from_str(json)?;
        doc.features.ok_or(StoreError::InvalidDocument {
            category: category.key(),
            reason: "missing features array",
        })
    }

    fn ingest(&mut self, category: Category, features: Vec<crate::model::FeatureRaw>) -> usize {
        let mut seen: HashSet<&str> = HashSet::new();
        for (i, list) in self.lists.iter().enumerate() {
            // A reload replaces the category's own list wholesale.
            if i != category.index() {
                seen.extend(list.iter().map(|f| f.id.as_str()));
            }
        }
        // Ids must be unique across the whole store, not just per category.
        let mut accepted: Vec<Facility> = Vec::with_capacity(features.len());
        for raw in features {
            let Some(facility) = Facility::from_raw(category, raw) else {
                continue;
            };
            if seen.contains(facility.id.as_str()) || accepted.iter().any(|f| f.id == facility.id) {
                warn!("skipping duplicate facility id {}", facility.id);
                continue;
            }
            accepted.push(facility);
        }

        let count = accepted.len();
        self.lists[category.index()] = accepted;
        count
    }

    /// Load outcome for one category.
    pub fn load_state(&self, category: Category) -> LoadState {
        self.states[category.index()]
    }

    /// All records of one category. Empty when the category failed to load.
    pub fn by_category(&self, category: Category) -> &[Facility] {
        &self.lists[category.index()]
    }

    /// All records, or all records of one category.
    pub fn facilities(&self, category: Option<Category>) -> Vec<&Facility> {
        match category {
            Some(cat) => self.by_category(cat).iter().collect(),
            None => self.lists.iter().flatten().collect(),
        }
    }

    /// Total or per-category record count.
    pub fn count(&self, category: Option<Category>) -> usize {
        match category {
            Some(cat) => self.by_category(cat).len(),
            None => self.total_count(),
        }
    }

    pub fn total_count(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    /// Find one record by its unique id.
    pub fn find_by_id(&self, id: &str) -> Option<&Facility> {
        // The prefix narrows the scan to one category when it is well formed.
        if let Some(category) = Category::from_id(id) {
            return self.by_category(category).iter().find(|f| f.id == id);
        }
        self.lists.iter().flatten().find(|f| f.id == id)
    }

    /// Aggregate counts for the stats dashboard.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            total: self.total_count(),
            per_category: Category::ALL
                .into_iter()
                .map(|c| (c, self.by_category(c).len()))
                .collect(),
        }
    }
}
