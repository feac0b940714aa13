use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::LibraryRoot;
use crate::planner::AssignmentPlan;

/// Upper bound on rows kept for display after a preview
pub const MAX_PREVIEW_ROWS: usize = 50;

/// One displayed assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewRow {
    pub item_name: String,
    pub catalog_path: String,
}

/// What a preview found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSummary {
    pub library_root: LibraryRoot,
    /// Number of planned assignments
    pub total: usize,
    /// Number of distinct catalog paths in the plan
    pub catalog_count: usize,
    pub skipped_linked: usize,
    pub skipped_external: usize,
    /// The first [`MAX_PREVIEW_ROWS`] planned assignments
    pub rows: Vec<PreviewRow>,
}

impl PreviewSummary {
    pub fn from_plan(plan: &AssignmentPlan) -> Self {
        Self {
            library_root: plan.library_root.clone(),
            total: plan.items.len(),
            catalog_count: plan.catalog_counts().len(),
            skipped_linked: plan.skipped_linked,
            skipped_external: plan.skipped_external,
            rows: plan
                .items
                .iter()
                .take(MAX_PREVIEW_ROWS)
                .map(|item| PreviewRow {
                    item_name: item.item_name.clone(),
                    catalog_path: item.catalog_path.clone(),
                })
                .collect(),
        }
    }
}

/// Whether an apply may proceed, and against which plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewState {
    /// Set by a preview, cleared by a successful apply
    pub ready: bool,
    /// Fingerprint of the previewed plan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previewed_at: Option<DateTime<Utc>>,
    /// Kept after apply so the last preview can still be shown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_preview: Option<PreviewSummary>,
}

impl PreviewState {
    /// Record a fresh preview
    pub fn record(&mut self, signature: String, summary: PreviewSummary) {
        self.ready = true;
        self.signature = Some(signature);
        self.previewed_at = Some(Utc::now());
        self.last_preview = Some(summary);
    }

    /// Return to neutral after an apply
    pub fn reset(&mut self) {
        self.ready = false;
        self.signature = None;
    }

    /// Whether `signature` matches the previewed plan
    pub fn matches(&self, signature: &str) -> bool {
        self.signature.as_deref() == Some(signature)
    }
}
