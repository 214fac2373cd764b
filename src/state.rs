use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::chart::{render, ChartArtifact};
use crate::config::DashboardConfig;
use crate::data::cache::DatasetCache;
use crate::data::dashboard::{compute, DashboardView};
use crate::data::filter::HostSiteSelection;
use crate::data::loader::LoadError;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    cache: DatasetCache,

    /// File the current dataset came from.
    pub source: Option<PathBuf>,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<Dataset>>,

    /// Host Sites ticked in the sidebar.
    pub selection: HostSiteSelection,

    /// Metric and aggregates for the current selection (cached).
    pub view: Option<DashboardView>,

    /// One chart per aggregate, same order as `view.tables`.
    pub charts: Vec<ChartArtifact>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether the filtered records table is shown under the charts.
    pub show_records: bool,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            cache: DatasetCache::new(config.cache_capacity),
            config,
            source: None,
            dataset: None,
            selection: HostSiteSelection::default(),
            view: None,
            charts: Vec::new(),
            status_message: None,
            show_records: false,
        }
    }

    /// Load `path` through the cache and make it the current dataset.
    pub fn load(&mut self, path: &Path) -> Result<(), LoadError> {
        let dataset = self.cache.get_or_load(path)?;
        self.set_dataset(path.to_path_buf(), dataset);
        Ok(())
    }

    /// Load the configured source.
    pub fn load_configured(&mut self) -> Result<(), LoadError> {
        let path = self.config.source_path.clone();
        self.load(&path)
    }

    /// Re-read the current source. An unchanged file is served from the
    /// cache; `force` drops the cached copy first.
    pub fn reload(&mut self, force: bool) {
        let Some(path) = self.source.clone() else {
            return;
        };
        if force {
            self.cache.invalidate(&path);
        }
        self.load_reporting(&path);
    }

    /// Like [`AppState::load`], but failures become a status message and the
    /// current dataset stays on screen.
    pub fn load_reporting(&mut self, path: &Path) {
        match self.load(path) {
            Ok(()) => self.status_message = None,
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a dataset; the selection resets unless it is the same data.
    pub fn set_dataset(&mut self, source: PathBuf, dataset: Arc<Dataset>) {
        let same = self
            .dataset
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &dataset));
        if !same {
            if dataset.is_empty() {
                log::warn!("{} has no rows with a known Host Site", source.display());
            }
            self.selection = HostSiteSelection::all(&dataset);
        }

        self.source = Some(source);
        self.dataset = Some(dataset);
        self.refresh();
    }

    /// Recompute the metric, aggregates and charts after a selection change.
    pub fn refresh(&mut self) {
        let Some(ds) = &self.dataset else {
            self.view = None;
            self.charts.clear();
            return;
        };
        let view = compute(ds, &self.selection);
        self.charts = view.tables.iter().map(render).collect();
        log::debug!(
            "{} of {} respondents selected",
            view.record_count,
            ds.len()
        );
        for table in view.tables.iter().filter(|t| !t.is_empty()) {
            log::trace!(
                "{}: {} answers in {} categories",
                table.dimension,
                table.total(),
                table.rows.len()
            );
        }
        self.view = Some(view);
    }

    /// Number of respondents passing the filter.
    pub fn record_count(&self) -> usize {
        self.view.as_ref().map_or(0, |v| v.record_count)
    }

    /// Toggle a single Host Site in the selection.
    pub fn toggle_host_site(&mut self, host_site: &str) {
        self.selection.toggle(host_site);
        self.refresh();
    }

    /// Select every Host Site.
    pub fn select_all(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection = HostSiteSelection::all(ds);
            self.refresh();
        }
    }

    /// Deselect every Host Site.
    pub fn select_none(&mut self) {
        self.selection = HostSiteSelection::none();
        self.refresh();
    }
}
