use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::DashboardConfig;
use crate::pipeline::{self, WidgetResult};
use crate::widgets::{WidgetKind, WidgetOutput};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Lifecycle of one widget slot.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetState {
    Loading,
    Ready(WidgetOutput),
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// One slot per widget.
    pub widgets: BTreeMap<WidgetKind, WidgetState>,

    /// Results of the jobs started by the last `render_dashboard`.
    results: Option<Receiver<WidgetResult>>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            widgets: BTreeMap::new(),
            results: None,
            status_message: None,
        }
    }

    /// Start a fresh job for every widget. Results of earlier jobs that
    /// are still in flight are discarded.
    pub fn render_dashboard<F>(&mut self, notify: F)
    where
        F: Fn() + Clone + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        self.widgets = WidgetKind::ALL
            .into_iter()
            .map(|kind| (kind, WidgetState::Loading))
            .collect();
        pipeline::render_dashboard(&self.config, &tx, notify);
        self.results = Some(rx);
        self.status_message = None;
    }

    /// Move finished jobs into their slots. Returns how many arrived.
    pub fn poll_results(&mut self) -> usize {
        let Some(rx) = &self.results else {
            return 0;
        };
        let mut arrived = 0;
        while let Ok((kind, output)) = rx.try_recv() {
            self.widgets.insert(kind, WidgetState::Ready(output));
            arrived += 1;
        }
        arrived
    }

    pub fn widget(&self, kind: WidgetKind) -> Option<&WidgetOutput> {
        match self.widgets.get(&kind) {
            Some(WidgetState::Ready(output)) => Some(output),
            _ => None,
        }
    }

    pub fn pending(&self) -> usize {
        self.widgets
            .values()
            .filter(|w| matches!(w, WidgetState::Loading))
            .count()
    }

    /// Point the dashboard at another data folder and reload it.
    pub fn set_data_dir<F>(&mut self, dir: PathBuf, notify: F)
    where
        F: Fn() + Clone + Send + 'static,
    {
        log::info!("Switching data folder to {}", dir.display());
        self.config = self.config.with_data_dir(dir);
        self.render_dashboard(notify);
    }

    /// Write every finished widget as pretty JSON.
    pub fn export_summary(&self, path: &Path) -> Result<()> {
        let summary = DashboardSummary {
            data_dir: &self.config.data_dir,
            widgets: self
                .widgets
                .iter()
                .filter_map(|(kind, state)| match state {
                    WidgetState::Ready(output) => Some((*kind, output)),
                    WidgetState::Loading => None,
                })
                .collect(),
        };
        let json = serde_json::to_string_pretty(&summary).context("serializing summary")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported {} widgets to {}", summary.widgets.len(), path.display());
        Ok(())
    }
}

#[derive(Serialize)]
struct DashboardSummary<'a> {
    data_dir: &'a Path,
    widgets: BTreeMap<WidgetKind, &'a WidgetOutput>,
}
