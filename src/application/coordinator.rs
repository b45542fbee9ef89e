//! SelectionCoordinator
//!
//! Routes [`SelectionEvent`]s and [`PipelineEvent`]s to a
//! [`SessionEventSink`]. It keeps no state besides the sink and never
//! rewrites an event; the two state machines stay unaware of the display.

use std::time::Duration;

use crate::domain::pipeline::{PipelineError, PipelineEvent, StageDriver};
use crate::domain::ports::SessionEventSink;
use crate::domain::tree::{SelectionEvent, TreeModel};

/// Forwards state machine events to the display layer
#[derive(Debug)]
pub struct SelectionCoordinator<S> {
    sink: S,
}

impl<S: SessionEventSink> SelectionCoordinator<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Hand one tree event to the sink
    pub fn forward_selection(&mut self, event: &SelectionEvent) {
        match event {
            SelectionEvent::FileSelected { path } => self.sink.on_select(path),
            SelectionEvent::DirectoryToggled { path, expanded } => {
                self.sink.on_toggle(path, *expanded)
            }
        }
    }

    /// Hand one pipeline event to the sink
    pub fn forward_pipeline(&mut self, event: &PipelineEvent) {
        match *event {
            PipelineEvent::PhaseChanged { phase } => self.sink.on_phase_change(phase),
            PipelineEvent::Progress { phase, percent } => self.sink.on_progress(phase, percent),
            PipelineEvent::Completed => self.sink.on_complete(),
        }
    }

    pub fn forward_pipeline_all<'e>(&mut self, events: impl IntoIterator<Item = &'e PipelineEvent>) {
        for event in events {
            self.forward_pipeline(event);
        }
    }

    /// Activate `path` on the tree and forward whatever it produced
    pub fn activate(&mut self, tree: &mut TreeModel, path: &str) -> Option<SelectionEvent> {
        let event = tree.select(path)?;
        self.forward_selection(&event);
        Some(event)
    }

    /// Toggle `path` on the tree and forward the result
    pub fn toggle(&mut self, tree: &mut TreeModel, path: &str) -> Option<bool> {
        let expanded = tree.toggle(path)?;
        self.sink.on_toggle(path, expanded);
        Some(expanded)
    }

    /// Expand every collapsed directory, one forwarded toggle each.
    /// Returns how many were toggled.
    pub fn expand_all(&mut self, tree: &mut TreeModel) -> usize {
        self.toggle_where_expanded(tree, false)
    }

    /// Collapse every expanded directory, one forwarded toggle each
    pub fn collapse_all(&mut self, tree: &mut TreeModel) -> usize {
        self.toggle_where_expanded(tree, true)
    }

    fn toggle_where_expanded(&mut self, tree: &mut TreeModel, expanded: bool) -> usize {
        let paths: Vec<String> = tree
            .iter()
            .filter(|n| n.is_directory() && n.expanded == expanded)
            .map(|n| n.path.to_string())
            .collect();
        for path in &paths {
            self.toggle(tree, path);
        }
        paths.len()
    }

    /// Drop the selection and tell the sink which file it was
    pub fn clear_selection(&mut self, tree: &mut TreeModel) -> Option<String> {
        let previous = tree.clear_selection()?;
        self.sink.on_clear_selection(&previous);
        Some(previous)
    }

    /// Start the driver and forward the opening phase change
    pub fn start(&mut self, driver: &mut StageDriver) -> Result<(), PipelineError> {
        let events = driver.start()?;
        self.forward_pipeline_all(&events);
        Ok(())
    }

    /// Tick the driver and forward what the tick produced
    pub fn tick(&mut self, driver: &mut StageDriver, elapsed: Duration) -> Vec<PipelineEvent> {
        let events = driver.tick(elapsed);
        self.forward_pipeline_all(&events);
        events
    }
}
