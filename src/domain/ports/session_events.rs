//! Session Event Port
//!
//! The display layer implements [`SessionEventSink`] to hear about tree
//! activity and pipeline progress. Every callback has a no-op default so a
//! sink only overrides what it renders.

use crate::domain::pipeline::Phase;

/// Receiver for tree and pipeline events
pub trait SessionEventSink {
    /// A directory was expanded or collapsed
    fn on_toggle(&mut self, _path: &str, _expanded: bool) {}

    /// A file became the selected path
    fn on_select(&mut self, _path: &str) {}

    /// The selection was dropped; `path` is the file that was selected
    fn on_clear_selection(&mut self, _path: &str) {}

    /// A pipeline phase started
    fn on_phase_change(&mut self, _phase: Phase) {}

    /// Progress within the current phase rose
    fn on_progress(&mut self, _phase: Phase, _percent: u8) {}

    /// The pipeline finished its last phase
    fn on_complete(&mut self) {}
}

impl<S: SessionEventSink + ?Sized> SessionEventSink for &mut S {
    fn on_toggle(&mut self, path: &str, expanded: bool) {
        (**self).on_toggle(path, expanded);
    }

    fn on_select(&mut self, path: &str) {
        (**self).on_select(path);
    }

    fn on_clear_selection(&mut self, path: &str) {
        (**self).on_clear_selection(path);
    }

    fn on_phase_change(&mut self, phase: Phase) {
        (**self).on_phase_change(phase);
    }

    fn on_progress(&mut self, phase: Phase, percent: u8) {
        (**self).on_progress(phase, percent);
    }

    fn on_complete(&mut self) {
        (**self).on_complete();
    }
}

/// Sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl SessionEventSink for NoopEventSink {}
