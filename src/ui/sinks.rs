//! Session event sinks for the terminal and for `--json`
//!
//! Sink callbacks cannot fail, so the first write error is kept and handed
//! back by `finish`.

use std::io::{self, Write};

use crate::ui::context::UiContext;
use crate::ui::json::events::Stamped;
use crate::ui::json::write_typed_event;
use crate::ui::live_region::LiveRegion;
use crate::ui::primitives::Icon;
use crate::ui::views::pipeline::{render_phase_line, render_pipeline};
use repolens::{Phase, PipelineEvent, PipelineState, SelectionEvent, SessionEventSink};

/// Progress is logged at these percentages when the output cannot redraw
const MILESTONES: [u8; 4] = [25, 50, 75, 100];

/// Human-readable output
#[derive(Debug)]
pub struct TerminalSink<W: Write> {
    out: W,
    ui: UiContext,
    region: LiveRegion,
    state: PipelineState,
    error: Option<io::Error>,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, ui: UiContext) -> Self {
        Self {
            out,
            ui,
            region: LiveRegion::new(),
            state: PipelineState {
                current_phase: Phase::first(),
                phase_progress: 0,
                is_running: false,
                is_complete: false,
            },
            error: None,
        }
    }

    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            self.error.get_or_insert(err);
        }
    }

    fn line(&mut self, text: String) {
        let result = writeln!(self.out, "{text}");
        self.record(result);
    }

    fn redraw(&mut self) {
        let bar_width = self.ui.caps.width.saturating_sub(10).clamp(10, 40);
        let block = render_pipeline(&self.state, bar_width, self.ui.color, self.ui.unicode);
        let result = self.region.update(&mut self.out, &block);
        self.record(result);
    }
}

impl<W: Write> SessionEventSink for TerminalSink<W> {
    fn on_toggle(&mut self, path: &str, expanded: bool) {
        let icon = if expanded {
            Icon::Expand
        } else {
            Icon::Collapse
        };
        let verb = if expanded { "expanded" } else { "collapsed" };
        let line = format!(
            "{} {verb} {path}",
            icon.colored(self.ui.color, self.ui.unicode)
        );
        self.line(line);
    }

    fn on_select(&mut self, path: &str) {
        let line = format!(
            "{} selected {path}",
            Icon::Pointer.colored(self.ui.color, self.ui.unicode)
        );
        self.line(line);
    }

    fn on_phase_change(&mut self, phase: Phase) {
        self.state.current_phase = phase;
        self.state.phase_progress = 0;
        self.state.is_running = true;

        if self.ui.live {
            self.redraw();
        } else {
            let line = format!(
                "{} {}: {}",
                Icon::Progress.colored(self.ui.color, self.ui.unicode),
                phase.label(),
                phase.description()
            );
            self.line(line);
        }
    }

    fn on_progress(&mut self, phase: Phase, percent: u8) {
        let previous = self.state.phase_progress;
        self.state.current_phase = phase;
        self.state.phase_progress = percent;

        if self.ui.live {
            self.redraw();
        } else if let Some(milestone) = MILESTONES
            .iter()
            .rev()
            .find(|m| previous < **m && percent >= **m)
        {
            let line = format!(
                "  {}",
                render_phase_line(phase, *milestone, self.ui.color, self.ui.unicode)
            );
            self.line(line);
        }
    }

    fn on_complete(&mut self) {
        self.state.is_running = false;
        self.state.is_complete = true;
        self.state.current_phase = Phase::Completed;
        self.state.phase_progress = 100;

        if self.ui.live {
            self.redraw();
            self.region.commit();
        }
        let line = format!(
            "{} Repository processed. Ready for questions.",
            Icon::Success.colored(self.ui.color, self.ui.unicode)
        );
        self.line(line);
    }
}

/// NDJSON output: one stamped line per event
#[derive(Debug)]
pub struct JsonSink<W: Write> {
    command: &'static str,
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> JsonSink<W> {
    pub fn new(command: &'static str, out: W) -> Self {
        Self {
            command,
            out,
            error: None,
        }
    }

    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn emit<T: serde::Serialize>(&mut self, data: T) {
        if self.error.is_some() {
            return;
        }
        let result = write_typed_event(&mut self.out, &Stamped::now(self.command, data));
        if let Err(err) = result {
            self.error = Some(err);
        }
    }
}

impl<W: Write> SessionEventSink for JsonSink<W> {
    fn on_toggle(&mut self, path: &str, expanded: bool) {
        self.emit(SelectionEvent::DirectoryToggled {
            path: path.to_string(),
            expanded,
        });
    }

    fn on_select(&mut self, path: &str) {
        self.emit(SelectionEvent::FileSelected {
            path: path.to_string(),
        });
    }

    fn on_phase_change(&mut self, phase: Phase) {
        self.emit(PipelineEvent::PhaseChanged { phase });
    }

    fn on_progress(&mut self, phase: Phase, percent: u8) {
        self.emit(PipelineEvent::Progress { phase, percent });
    }

    fn on_complete(&mut self) {
        self.emit(PipelineEvent::Completed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::terminal::TerminalCapabilities;

    fn plain_ui(live: bool) -> UiContext {
        UiContext {
            json: false,
            caps: TerminalCapabilities {
                is_tty: live,
                supports_color: false,
                supports_unicode: false,
                is_ci: false,
                width: 80,
                height: 24,
            },
            color: false,
            unicode: false,
            live,
        }
    }

    #[test]
    fn piped_output_logs_milestones_only() {
        let mut sink = TerminalSink::new(Vec::new(), plain_ui(false));
        sink.on_phase_change(Phase::Uploading);
        for percent in [10, 20, 30, 60, 99, 100] {
            sink.on_progress(Phase::Uploading, percent);
        }
        sink.on_complete();

        let out = String::from_utf8(sink.finish().unwrap()).unwrap();
        insta::assert_snapshot!(out, @r"
[..] Uploading: Transferring files to server
  [..] Uploading  25%
  [..] Uploading  50%
  [..] Uploading  75%
  [OK] Uploading 100%
[OK] Repository processed. Ready for questions.
");
    }

    #[test]
    fn large_jump_logs_highest_milestone_crossed() {
        let mut sink = TerminalSink::new(Vec::new(), plain_ui(false));
        sink.on_phase_change(Phase::Indexing);
        sink.on_progress(Phase::Indexing, 80);

        let out = String::from_utf8(sink.finish().unwrap()).unwrap();
        assert!(out.ends_with("  [..] Indexing   75%\n"));
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn selection_events_are_printed() {
        let mut sink = TerminalSink::new(Vec::new(), plain_ui(false));
        sink.on_toggle("src", false);
        sink.on_select("src/App.tsx");

        let out = String::from_utf8(sink.finish().unwrap()).unwrap();
        assert_eq!(out, "[>] collapsed src\n> selected src/App.tsx\n");
    }

    #[test]
    fn live_output_redraws_the_step_list() {
        let mut sink = TerminalSink::new(Vec::new(), plain_ui(true));
        sink.on_phase_change(Phase::Uploading);
        sink.on_progress(Phase::Uploading, 50);

        let out = String::from_utf8(sink.finish().unwrap()).unwrap();
        assert_eq!(out.matches("Transferring files to server").count(), 2);
        assert!(out.contains("\u{1b}["));
    }

    #[test]
    fn json_sink_writes_one_line_per_event() {
        let mut sink = JsonSink::new("process", Vec::new());
        sink.on_phase_change(Phase::Uploading);
        sink.on_progress(Phase::Uploading, 5);
        sink.on_select("a.rs");
        sink.on_complete();

        let out = String::from_utf8(sink.finish().unwrap()).unwrap();
        let events: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        let kinds: Vec<&str> = events.iter().map(|e| e["event"].as_str().unwrap()).collect();
        assert_eq!(kinds, vec!["phase_changed", "progress", "file_selected", "completed"]);
        assert!(events.iter().all(|e| e["command"] == "process"));
        assert!(events.iter().all(|e| e["timestamp"].is_string()));
    }
}
