//! Pipeline step list

use crossterm::style::Stylize;

use crate::ui::primitives::Icon;
use crate::ui::widgets::progress::ProgressBar;
use repolens::{Phase, PipelineState, StepStatus};

/// Width of the phase label column
const LABEL_WIDTH: usize = 9;

/// Render every phase with its status; the current phase gets a bar.
///
/// Before a run starts every phase is pending.
pub fn render_pipeline(
    state: &PipelineState,
    bar_width: u16,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let started = state.is_running || state.is_complete;
    let mut lines = Vec::with_capacity(Phase::ALL.len() + 1);

    for phase in Phase::ALL {
        let status = if started {
            StepStatus::of(phase, state.current_phase, state.is_complete)
        } else {
            StepStatus::Pending
        };

        let icon = match status {
            StepStatus::Done => Icon::Success,
            StepStatus::Current => Icon::Progress,
            StepStatus::Pending => Icon::Pending,
        };
        let label = format!("{:<width$}", phase.label(), width = LABEL_WIDTH);
        let label = if supports_color && status == StepStatus::Current {
            format!("{}", label.bold())
        } else {
            label
        };

        lines.push(format!(
            "{} {}  {}",
            icon.colored(supports_color, supports_unicode),
            label,
            phase.description()
        ));

        if status == StepStatus::Current {
            let mut bar = ProgressBar::new(state.phase_progress);
            bar.set_width(bar_width);
            lines.push(format!("  {}", bar.render(supports_unicode)));
        }
    }

    lines.join("\n")
}

/// Single status line for logs and non-interactive output
pub fn render_phase_line(
    phase: Phase,
    percent: u8,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let icon = if percent >= 100 {
        Icon::Success
    } else {
        Icon::Progress
    };
    format!(
        "{} {:<width$} {:>3}%",
        icon.colored(supports_color, supports_unicode),
        phase.label(),
        percent,
        width = LABEL_WIDTH
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(phase: Phase, progress: u8, running: bool, complete: bool) -> PipelineState {
        PipelineState {
            current_phase: phase,
            phase_progress: progress,
            is_running: running,
            is_complete: complete,
        }
    }

    #[test]
    fn mid_run_snapshot() {
        let rendered = render_pipeline(&state(Phase::Embedding, 40, true, false), 10, false, false);
        insta::assert_snapshot!(rendered, @r"
[OK] Uploading  Transferring files to server
[..] Embedding  Generating code embeddings
  ====------  40%
[ ] Indexing   Building search index
[ ] Completed  Ready for questions
");
    }

    #[test]
    fn idle_shows_everything_pending() {
        let rendered = render_pipeline(&state(Phase::Uploading, 0, false, false), 10, false, true);
        assert_eq!(rendered.matches('○').count(), 4);
        assert!(!rendered.contains('━'));
    }

    #[test]
    fn complete_marks_every_phase_done_without_bar() {
        let rendered = render_pipeline(&state(Phase::Completed, 100, false, true), 10, false, true);
        assert_eq!(rendered.matches('✓').count(), 4);
        assert_eq!(rendered.lines().count(), 4);
    }

    #[test]
    fn phase_line_switches_icon_at_hundred() {
        assert_eq!(render_phase_line(Phase::Indexing, 50, false, false), "[..] Indexing   50%");
        assert_eq!(render_phase_line(Phase::Indexing, 100, false, false), "[OK] Indexing  100%");
    }
}
