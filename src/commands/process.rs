use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use repolens::infrastructure::{format_size, RealTimeSource};
use repolens::{
    inspect_archive, run_pipeline, Config, RunOutcome, SelectionCoordinator, SessionEventSink,
    StageDriver,
};

use super::EXIT_INTERRUPTED;
use crate::ui::context::UiContext;
use crate::ui::json::emit_event;
use crate::ui::json::events::{ArchiveEvent, CompleteEvent, Stamped, StartEvent};
use crate::ui::primitives::Icon;
use crate::ui::sinks::{JsonSink, TerminalSink};

const COMMAND: &str = "process";

pub fn cmd_process(archive: &Path, config: &Config, ui: &UiContext) -> Result<ExitCode> {
    config.validate()?;
    let info = inspect_archive(archive, &config.upload)?;

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to install Ctrl+C handler")?;

    let mut driver = StageDriver::new(config.pipeline.timing());

    let outcome = if ui.json {
        emit_event(&Stamped::now(COMMAND, StartEvent::new()))?;
        emit_event(&Stamped::now(COMMAND, ArchiveEvent::new(&info)))?;

        let sink = JsonSink::new(COMMAND, io::stdout());
        let (outcome, sink) = drive(&mut driver, sink, config, &running)?;
        sink.finish()?;

        emit_event(&Stamped::now(
            COMMAND,
            CompleteEvent::new(outcome.is_completed(), outcome),
        ))?;
        outcome
    } else {
        println!(
            "{} Repolens Upload",
            Icon::Upload.colored(ui.color, ui.unicode)
        );
        println!(
            "Archive: {} ({})",
            info.path.display(),
            format_size(info.size)
        );
        println!("Upload id: {}\n", info.digest);

        let sink = TerminalSink::new(io::stdout(), *ui);
        let (outcome, sink) = drive(&mut driver, sink, config, &running)?;
        sink.finish()?;

        if let RunOutcome::Cancelled {
            phase, progress, ..
        } = outcome
        {
            println!(
                "\n{} Cancelled during {} at {}%",
                Icon::Warning.colored(ui.color, ui.unicode),
                phase,
                progress
            );
        }
        outcome
    };

    Ok(match outcome {
        RunOutcome::Completed { .. } => ExitCode::SUCCESS,
        RunOutcome::Cancelled { .. } => ExitCode::from(EXIT_INTERRUPTED),
    })
}

fn drive<S: SessionEventSink>(
    driver: &mut StageDriver,
    sink: S,
    config: &Config,
    running: &AtomicBool,
) -> Result<(RunOutcome, S)> {
    let mut coordinator = SelectionCoordinator::new(sink);
    let outcome = run_pipeline(
        driver,
        &mut coordinator,
        &RealTimeSource,
        config.pipeline.tick(),
        running,
    )?;
    Ok((outcome, coordinator.into_sink()))
}
