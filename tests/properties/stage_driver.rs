//! Property tests for pipeline pacing.

use std::time::Duration;

use proptest::prelude::*;

use repolens::{Phase, PhaseDurations, PipelineEvent, PipelineTiming, StageDriver};

fn timing() -> impl Strategy<Value = PipelineTiming> {
    (
        0u64..200,
        0u64..200,
        0u64..200,
        0u64..50,
        0u64..50,
    )
        .prop_map(|(uploading, embedding, indexing, completed, settle)| PipelineTiming {
            durations: PhaseDurations {
                uploading: Duration::from_millis(uploading),
                embedding: Duration::from_millis(embedding),
                indexing: Duration::from_millis(indexing),
                completed: Duration::from_millis(completed),
            },
            settle: Duration::from_millis(settle),
        })
}

fn ticks() -> impl Strategy<Value = Vec<Duration>> {
    proptest::collection::vec((0u64..60).prop_map(Duration::from_millis), 1..200)
}

/// Phase changes and completion, without the progress in between
fn milestones(events: &[PipelineEvent]) -> Vec<PipelineEvent> {
    events
        .iter()
        .filter(|e| !matches!(e, PipelineEvent::Progress { .. }))
        .copied()
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: progress within a phase only rises and never passes 100;
    /// phases come in order; completion is reported at most once and is the
    /// last event.
    #[test]
    fn property_event_stream_is_well_formed(timing in timing(), ticks in ticks()) {
        let mut driver = StageDriver::new(timing);
        let mut events = driver.start().unwrap();
        for tick in &ticks {
            events.extend(driver.tick(*tick));
        }

        let mut phase: Option<Phase> = None;
        let mut progress = 0u8;
        let mut completed = 0;
        for (i, event) in events.iter().enumerate() {
            prop_assert_eq!(completed, 0, "event after completion at {}", i);
            match *event {
                PipelineEvent::PhaseChanged { phase: next } => {
                    let expected = match phase {
                        None => Some(Phase::first()),
                        Some(current) => {
                            prop_assert_eq!(progress, 100);
                            current.next()
                        }
                    };
                    prop_assert_eq!(Some(next), expected);
                    phase = Some(next);
                    progress = 0;
                }
                PipelineEvent::Progress { phase: at, percent } => {
                    prop_assert_eq!(Some(at), phase);
                    prop_assert!(percent > progress);
                    prop_assert!(percent <= 100);
                    progress = percent;
                }
                PipelineEvent::Completed => {
                    prop_assert_eq!(phase, Some(Phase::Completed));
                    prop_assert_eq!(progress, 100);
                    completed += 1;
                }
            }
        }

        prop_assert_eq!(driver.is_complete(), completed == 1);
        let state = driver.state();
        prop_assert!(state.phase_progress <= 100);
    }

    /// PROPERTY: one tick of `a + b` ends where ticks of `a` then `b` end.
    #[test]
    fn property_ticks_can_be_split(
        timing in timing(),
        prefix in ticks(),
        a in 0u64..400,
        b in 0u64..400,
    ) {
        let mut whole = StageDriver::new(timing);
        let mut split = StageDriver::new(timing);
        whole.start().unwrap();
        split.start().unwrap();
        for tick in &prefix {
            whole.tick(*tick);
            split.tick(*tick);
        }

        let combined = whole.tick(Duration::from_millis(a + b));
        let mut parts = split.tick(Duration::from_millis(a));
        parts.extend(split.tick(Duration::from_millis(b)));

        prop_assert_eq!(whole.state(), split.state());
        prop_assert_eq!(milestones(&combined), milestones(&parts));
    }

    /// PROPERTY: enough time always completes the run, exactly once.
    #[test]
    fn property_total_time_completes(timing in timing()) {
        let mut driver = StageDriver::new(timing);
        driver.start().unwrap();
        let total = timing.durations.total() + timing.settle * 4;

        let events = driver.tick(total);
        prop_assert!(driver.is_complete());
        prop_assert_eq!(
            events.iter().filter(|e| **e == PipelineEvent::Completed).count(),
            1
        );
        prop_assert!(driver.tick(total).is_empty());
    }

    /// PROPERTY: a cancelled run goes quiet until it is started again.
    #[test]
    fn property_cancel_silences_ticks(timing in timing(), ticks in ticks()) {
        let mut driver = StageDriver::new(timing);
        driver.start().unwrap();
        let (before, after) = ticks.split_at(ticks.len() / 2);
        for tick in before {
            driver.tick(*tick);
        }

        let was_running = driver.is_running();
        prop_assert_eq!(driver.cancel(), was_running);
        for tick in after {
            if was_running {
                prop_assert!(driver.tick(*tick).is_empty());
            } else {
                driver.tick(*tick);
            }
        }
        if was_running {
            prop_assert!(driver.is_idle());
            prop_assert!(driver.start().is_ok());
        }
    }
}
