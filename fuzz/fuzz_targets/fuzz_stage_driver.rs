#![no_main]

use std::time::Duration;

use libfuzzer_sys::fuzz_target;
use repolens::{PhaseDurations, PipelineEvent, PipelineTiming, StageDriver};

fuzz_target!(|data: &[u8]| {
    let Some((head, ticks)) = data.split_first_chunk::<5>() else {
        return;
    };
    let ms = |b: u8| Duration::from_millis(u64::from(b));
    let mut driver = StageDriver::new(PipelineTiming {
        durations: PhaseDurations {
            uploading: ms(head[0]),
            embedding: ms(head[1]),
            indexing: ms(head[2]),
            completed: ms(head[3]),
        },
        settle: ms(head[4]),
    });

    let _ = driver.start();
    let mut completions = 0;
    for &tick in ticks {
        match tick {
            0xff => {
                driver.cancel();
            }
            0xfe => {
                let _ = driver.start();
            }
            _ => {
                let events = driver.tick(ms(tick));
                completions += events
                    .iter()
                    .filter(|e| **e == PipelineEvent::Completed)
                    .count();
                assert!(driver.progress() <= 100);
            }
        }
        if completions > 0 && !driver.is_complete() {
            completions = 0;
        }
        assert!(completions <= 1);
    }
});
