use tomatick_core::{present, AmbientColor, Config, Event, RecordingSink};
use tracing::info;

use crate::logging;

/// Upper bound on ticks, in case a custom seed is enormous.
const MAX_TICKS: u64 = 7 * 24 * 60 * 60;

pub fn run(skip: usize, ticks: bool) -> Result<(), Box<dyn std::error::Error>> {
    logging::init_stderr()?;
    let config = Config::load()?;
    let mut engine = config.engine()?;
    let mut sink = RecordingSink::default();

    let emit = |event: Event| -> Result<(), serde_json::Error> {
        if ticks || !matches!(event, Event::TimerTicked { .. }) {
            println!("{}", serde_json::to_string(&event)?);
        }
        Ok(())
    };

    for _ in 0..skip {
        match engine.skip() {
            Some(event) => emit(event)?,
            None => break,
        }
    }
    if let Some(event) = engine.start() {
        emit(event)?;
    }

    let mut elapsed = 0u64;
    while elapsed < MAX_TICKS {
        let Some(event) = engine.tick() else {
            break;
        };
        elapsed += 1;
        present(&engine, &mut sink);
        emit(event)?;
    }
    info!(elapsed, "simulation finished");

    println!("{}", serde_json::to_string(&engine.snapshot())?);
    let summary = serde_json::json!({
        "type": "Summary",
        "elapsed_secs": elapsed,
        "labels_shown": sink.status_texts.len(),
        "last_status": sink.last_status_text(),
        "last_color": sink.last_color().map(AmbientColor::hex),
    });
    println!("{summary}");
    Ok(())
}
