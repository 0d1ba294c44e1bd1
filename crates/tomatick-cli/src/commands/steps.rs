use tomatick_core::{display_time, Config};

use crate::logging;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    logging::init_stderr()?;
    let config = Config::load()?;
    let steps = config.seed_steps()?;

    if json {
        println!("{}", serde_json::to_string_pretty(steps.steps())?);
        return Ok(());
    }
    for step in steps.steps() {
        println!(
            "{:>3}  {:<16} {}",
            step.id,
            step.name(),
            display_time(step.duration_secs)
        );
    }
    println!("total {}", display_time(steps.total_secs()));
    Ok(())
}
