pub mod display;
mod engine;
mod step;

pub use display::{display_time, AmbientColor};
pub use engine::{DefaultDurations, TimerEngine, TimerStatus};
pub use step::{default_seed, Step, StepId, StepKind, StepList, StepTemplate};

pub(crate) use step::splice_move;
