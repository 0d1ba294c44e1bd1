//! # Tomatick Core Library
//!
//! Core logic for the Tomatick step timer: an ordered list of work and
//! break steps, a countdown state machine that consumes them, and the
//! drag-and-drop editor that reorders them. The library performs no I/O
//! beyond reading configuration; front ends drive it with `tick()` and
//! render whatever it derives.
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: countdown state machine and authoritative step list
//! - [`StepListEditor`]: working copy plus drag interaction state
//! - [`PresentationSink`]: seam for status text and ambient color
//! - [`Config`]: application configuration management

pub mod editor;
pub mod error;
pub mod events;
pub mod presentation;
pub mod shortcuts;
pub mod storage;
pub mod timer;

pub use editor::{DragOrigin, DropOutcome, Indicator, Placement, StepListEditor, StepListOwner};
pub use error::{ConfigError, CoreError, StepListError, ValidationError};
pub use events::Event;
pub use presentation::{present, PresentationSink, RecordingSink};
pub use shortcuts::{command_for, Key, TimerCommand};
pub use storage::Config;
pub use timer::{
    display_time, AmbientColor, DefaultDurations, Step, StepId, StepKind, StepList, TimerEngine,
    TimerStatus,
};
