//! Step list editor.
//!
//! The editor keeps a working copy of the owner's step list for immediate
//! drag feedback. The owner stays authoritative: every mutation is reported
//! through [`StepListOwner`] and the working copy is re-synced from
//! `owner.steps()` afterwards.

mod drag;

pub use drag::{DragOrigin, DragState, Indicator, Placement};

use tracing::{debug, warn};

use crate::error::StepListError;
use crate::timer::{splice_move, Step, StepId, StepKind};

/// The component that holds the authoritative list.
pub trait StepListOwner {
    fn steps(&self) -> &[Step];
    fn on_add(&mut self, kind: StepKind) -> Result<(), StepListError>;
    fn on_remove(&mut self, id: StepId) -> Result<(), StepListError>;
    fn on_reorder(&mut self, new_order: &[Step]) -> Result<(), StepListError>;
    fn on_change_duration(&mut self, id: StepId, duration_secs: u64) -> Result<(), StepListError>;
}

/// What a drop did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Reordered,
    /// Dropped back onto the source.
    Unchanged,
    /// Source or target could not be resolved.
    Cancelled,
}

#[derive(Debug, Clone, Default)]
pub struct StepListEditor {
    steps: Vec<Step>,
    drag: DragState,
}

impl StepListEditor {
    pub fn new(steps: &[Step]) -> Self {
        Self {
            steps: steps.to_vec(),
            drag: DragState::default(),
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn indicator(&self) -> Option<Indicator> {
        self.drag.indicator(&self.steps)
    }

    /// Mirror the owner's list. A drag whose source vanished is dropped.
    pub fn sync(&mut self, steps: &[Step]) {
        if self.steps != steps {
            self.steps = steps.to_vec();
        }
        self.drag.retain_valid(&self.steps);
    }

    // ── Drag gesture ─────────────────────────────────────────────────

    pub fn begin_drag(&mut self, id: StepId, origin: DragOrigin) -> bool {
        if !self.steps.iter().any(|s| s.id == id) {
            return false;
        }
        let started = self.drag.begin(id, origin);
        if started {
            debug!(id, "drag started");
        }
        started
    }

    pub fn drag_enter(&mut self, target: StepId) {
        self.drag.enter(target);
    }

    pub fn drag_leave(&mut self) {
        self.drag.leave();
    }

    /// Finish the gesture on `target`.
    ///
    /// The drag state is always cleared, whatever the outcome.
    pub fn drop_on(
        &mut self,
        target: Option<StepId>,
        owner: &mut impl StepListOwner,
    ) -> Result<DropOutcome, StepListError> {
        let source = self.drag.dragging();
        self.end_drag();

        let position = |id: StepId| self.steps.iter().position(|s| s.id == id);
        let (from, to) = match (source.and_then(position), target.and_then(position)) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                warn!(?source, ?target, "drop cancelled: unresolved step");
                return Ok(DropOutcome::Cancelled);
            }
        };
        if from == to {
            return Ok(DropOutcome::Unchanged);
        }

        splice_move(&mut self.steps, from, to);
        let result = owner.on_reorder(&self.steps);
        self.sync(owner.steps());
        result.map(|()| DropOutcome::Reordered)
    }

    /// Abort or finish a gesture without dropping.
    pub fn end_drag(&mut self) {
        self.drag.end();
    }

    // ── List operations ──────────────────────────────────────────────

    pub fn add(&mut self, kind: StepKind, owner: &mut impl StepListOwner) -> Result<(), StepListError> {
        let result = owner.on_add(kind);
        self.sync(owner.steps());
        result
    }

    /// Remove a step.
    ///
    /// # Errors
    ///
    /// `UnknownStep` when the id is not in the working copy, `LastStep` when
    /// the working copy holds a single step; the latter's message is meant
    /// to be shown to the user. The owner is not called in either case.
    pub fn remove(&mut self, id: StepId, owner: &mut impl StepListOwner) -> Result<(), StepListError> {
        if !self.steps.iter().any(|s| s.id == id) {
            return Err(StepListError::UnknownStep(id));
        }
        if self.steps.len() <= 1 {
            warn!(id, "remove rejected: last remaining step");
            return Err(StepListError::LastStep);
        }
        let result = owner.on_remove(id);
        self.sync(owner.steps());
        result
    }

    pub fn reorder(
        &mut self,
        new_order: Vec<Step>,
        owner: &mut impl StepListOwner,
    ) -> Result<(), StepListError> {
        self.steps = new_order;
        let result = owner.on_reorder(&self.steps);
        self.sync(owner.steps());
        result
    }

    pub fn change_duration(
        &mut self,
        id: StepId,
        duration_secs: u64,
        owner: &mut impl StepListOwner,
    ) -> Result<(), StepListError> {
        let result = owner.on_change_duration(id, duration_secs);
        self.sync(owner.steps());
        result
    }
}
