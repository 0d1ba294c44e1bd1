//! Drag interaction state.
//!
//! Holds only ids. Anything a view draws (dimmed source row, insertion
//! marker) is derived from this state and the current step slice, so there
//! is never a retained marker to clean up.

use serde::{Deserialize, Serialize};

use crate::timer::{Step, StepId};

/// Region of a step row where a press landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOrigin {
    /// The grip. The only region that starts a drag.
    Handle,
    /// Duration controls, remove icon, row body.
    Other,
}

/// Which side of the hovered step the dragged one would land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Above,
    Below,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    pub target: StepId,
    pub placement: Placement,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    dragging: Option<StepId>,
    hover: Option<StepId>,
}

impl DragState {
    pub fn dragging(&self) -> Option<StepId> {
        self.dragging
    }

    pub fn hover(&self) -> Option<StepId> {
        self.hover
    }

    pub fn is_active(&self) -> bool {
        self.dragging.is_some()
    }

    pub fn is_dragging(&self, id: StepId) -> bool {
        self.dragging == Some(id)
    }

    /// Start dragging `id`. Ignored unless the press hit the handle.
    pub fn begin(&mut self, id: StepId, origin: DragOrigin) -> bool {
        if origin != DragOrigin::Handle {
            return false;
        }
        self.dragging = Some(id);
        self.hover = None;
        true
    }

    /// Hover a new target. Replaces the previous one, so at most one
    /// indicator exists.
    pub fn enter(&mut self, target: StepId) {
        if self.dragging.is_some() {
            self.hover = Some(target);
        }
    }

    pub fn leave(&mut self) {
        self.hover = None;
    }

    /// Clear everything. Safe to call at any time, including after an
    /// aborted gesture or when the referenced steps no longer exist.
    pub fn end(&mut self) {
        self.dragging = None;
        self.hover = None;
    }

    /// Drop any reference that no longer resolves against `steps`.
    pub fn retain_valid(&mut self, steps: &[Step]) {
        let exists = |id: Option<StepId>| id.map_or(false, |id| steps.iter().any(|s| s.id == id));
        if !exists(self.dragging) {
            self.end();
        } else if !exists(self.hover) {
            self.hover = None;
        }
    }

    /// The insertion marker to draw, if any.
    ///
    /// Above the target when the source sits below it, below the target
    /// when the source sits above it. Hovering the source shows nothing.
    pub fn indicator(&self, steps: &[Step]) -> Option<Indicator> {
        let position = |id: StepId| steps.iter().position(|s| s.id == id);
        let source = position(self.dragging?)?;
        let target_id = self.hover?;
        let target = position(target_id)?;
        let placement = match source.cmp(&target) {
            std::cmp::Ordering::Equal => return None,
            std::cmp::Ordering::Greater => Placement::Above,
            std::cmp::Ordering::Less => Placement::Below,
        };
        Some(Indicator {
            target: target_id,
            placement,
        })
    }
}
