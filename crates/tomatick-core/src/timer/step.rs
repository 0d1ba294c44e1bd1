use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{StepListError, ValidationError};

/// Stable step identity. Never derived from position.
pub type StepId = u64;

/// What a step is for. Serialized as its display name so config files can
/// say `kind = "short break"` or any free-form label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StepKind {
    Work,
    ShortBreak,
    LongBreak,
    Custom(String),
}

impl StepKind {
    pub fn name(&self) -> &str {
        match self {
            StepKind::Work => "work",
            StepKind::ShortBreak => "short break",
            StepKind::LongBreak => "long break",
            StepKind::Custom(label) => label,
        }
    }
}

impl From<String> for StepKind {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "work" => StepKind::Work,
            "short break" | "short_break" => StepKind::ShortBreak,
            "long break" | "long_break" => StepKind::LongBreak,
            _ => StepKind::Custom(value),
        }
    }
}

impl From<StepKind> for String {
    fn from(kind: StepKind) -> Self {
        match kind {
            StepKind::Custom(label) => label,
            other => other.name().to_string(),
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    pub kind: StepKind,
    /// Duration in seconds. Always positive.
    pub duration_secs: u64,
}

impl Step {
    pub fn new(id: StepId, kind: StepKind, duration_secs: u64) -> Self {
        Self {
            id,
            kind,
            duration_secs,
        }
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }
}

/// A step definition without identity, as written in config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTemplate {
    pub kind: StepKind,
    pub duration_secs: u64,
}

/// Ordered sequence of steps. Order is the play sequence; the front step
/// is the one being timed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepList {
    steps: Vec<Step>,
    /// Next id to hand out. Ids are never reused within a list's lifetime.
    next_id: StepId,
}

impl StepList {
    /// The default eight-step sequence.
    pub fn seed() -> Self {
        let steps: Vec<Step> = default_seed()
            .into_iter()
            .zip(1..)
            .map(|(t, id)| Step::new(id, t.kind, t.duration_secs))
            .collect();
        let next_id = steps.len() as StepId + 1;
        Self { steps, next_id }
    }

    /// Build a list from id-less templates, numbering them from 1.
    pub fn from_templates(templates: &[StepTemplate]) -> Result<Self, ValidationError> {
        let steps = templates
            .iter()
            .zip(1..)
            .map(|(t, id)| Step::new(id, t.kind.clone(), t.duration_secs))
            .collect();
        Self::from_steps(steps)
    }

    /// Build a list from existing steps.
    ///
    /// # Errors
    ///
    /// Rejects an empty list, zero durations and duplicate ids.
    pub fn from_steps(steps: Vec<Step>) -> Result<Self, ValidationError> {
        if steps.is_empty() {
            return Err(ValidationError::EmptyCollection("steps".into()));
        }
        if let Some(step) = steps.iter().find(|s| s.duration_secs == 0) {
            return Err(ValidationError::InvalidValue {
                field: "duration_secs".into(),
                message: format!("step {} has zero duration", step.id),
            });
        }
        let mut ids: Vec<StepId> = steps.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.len() != steps.len() {
            return Err(ValidationError::InvalidValue {
                field: "id".into(),
                message: "step ids must be unique".into(),
            });
        }
        let next_id = ids.last().copied().unwrap_or(0) + 1;
        Ok(Self { steps, next_id })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn front(&self) -> Option<&Step> {
        self.steps.first()
    }

    pub fn get(&self, id: StepId) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn position(&self, id: StepId) -> Option<usize> {
        self.steps.iter().position(|s| s.id == id)
    }

    pub fn ids(&self) -> Vec<StepId> {
        self.steps.iter().map(|s| s.id).collect()
    }

    pub fn total_secs(&self) -> u64 {
        self.steps.iter().map(|s| s.duration_secs).sum()
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Append a new step and return its id.
    pub fn add(&mut self, kind: StepKind, duration_secs: u64) -> Result<StepId, StepListError> {
        if duration_secs == 0 {
            return Err(StepListError::ZeroDuration);
        }
        let id = self.next_id;
        self.next_id += 1;
        info!(id, kind = %kind, duration_secs, "step added");
        self.steps.push(Step::new(id, kind, duration_secs));
        Ok(id)
    }

    /// Remove a step by id.
    ///
    /// # Errors
    ///
    /// `LastStep` when the list holds a single step (list unchanged),
    /// `UnknownStep` when the id is absent.
    pub fn remove(&mut self, id: StepId) -> Result<Step, StepListError> {
        let index = self.position(id).ok_or(StepListError::UnknownStep(id))?;
        if self.steps.len() <= 1 {
            warn!(id, "refusing to remove the last remaining step");
            return Err(StepListError::LastStep);
        }
        info!(id, "step removed");
        Ok(self.steps.remove(index))
    }

    /// Adopt a full new ordering supplied by the editor.
    ///
    /// The ordering must be a permutation of the current ids. Step contents
    /// are taken from this list, only the order is adopted.
    pub fn reorder(&mut self, new_order: &[Step]) -> Result<(), StepListError> {
        if new_order.len() != self.steps.len() {
            return Err(StepListError::InvalidOrder);
        }
        let mut reordered = Vec::with_capacity(new_order.len());
        for wanted in new_order {
            let step = self.get(wanted.id).ok_or(StepListError::InvalidOrder)?;
            if reordered.iter().any(|s: &Step| s.id == wanted.id) {
                return Err(StepListError::InvalidOrder);
            }
            reordered.push(step.clone());
        }
        self.steps = reordered;
        info!(order = ?self.ids(), "steps reordered");
        Ok(())
    }

    /// Move `source` into the position currently held by `target`.
    ///
    /// Returns `Ok(false)` when `source == target` (nothing to do).
    pub fn move_step(&mut self, source: StepId, target: StepId) -> Result<bool, StepListError> {
        let from = self.position(source).ok_or(StepListError::UnknownStep(source))?;
        let to = self.position(target).ok_or(StepListError::UnknownStep(target))?;
        if from == to {
            return Ok(false);
        }
        splice_move(&mut self.steps, from, to);
        Ok(true)
    }

    pub fn change_duration(&mut self, id: StepId, duration_secs: u64) -> Result<(), StepListError> {
        if duration_secs == 0 {
            return Err(StepListError::ZeroDuration);
        }
        let step = self
            .steps
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StepListError::UnknownStep(id))?;
        step.duration_secs = duration_secs;
        info!(id, duration_secs, "step duration changed");
        Ok(())
    }

    /// Consume the front step. Unlike `remove`, this may empty the list.
    pub fn pop_front(&mut self) -> Option<Step> {
        if self.steps.is_empty() {
            None
        } else {
            Some(self.steps.remove(0))
        }
    }
}

impl Default for StepList {
    fn default() -> Self {
        Self::seed()
    }
}

/// Remove the element at `from` and reinsert it at `to`.
pub(crate) fn splice_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let item = items.remove(from);
    items.insert(to, item);
}

/// Work 15s / short break 3s, four times, with a long break (6s) closing the set.
pub fn default_seed() -> Vec<StepTemplate> {
    let mut seed = Vec::with_capacity(8);
    for round in 0..4 {
        seed.push(StepTemplate {
            kind: StepKind::Work,
            duration_secs: 15,
        });
        seed.push(if round == 3 {
            StepTemplate {
                kind: StepKind::LongBreak,
                duration_secs: 6,
            }
        } else {
            StepTemplate {
                kind: StepKind::ShortBreak,
                duration_secs: 3,
            }
        });
    }
    seed
}
