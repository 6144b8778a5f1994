use crate::domain::slot::StateSlot;
use crate::domain::todo::{StoreError, Task, TaskId};
use anyhow::Result;

/// Authoritative owner of the ordered task collection. Every successful
/// mutation writes the whole collection back through the slot; unknown ids
/// on toggle/delete are silent no-ops so stale UI references stay harmless.
pub struct TodoStore<S: StateSlot> {
    tasks: Vec<Task>,
    next_id: u64,
    slot: S,
}

impl<S: StateSlot> TodoStore<S> {
    /// Restores the collection from the slot and seeds the id counter past
    /// every restored id.
    pub fn open(slot: S) -> Result<Self> {
        let tasks = slot.restore()?;
        let next_id = tasks.iter().map(|t| t.id.0 + 1).max().unwrap_or(1);
        Ok(Self { tasks, next_id, slot })
    }

    pub fn add(&mut self, text: &str, date: Option<&str>) -> Result<Task, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyText);
        }
        let date = date.map(str::trim).filter(|d| !d.is_empty());
        let task = Task {
            id: self.fresh_id(),
            text: text.to_string(),
            date: date.map(str::to_string),
            completed: false,
        };
        self.tasks.push(task.clone());
        self.slot.persist(&self.tasks)?;
        tracing::debug!(id = %task.id, "task added");
        Ok(task)
    }

    /// Flips the completion flag; `Ok(false)` when the id is unknown.
    pub fn toggle_complete(&mut self, id: TaskId) -> Result<bool> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        task.completed = !task.completed;
        self.slot.persist(&self.tasks)?;
        Ok(true)
    }

    /// Removes the task; `Ok(false)` when the id is unknown, so a repeated
    /// delete is idempotent.
    pub fn delete(&mut self, id: TaskId) -> Result<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Ok(false);
        }
        self.slot.persist(&self.tasks)?;
        Ok(true)
    }

    /// Read-only snapshot in insertion order. All mutation goes through
    /// `add`, `toggle_complete` and `delete`.
    pub fn load_all(&self) -> &[Task] {
        &self.tasks
    }

    fn fresh_id(&mut self) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        id
    }
}
