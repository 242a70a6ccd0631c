use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{Task, TaskStatus};
use crate::remote::RemoteService;

/// Aggregate figures shown on the progress view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub support_needed: usize,
    pub completion_rate: u32,
    pub completed_hours: f64,
    pub total_hours: f64,
}

/// In-memory task list for the current session, in service order.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Replace the held tasks with a fresh fetch. On failure the store is
    /// left empty and the error is returned.
    pub async fn load<S: RemoteService>(&mut self, service: &S) -> Result<usize> {
        match service.fetch_tasks().await {
            Ok(tasks) => {
                self.tasks = tasks;
                debug!(count = self.tasks.len(), "task store loaded");
                Ok(self.tasks.len())
            }
            Err(e) => {
                warn!(error = %e, "failed to load tasks");
                self.tasks.clear();
                Err(e)
            }
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Overwrite the status of `task_id` in place.
    pub fn apply_status(&mut self, task_id: &str, status: TaskStatus) -> Result<()> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))?;
        task.status = status;
        Ok(())
    }

    pub fn by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    pub fn count(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|t| t.status == status).count()
    }

    /// Percentage of completed tasks, rounded. Zero for an empty store.
    pub fn completion_rate(&self) -> u32 {
        if self.tasks.is_empty() {
            return 0;
        }
        let completed = self.count(TaskStatus::Completed) as f64;
        (100.0 * completed / self.len() as f64).round() as u32
    }

    pub fn total_estimated_hours(&self) -> f64 {
        self.tasks.iter().map(|t| t.estimated_hours).sum()
    }

    pub fn completed_hours(&self) -> f64 {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .map(|t| t.estimated_hours)
            .sum()
    }

    pub fn summary(&self) -> ProgressSummary {
        ProgressSummary {
            total: self.len(),
            pending: self.count(TaskStatus::Pending),
            in_progress: self.count(TaskStatus::InProgress),
            completed: self.count(TaskStatus::Completed),
            support_needed: self.count(TaskStatus::SupportNeeded),
            completion_rate: self.completion_rate(),
            completed_hours: self.completed_hours(),
            total_hours: self.total_estimated_hours(),
        }
    }
}
