use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::TaskStatus;
use crate::remote::RemoteService;
use crate::store::TaskStore;
use crate::transition::{self, Action};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The service acknowledged the change and the store now reflects it.
    Applied {
        action: Action,
        from: TaskStatus,
        to: TaskStatus,
    },
    /// The task already had the requested status; nothing was sent.
    AlreadyInState(TaskStatus),
}

/// A session over the remote task service: the task store plus the
/// service that persists its status changes.
pub struct Board<S> {
    service: S,
    store: TaskStore,
}

impl<S: RemoteService> Board<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            store: TaskStore::new(),
        }
    }

    pub fn with_store(service: S, store: TaskStore) -> Self {
        Self { service, store }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Reload tasks from the service. See [`TaskStore::load`].
    pub async fn load(&mut self) -> Result<usize> {
        self.store.load(&self.service).await
    }

    /// Move `task_id` to `target`.
    ///
    /// The edge must be in the transition table. The store is updated only
    /// after the service acknowledges the new status; on any error the
    /// store is unchanged.
    pub async fn request_transition(
        &mut self,
        task_id: &str,
        target: TaskStatus,
    ) -> Result<TransitionOutcome> {
        let current = self
            .store
            .get(task_id)
            .map(|t| t.status)
            .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))?;

        if current == target {
            debug!(task_id, status = %current, "task already in requested status");
            return Ok(TransitionOutcome::AlreadyInState(current));
        }

        let action = transition::check(task_id, current, target)?;

        if let Err(e) = self.service.set_task_status(task_id, target).await {
            warn!(task_id, from = %current, to = %target, error = %e, "status update failed");
            return Err(e);
        }

        self.store.apply_status(task_id, target)?;
        info!(task_id, %action, from = %current, to = %target, "task status updated");
        Ok(TransitionOutcome::Applied {
            action,
            from: current,
            to: target,
        })
    }

    /// Perform `action` on `task_id`, resolving its target from the task's
    /// current status.
    pub async fn perform(&mut self, task_id: &str, action: Action) -> Result<TransitionOutcome> {
        let current = self
            .store
            .get(task_id)
            .map(|t| t.status)
            .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))?;

        match transition::target_of(current, action) {
            Some(target) => self.request_transition(task_id, target).await,
            None if intended_target(action) == current => {
                debug!(task_id, %action, status = %current, "task already in requested status");
                Ok(TransitionOutcome::AlreadyInState(current))
            }
            None => {
                debug!(task_id, %action, status = %current, "action not offered");
                Err(Error::InvalidTransition {
                    task_id: task_id.to_string(),
                    from: current,
                    to: intended_target(action),
                })
            }
        }
    }
}

/// The status an action aims for, regardless of where it starts.
fn intended_target(action: Action) -> TaskStatus {
    match action {
        Action::Start | Action::Resume => TaskStatus::InProgress,
        Action::Complete => TaskStatus::Completed,
        Action::RequestSupport => TaskStatus::SupportNeeded,
    }
}
