use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::TaskStatus;

/// A user-facing action that moves a task between statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Start,
    Complete,
    RequestSupport,
    Resume,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Complete => "complete",
            Action::RequestSupport => "request support",
            Action::Resume => "resume",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "start" => Ok(Action::Start),
            "complete" => Ok(Action::Complete),
            "support" | "request-support" | "request support" => Ok(Action::RequestSupport),
            "resume" => Ok(Action::Resume),
            other => Err(format!(
                "unknown action: {other} (expected: start, complete, support, resume)"
            )),
        }
    }
}

/// Every legal edge: `(from, action, to)`. Rows for the same `from` are in
/// the order their actions are offered.
pub const TRANSITIONS: &[(TaskStatus, Action, TaskStatus)] = &[
    (TaskStatus::Pending, Action::Start, TaskStatus::InProgress),
    (TaskStatus::InProgress, Action::Complete, TaskStatus::Completed),
    (
        TaskStatus::InProgress,
        Action::RequestSupport,
        TaskStatus::SupportNeeded,
    ),
    (TaskStatus::SupportNeeded, Action::Resume, TaskStatus::InProgress),
];

/// Actions offered for a task in `status`. Empty for terminal states.
pub fn actions_for(status: TaskStatus) -> Vec<Action> {
    TRANSITIONS
        .iter()
        .filter(|(from, _, _)| *from == status)
        .map(|(_, action, _)| *action)
        .collect()
}

/// Where `action` leads from `status`, if it is offered there.
pub fn target_of(status: TaskStatus, action: Action) -> Option<TaskStatus> {
    TRANSITIONS
        .iter()
        .find(|(from, a, _)| *from == status && *a == action)
        .map(|(_, _, to)| *to)
}

/// The action naming the edge `from -> to`, if there is one.
pub fn action_between(from: TaskStatus, to: TaskStatus) -> Option<Action> {
    TRANSITIONS
        .iter()
        .find(|(f, _, t)| *f == from && *t == to)
        .map(|(_, action, _)| *action)
}

pub fn is_terminal(status: TaskStatus) -> bool {
    !TRANSITIONS.iter().any(|(from, _, _)| *from == status)
}

/// Check that `from -> to` is a legal edge for `task_id`.
pub fn check(task_id: &str, from: TaskStatus, to: TaskStatus) -> Result<Action> {
    action_between(from, to).ok_or_else(|| Error::InvalidTransition {
        task_id: task_id.to_string(),
        from,
        to,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_per_status() {
        assert_eq!(actions_for(TaskStatus::Pending), vec![Action::Start]);
        assert_eq!(
            actions_for(TaskStatus::InProgress),
            vec![Action::Complete, Action::RequestSupport]
        );
        assert_eq!(actions_for(TaskStatus::SupportNeeded), vec![Action::Resume]);
        assert!(actions_for(TaskStatus::Completed).is_empty());
    }

    #[test]
    fn test_pending_only_reaches_in_progress() {
        let reachable: Vec<TaskStatus> = actions_for(TaskStatus::Pending)
            .into_iter()
            .filter_map(|a| target_of(TaskStatus::Pending, a))
            .collect();
        assert_eq!(reachable, vec![TaskStatus::InProgress]);
    }

    #[test]
    fn test_completed_is_terminal() {
        assert!(is_terminal(TaskStatus::Completed));
        for status in TaskStatus::ALL {
            assert!(check("t", TaskStatus::Completed, status).is_err());
        }
        assert!(!is_terminal(TaskStatus::SupportNeeded));
    }

    #[test]
    fn test_target_of_unoffered_action() {
        assert_eq!(target_of(TaskStatus::Pending, Action::Complete), None);
        assert_eq!(
            target_of(TaskStatus::SupportNeeded, Action::Resume),
            Some(TaskStatus::InProgress)
        );
    }

    #[test]
    fn test_check_rejects_skipping_edges() {
        let err = check("t1", TaskStatus::Pending, TaskStatus::Completed).unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { .. }));
        assert!(err.to_string().contains("pending -> completed"));
        assert!(check("t1", TaskStatus::Pending, TaskStatus::SupportNeeded).is_err());
        assert_eq!(
            check("t1", TaskStatus::InProgress, TaskStatus::SupportNeeded).unwrap(),
            Action::RequestSupport
        );
    }

    #[test]
    fn test_every_target_is_a_known_status() {
        for (from, action, to) in TRANSITIONS {
            assert!(TaskStatus::ALL.contains(from));
            assert!(TaskStatus::ALL.contains(to));
            assert_eq!(target_of(*from, *action), Some(*to));
        }
    }

    #[test]
    fn test_action_parse() {
        assert_eq!("support".parse(), Ok(Action::RequestSupport));
        assert!("finish".parse::<Action>().is_err());
    }
}
