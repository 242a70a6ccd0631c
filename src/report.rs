use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::badges::BadgeCollection;
use crate::model::{Task, TaskStatus};
use crate::profile::UserProfile;
use crate::store::TaskStore;
use crate::transition::{actions_for, is_terminal};

/// Titles listed per status group before collapsing into "+N more".
pub const GROUP_PREVIEW_LIMIT: usize = 3;

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    if items.is_empty() {
        return "-".to_string();
    }
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Dashboard listing: one block per task with the actions it offers.
pub fn task_list(tasks: &[&Task]) -> String {
    if tasks.is_empty() {
        return "No tasks yet. Set up your profile to receive suggested tasks.\n".to_string();
    }

    let mut out = String::new();
    for task in tasks {
        let actions = if is_terminal(task.status) {
            "-".to_string()
        } else {
            join(&actions_for(task.status))
        };
        let _ = writeln!(
            out,
            "[{}] {}  (priority {}, {})",
            task.id,
            task.title,
            task.priority.0,
            task.priority.band()
        );
        let _ = writeln!(out, "    {}", task.description);
        let _ = writeln!(
            out,
            "    deadline {} | {}h | skills: {}",
            task.deadline.format("%Y/%m/%d %H:%M"),
            task.estimated_hours,
            join(&task.required_skills)
        );
        let _ = writeln!(
            out,
            "    status: {} | actions: {}",
            task.status.label(),
            actions
        );
    }
    out
}

/// Progress view: headline metrics followed by per-status groups.
pub fn progress(store: &TaskStore) -> String {
    if store.is_empty() {
        return "No tasks to track yet. Check the task list first.\n".to_string();
    }

    let summary = store.summary();
    let mut out = String::new();
    let _ = writeln!(out, "Completion rate: {}%", summary.completion_rate);
    let _ = writeln!(
        out,
        "Completed hours: {}h / {}h",
        summary.completed_hours, summary.total_hours
    );
    let _ = writeln!(out, "Total tasks:     {}", summary.total);
    let _ = writeln!(out, "Support needed:  {}", summary.support_needed);

    for status in TaskStatus::ALL {
        let group = store.by_status(status);
        let _ = writeln!(out);
        let _ = writeln!(out, "{} ({})", status.label(), group.len());
        for task in group.iter().take(GROUP_PREVIEW_LIMIT) {
            let _ = writeln!(out, "  - {}", task.title);
        }
        if group.len() > GROUP_PREVIEW_LIMIT {
            let _ = writeln!(out, "  +{} more", group.len() - GROUP_PREVIEW_LIMIT);
        }
    }
    out
}

pub fn profile(profile: &UserProfile, stored: bool) -> String {
    let mut out = String::new();
    if !stored {
        let _ = writeln!(
            out,
            "No profile saved yet. Use `careerpact profile set` to create one."
        );
    }
    let _ = writeln!(out, "Available days:  {}", join(&profile.available_days));
    let _ = writeln!(
        out,
        "Time slots:      {}",
        join(&profile.available_time_slots)
    );
    let _ = writeln!(out, "Weekly hours:    {}", profile.weekly_hours);
    let _ = writeln!(out, "Skills:          {}", join(&profile.skills));
    let _ = writeln!(out, "Contact:         {}", profile.preferred_contact);
    out
}

pub fn badges(collection: &BadgeCollection, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Badges earned:   {}", collection.badges().len());
    let _ = writeln!(out, "Issuers:         {}", collection.issuer_count());
    let _ = writeln!(out, "This month:      {}", collection.issued_in_month(now));

    if collection.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "No badges yet. Complete tasks to earn badges.");
        return out;
    }

    for badge in collection.badges() {
        let _ = writeln!(out);
        let _ = writeln!(out, "[{}] {}", badge.id, badge.title);
        let _ = writeln!(out, "    {}", badge.description);
        let _ = writeln!(
            out,
            "    issued {} by {} (task {})",
            badge.issued_date.format("%Y/%m/%d"),
            badge.issuer_company,
            badge.task_id
        );
    }
    out
}
