use chrono::NaiveDate;

use crate::model::{Priority, SkillType, Task, TaskStatus};

/// Create a `Task` with sensible defaults for tests.
pub fn make_task(id: &str, status: TaskStatus, estimated_hours: f64) -> Task {
    Task {
        id: id.to_string(),
        title: format!("{id} title"),
        description: format!("{id} description"),
        deadline: NaiveDate::from_ymd_opt(2024, 2, 15)
            .and_then(|d| d.and_hms_opt(17, 0, 0))
            .unwrap(),
        estimated_hours,
        required_skills: vec![SkillType::Writing],
        priority: Priority(1),
        status,
    }
}
