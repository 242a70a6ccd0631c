#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use careerpact::config::{Config, DEFAULT_API_URL, DEFAULT_SAMPLE_ISSUER};
use careerpact::error::{Error, Result};
use careerpact::model::{Ack, DigitalBadge, Priority, SkillType, Task, TaskStatus};
use careerpact::profile::UserProfile;
use careerpact::remote::RemoteService;

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

/// The two-task seed used across scenarios.
pub fn seed_tasks() -> Vec<Task> {
    vec![
        make_task("t1", TaskStatus::Pending, 2.0),
        make_task("t2", TaskStatus::InProgress, 3.0),
    ]
}

/// Sensible default `Config` for tests.
pub fn default_test_config() -> Config {
    Config {
        api_url: DEFAULT_API_URL.to_string(),
        timeout_secs: None,
        sample_issuer: DEFAULT_SAMPLE_ISSUER.to_string(),
        certificate_template: None,
    }
}

#[derive(Default)]
pub struct Tracker {
    pub status_writes: Vec<(String, TaskStatus)>,
    pub saved_profiles: Vec<UserProfile>,
    pub created_badges: Vec<DigitalBadge>,
}

/// In-memory service. `None` for a collection makes its fetch fail.
#[derive(Clone)]
pub struct MockService {
    pub tasks: Option<Vec<Task>>,
    pub profile: Option<Option<UserProfile>>,
    pub badges: Option<Vec<DigitalBadge>>,
    pub fail_writes: bool,
    pub tracker: Arc<Mutex<Tracker>>,
}

impl MockService {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Some(tasks),
            profile: Some(None),
            badges: Some(Vec::new()),
            fail_writes: false,
            tracker: Arc::new(Mutex::new(Tracker::default())),
        }
    }

    fn write_result(&self) -> Result<Ack> {
        if self.fail_writes {
            Err(Error::Remote("POST returned 500: internal error".to_string()))
        } else {
            Ok(Ack {
                message: Some("ok".to_string()),
            })
        }
    }
}

impl RemoteService for MockService {
    async fn fetch_tasks(&self) -> Result<Vec<Task>> {
        self.tasks
            .clone()
            .ok_or_else(|| Error::Remote("GET /tasks failed: connection refused".to_string()))
    }

    async fn set_task_status(&self, task_id: &str, status: TaskStatus) -> Result<Ack> {
        self.tracker
            .lock()
            .unwrap()
            .status_writes
            .push((task_id.to_string(), status));
        self.write_result()
    }

    async fn fetch_profile(&self) -> Result<Option<UserProfile>> {
        self.profile
            .clone()
            .ok_or_else(|| Error::Remote("GET /profile failed: connection refused".to_string()))
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<Ack> {
        self.tracker
            .lock()
            .unwrap()
            .saved_profiles
            .push(profile.clone());
        self.write_result()
    }

    async fn fetch_badges(&self) -> Result<Vec<DigitalBadge>> {
        self.badges
            .clone()
            .ok_or_else(|| Error::Remote("GET /badges failed: connection refused".to_string()))
    }

    async fn create_badge(&self, badge: &DigitalBadge) -> Result<Ack> {
        self.tracker
            .lock()
            .unwrap()
            .created_badges
            .push(badge.clone());
        self.write_result()
    }
}
