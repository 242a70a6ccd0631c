use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Ack, DigitalBadge, Task, TaskStatus};
use crate::profile::UserProfile;

/// The backend that owns tasks, profiles and badges.
///
/// Every call may fail with a network or server error. Implementations do
/// not retry; callers decide how a failure degrades.
pub trait RemoteService {
    /// `GET /tasks`
    fn fetch_tasks(&self) -> impl Future<Output = Result<Vec<Task>>> + Send;

    /// `POST /tasks/{id}/status` with the bare status value as body.
    /// Repeating a call with the same target is safe.
    fn set_task_status(
        &self,
        task_id: &str,
        status: TaskStatus,
    ) -> impl Future<Output = Result<Ack>> + Send;

    /// `GET /profile`, unwrapping the `{ "profile": ... }` envelope.
    fn fetch_profile(&self) -> impl Future<Output = Result<Option<UserProfile>>> + Send;

    /// `POST /profile`
    fn save_profile(&self, profile: &UserProfile) -> impl Future<Output = Result<Ack>> + Send;

    /// `GET /badges`
    fn fetch_badges(&self) -> impl Future<Output = Result<Vec<DigitalBadge>>> + Send;

    /// `POST /badges`
    fn create_badge(&self, badge: &DigitalBadge) -> impl Future<Output = Result<Ack>> + Send;
}

// ---------------------------------------------------------------------------
// Transport abstraction (for testability)
// ---------------------------------------------------------------------------

/// Blocking JSON request/response over some base URL.
pub trait Transport: Send + Sync {
    fn get(&self, path: &str) -> Result<serde_json::Value>;
    fn post(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value>;
}

pub struct UreqTransport {
    agent: ureq::Agent,
    base_url: String,
}

impl UreqTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            agent: builder.build(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for UreqTransport {
    fn get(&self, path: &str) -> Result<serde_json::Value> {
        let url = self.url(path);
        debug!(%url, "GET");
        read_json(self.agent.get(&url).call(), "GET", &url)
    }

    fn post(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        let url = self.url(path);
        debug!(%url, "POST");
        read_json(
            self.agent
                .post(&url)
                .set("Content-Type", "application/json")
                .send_json(body),
            "POST",
            &url,
        )
    }
}

fn read_json(
    result: std::result::Result<ureq::Response, ureq::Error>,
    method: &str,
    url: &str,
) -> Result<serde_json::Value> {
    match result {
        Ok(response) => response
            .into_json()
            .map_err(|e| Error::Decode(format!("invalid JSON from {method} {url}: {e}"))),
        Err(ureq::Error::Status(code, response)) => {
            let body = response.into_string().unwrap_or_default();
            Err(Error::Remote(format!(
                "{method} {url} returned {code}: {body}"
            )))
        }
        Err(e) => Err(Error::Remote(format!("{method} {url} failed: {e}"))),
    }
}

fn decode<T: DeserializeOwned>(value: serde_json::Value, what: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::Decode(format!("failed to parse {what}: {e}")))
}

fn encode<T: serde::Serialize>(value: &T, what: &str) -> Result<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| Error::Decode(format!("failed to encode {what}: {e}")))
}

#[derive(serde::Deserialize)]
struct ProfileEnvelope {
    #[serde(default)]
    profile: Option<UserProfile>,
}

// ---------------------------------------------------------------------------
// HttpService
// ---------------------------------------------------------------------------

/// REST implementation of [`RemoteService`]. Blocking transport calls run on
/// tokio's blocking pool.
#[derive(Clone)]
pub struct HttpService {
    transport: Arc<dyn Transport>,
}

impl HttpService {
    pub fn new(config: &Config) -> Self {
        let timeout = config.timeout_secs.map(Duration::from_secs);
        Self::with_transport(Arc::new(UreqTransport::new(&config.api_url, timeout)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn get(&self, path: String) -> Result<serde_json::Value> {
        let transport = Arc::clone(&self.transport);
        tokio::task::spawn_blocking(move || transport.get(&path))
            .await
            .map_err(|e| Error::Remote(format!("request task failed: {e}")))?
    }

    async fn post(&self, path: String, body: serde_json::Value) -> Result<serde_json::Value> {
        let transport = Arc::clone(&self.transport);
        tokio::task::spawn_blocking(move || transport.post(&path, &body))
            .await
            .map_err(|e| Error::Remote(format!("request task failed: {e}")))?
    }
}

impl RemoteService for HttpService {
    async fn fetch_tasks(&self) -> Result<Vec<Task>> {
        let tasks: Vec<Task> = decode(self.get("/tasks".to_string()).await?, "tasks")?;
        debug!(count = tasks.len(), "fetched tasks");
        Ok(tasks)
    }

    async fn set_task_status(&self, task_id: &str, status: TaskStatus) -> Result<Ack> {
        let path = format!("/tasks/{}/status", urlencoding::encode(task_id));
        let body = encode(&status, "status")?;
        decode(self.post(path, body).await?, "status acknowledgment")
    }

    async fn fetch_profile(&self) -> Result<Option<UserProfile>> {
        let envelope: ProfileEnvelope = decode(self.get("/profile".to_string()).await?, "profile")?;
        Ok(envelope.profile)
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<Ack> {
        let body = encode(profile, "profile")?;
        decode(
            self.post("/profile".to_string(), body).await?,
            "profile acknowledgment",
        )
    }

    async fn fetch_badges(&self) -> Result<Vec<DigitalBadge>> {
        let badges: Vec<DigitalBadge> = decode(self.get("/badges".to_string()).await?, "badges")?;
        debug!(count = badges.len(), "fetched badges");
        Ok(badges)
    }

    async fn create_badge(&self, badge: &DigitalBadge) -> Result<Ack> {
        let body = encode(badge, "badge")?;
        decode(
            self.post("/badges".to_string(), body).await?,
            "badge acknowledgment",
        )
    }
}
