use std::path::PathBuf;

use crate::model::TaskStatus;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    ConfigValidation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("remote service error: {0}")]
    Remote(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("invalid transition for task {task_id}: {from} -> {to}")]
    InvalidTransition {
        task_id: String,
        from: TaskStatus,
        to: TaskStatus,
    },

    #[error("profile validation error: {0}")]
    ProfileValidation(String),

    #[error("badge not found: {0}")]
    BadgeNotFound(String),

    #[error("template error: {0}")]
    Template(String),
}

pub type Result<T> = std::result::Result<T, Error>;
