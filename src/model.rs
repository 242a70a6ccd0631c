use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    SupportNeeded,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::SupportNeeded,
    ];

    /// Wire value, as sent to and received from the service.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::SupportNeeded => "support_needed",
        }
    }

    /// Human-readable label used in listings.
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Not started",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::SupportNeeded => "Support needed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown status: {s} (expected: pending, in_progress, completed, support_needed)"
                )
            })
    }
}

/// Skill tags a task can require and a user can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillType {
    #[serde(rename = "文章作成")]
    Writing,
    #[serde(rename = "データ入力")]
    DataEntry,
    #[serde(rename = "カスタマーサポート")]
    CustomerSupport,
    #[serde(rename = "デザイン")]
    Design,
    #[serde(rename = "翻訳")]
    Translation,
}

impl SkillType {
    pub const ALL: [SkillType; 5] = [
        SkillType::Writing,
        SkillType::DataEntry,
        SkillType::CustomerSupport,
        SkillType::Design,
        SkillType::Translation,
    ];

    /// Short ASCII key accepted on the command line.
    pub fn key(self) -> &'static str {
        match self {
            SkillType::Writing => "writing",
            SkillType::DataEntry => "data-entry",
            SkillType::CustomerSupport => "customer-support",
            SkillType::Design => "design",
            SkillType::Translation => "translation",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SkillType::Writing => "文章作成",
            SkillType::DataEntry => "データ入力",
            SkillType::CustomerSupport => "カスタマーサポート",
            SkillType::Design => "デザイン",
            SkillType::Translation => "翻訳",
        }
    }
}

impl fmt::Display for SkillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SkillType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SkillType::ALL
            .into_iter()
            .find(|skill| skill.key().eq_ignore_ascii_case(s) || skill.label() == s)
            .ok_or_else(|| {
                format!(
                    "unknown skill: {s} (expected: writing, data-entry, customer-support, design, translation)"
                )
            })
    }
}

/// Task urgency. Lower value means more urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityBand {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn band(self) -> PriorityBand {
        match self.0 {
            0 | 1 => PriorityBand::High,
            2 => PriorityBand::Medium,
            _ => PriorityBand::Low,
        }
    }
}

impl fmt::Display for PriorityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityBand::High => write!(f, "high"),
            PriorityBand::Medium => write!(f, "medium"),
            PriorityBand::Low => write!(f, "low"),
        }
    }
}

/// A unit of assignable work, as handed out by the task service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(with = "lenient_naive")]
    pub deadline: NaiveDateTime,
    pub estimated_hours: f64,
    #[serde(default)]
    pub required_skills: Vec<SkillType>,
    pub priority: Priority,
    #[serde(default)]
    pub status: TaskStatus,
}

/// A credential awarded for a completed task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitalBadge {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(with = "lenient_utc")]
    pub issued_date: DateTime<Utc>,
    pub issuer_company: String,
    /// Task that earned the badge. Lookup only.
    pub task_id: String,
}

/// Parse an ISO 8601 date-time with or without an offset. Offset values keep
/// their wall-clock reading; naive values carry no zone.
fn parse_datetime(raw: &str) -> Option<(NaiveDateTime, Option<DateTime<Utc>>)> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some((dt.naive_local(), Some(dt.with_timezone(&Utc))));
    }
    raw.parse::<NaiveDateTime>().ok().map(|naive| (naive, None))
}

/// Task deadlines: accepts `2024-02-15T17:00:00` as well as `...Z` or
/// `...+09:00`.
mod lenient_naive {
    use super::*;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        value.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse_datetime(&raw)
            .map(|(naive, _)| naive)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date-time: {raw}")))
    }
}

/// Badge timestamps. A value without an offset is read as UTC.
mod lenient_utc {
    use super::*;

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        value.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse_datetime(&raw)
            .map(|(naive, utc)| utc.unwrap_or_else(|| Utc.from_utc_datetime(&naive)))
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date-time: {raw}")))
    }
}

/// Body returned by write endpoints.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}
