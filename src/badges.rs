use std::collections::HashSet;

use chrono::{DateTime, Datelike, Utc};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::DigitalBadge;
use crate::remote::RemoteService;

pub const SAMPLE_TITLE: &str = "文章作成マスター";
pub const SAMPLE_DESCRIPTION: &str =
    "商品説明文の作成タスクを完了し、高品質な文章を提供しました。";

/// Badges held for the current session.
#[derive(Debug, Clone, Default)]
pub struct BadgeCollection {
    badges: Vec<DigitalBadge>,
}

impl BadgeCollection {
    pub fn with_badges(badges: Vec<DigitalBadge>) -> Self {
        Self { badges }
    }

    /// Fetch all badges. A failed fetch yields an empty collection.
    pub async fn load<S: RemoteService>(service: &S) -> Self {
        match service.fetch_badges().await {
            Ok(badges) => Self::with_badges(badges),
            Err(e) => {
                warn!(error = %e, "failed to load badges");
                Self::default()
            }
        }
    }

    pub fn badges(&self) -> &[DigitalBadge] {
        &self.badges
    }

    pub fn is_empty(&self) -> bool {
        self.badges.is_empty()
    }

    pub fn get(&self, badge_id: &str) -> Result<&DigitalBadge> {
        self.badges
            .iter()
            .find(|b| b.id == badge_id)
            .ok_or_else(|| Error::BadgeNotFound(badge_id.to_string()))
    }

    /// Number of distinct issuing companies.
    pub fn issuer_count(&self) -> usize {
        self.badges
            .iter()
            .map(|b| b.issuer_company.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Badges issued in the same calendar month as `now`.
    pub fn issued_in_month(&self, now: DateTime<Utc>) -> usize {
        self.badges
            .iter()
            .filter(|b| {
                b.issued_date.year() == now.year() && b.issued_date.month() == now.month()
            })
            .count()
    }

    /// Issue a demonstration badge for `task_id`. It is added to the
    /// collection only once the service accepts it.
    pub async fn issue_sample<S: RemoteService>(
        &mut self,
        service: &S,
        task_id: &str,
        issuer_company: &str,
        now: DateTime<Utc>,
    ) -> Result<&DigitalBadge> {
        let badge = sample_badge(task_id, issuer_company, now);
        if let Err(e) = service.create_badge(&badge).await {
            warn!(badge_id = %badge.id, error = %e, "failed to create badge");
            return Err(e);
        }
        info!(badge_id = %badge.id, task_id, "badge issued");
        self.badges.push(badge);
        debug!(count = self.badges.len(), "badge collection updated");
        Ok(&self.badges[self.badges.len() - 1])
    }
}

pub fn sample_badge(task_id: &str, issuer_company: &str, now: DateTime<Utc>) -> DigitalBadge {
    DigitalBadge {
        id: format!("badge_{}", now.timestamp_millis()),
        title: SAMPLE_TITLE.to_string(),
        description: SAMPLE_DESCRIPTION.to_string(),
        issued_date: now,
        issuer_company: issuer_company.to_string(),
        task_id: task_id.to_string(),
    }
}
