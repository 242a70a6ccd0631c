use std::io::Write;

use chrono::Utc;
use tracing::debug;

use crate::badges::BadgeCollection;
use crate::board::{Board, TransitionOutcome};
use crate::certificate::CertificateRenderer;
use crate::cli::{BadgeCommand, CliCommand, ProfileCommand};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::Task;
use crate::profile::{self, UserProfile};
use crate::remote::RemoteService;
use crate::report;
use crate::transition::Action;

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| Error::Decode(format!("failed to encode output: {e}")))
}

/// Execute one CLI command against `service`, writing user-facing output
/// to `out`.
pub async fn run<S: RemoteService, W: Write>(
    command: CliCommand,
    config: &Config,
    service: S,
    out: &mut W,
) -> Result<()> {
    match command {
        CliCommand::Tasks { status, json } => {
            let mut board = Board::new(service);
            if let Err(e) = board.load().await {
                debug!(error = %e, "listing empty task store");
            }
            let tasks: Vec<&Task> = match status {
                Some(status) => board.store().by_status(status),
                None => board.store().tasks().iter().collect(),
            };
            if json {
                writeln!(out, "{}", to_json(&tasks)?)?;
            } else {
                write!(out, "{}", report::task_list(&tasks))?;
            }
        }
        CliCommand::Progress { json } => {
            let mut board = Board::new(service);
            if let Err(e) = board.load().await {
                debug!(error = %e, "reporting progress for empty task store");
            }
            if json {
                writeln!(out, "{}", to_json(&board.store().summary())?)?;
            } else {
                write!(out, "{}", report::progress(board.store()))?;
            }
        }
        CliCommand::Start { task_id } => transition(service, &task_id, Action::Start, out).await?,
        CliCommand::Complete { task_id } => {
            transition(service, &task_id, Action::Complete, out).await?
        }
        CliCommand::Support { task_id } => {
            transition(service, &task_id, Action::RequestSupport, out).await?
        }
        CliCommand::Resume { task_id } => {
            transition(service, &task_id, Action::Resume, out).await?
        }
        CliCommand::Profile { command } => match command {
            ProfileCommand::Show => {
                let (profile, stored) = profile::load_profile(&service).await;
                write!(out, "{}", report::profile(&profile, stored))?;
            }
            ProfileCommand::Set {
                days,
                slots,
                hours,
                skills,
                contact,
            } => {
                let mut updated = UserProfile {
                    weekly_hours: hours,
                    preferred_contact: contact,
                    ..Default::default()
                };
                for day in days {
                    updated.set_day(day, true);
                }
                for slot in slots {
                    updated.set_time_slot(slot, true);
                }
                for skill in skills {
                    updated.set_skill(skill, true);
                }
                profile::save_profile(&service, &updated).await?;
                writeln!(out, "Profile saved.")?;
                write!(out, "{}", report::profile(&updated, true))?;
            }
        },
        CliCommand::Badges { command } => match command {
            BadgeCommand::List => {
                let collection = BadgeCollection::load(&service).await;
                write!(out, "{}", report::badges(&collection, Utc::now()))?;
            }
            BadgeCommand::Sample { task_id } => {
                let mut collection = BadgeCollection::load(&service).await;
                let badge = collection
                    .issue_sample(&service, &task_id, &config.sample_issuer, Utc::now())
                    .await?;
                writeln!(out, "Issued badge {} ({})", badge.id, badge.title)?;
            }
            BadgeCommand::Certificate { badge_id, out_dir } => {
                let collection = BadgeCollection::load(&service).await;
                let badge = collection.get(&badge_id)?;
                let renderer = CertificateRenderer::new(config.certificate_template.clone());
                let path = renderer.write(badge, &out_dir)?;
                writeln!(out, "Certificate written to {}", path.display())?;
            }
        },
    }
    Ok(())
}

async fn transition<S: RemoteService, W: Write>(
    service: S,
    task_id: &str,
    action: Action,
    out: &mut W,
) -> Result<()> {
    let mut board = Board::new(service);
    board.load().await?;
    debug!(task_id, %action, "performing action");
    match board.perform(task_id, action).await? {
        TransitionOutcome::Applied { action, from, to } => {
            writeln!(out, "{task_id}: {from} -> {to} ({action})")?;
        }
        TransitionOutcome::AlreadyInState(status) => {
            writeln!(out, "{task_id}: already {status}")?;
        }
    }
    Ok(())
}
