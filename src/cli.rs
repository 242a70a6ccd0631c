use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::model::{SkillType, TaskStatus};
use crate::profile::{ContactMethod, TimeSlot, Weekday};

/// Task progress and badge client for the CareerPact service
#[derive(Parser, Debug, Clone)]
#[command(name = "careerpact", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,

    /// Path to config file (default: ./careerpact.toml if present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Base URL of the CareerPact API
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds (default: none)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// List suggested tasks and the actions available on each
    Tasks {
        /// Only show tasks with this status (pending, in_progress, completed, support_needed)
        #[arg(long)]
        status: Option<TaskStatus>,

        /// Print tasks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show completion rate, hours and tasks grouped by status
    Progress {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start a pending task
    Start { task_id: String },

    /// Mark an in-progress task as completed
    Complete { task_id: String },

    /// Ask for support on an in-progress task
    Support { task_id: String },

    /// Resume a task that was waiting for support
    Resume { task_id: String },

    /// View or update availability and skill preferences
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },

    /// List, issue and export digital badges
    Badges {
        #[command(subcommand)]
        command: BadgeCommand,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProfileCommand {
    /// Show the stored profile
    Show,

    /// Replace the stored profile
    Set {
        /// Available weekday (mon..sun), repeatable
        #[arg(long = "day")]
        days: Vec<Weekday>,

        /// Available time slot (morning, afternoon, evening, late-night), repeatable
        #[arg(long = "slot")]
        slots: Vec<TimeSlot>,

        /// Hours available per week (1-40)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=40))]
        hours: u32,

        /// Skill (writing, data-entry, customer-support, design, translation), repeatable
        #[arg(long = "skill")]
        skills: Vec<SkillType>,

        /// Preferred contact method (slack, email, phone)
        #[arg(long, default_value = "email")]
        contact: ContactMethod,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum BadgeCommand {
    /// List earned badges with statistics
    List,

    /// Issue a demonstration badge
    Sample {
        /// Task the badge is linked to
        #[arg(long, default_value = "task_1")]
        task_id: String,
    },

    /// Write a plain-text certificate for a badge
    Certificate {
        badge_id: String,

        /// Directory to write the certificate into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}
