use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::SkillType;
use crate::remote::RemoteService;

/// Bounds accepted for `weekly_hours` when saving.
pub const WEEKLY_HOURS_RANGE: std::ops::RangeInclusive<u32> = 1..=40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(rename = "月曜日")]
    Monday,
    #[serde(rename = "火曜日")]
    Tuesday,
    #[serde(rename = "水曜日")]
    Wednesday,
    #[serde(rename = "木曜日")]
    Thursday,
    #[serde(rename = "金曜日")]
    Friday,
    #[serde(rename = "土曜日")]
    Saturday,
    #[serde(rename = "日曜日")]
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Weekday::Monday => "mon",
            Weekday::Tuesday => "tue",
            Weekday::Wednesday => "wed",
            Weekday::Thursday => "thu",
            Weekday::Friday => "fri",
            Weekday::Saturday => "sat",
            Weekday::Sunday => "sun",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Weekday::Monday => "月曜日",
            Weekday::Tuesday => "火曜日",
            Weekday::Wednesday => "水曜日",
            Weekday::Thursday => "木曜日",
            Weekday::Friday => "金曜日",
            Weekday::Saturday => "土曜日",
            Weekday::Sunday => "日曜日",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.key().eq_ignore_ascii_case(s) || day.label() == s)
            .ok_or_else(|| format!("unknown day: {s} (expected: mon, tue, wed, thu, fri, sat, sun)"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "朝（6:00-12:00）")]
    Morning,
    #[serde(rename = "午後（12:00-18:00）")]
    Afternoon,
    #[serde(rename = "夜（18:00-24:00）")]
    Evening,
    #[serde(rename = "深夜（24:00-6:00）")]
    LateNight,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Morning,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
        TimeSlot::LateNight,
    ];

    pub fn key(self) -> &'static str {
        match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
            TimeSlot::LateNight => "late-night",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeSlot::Morning => "朝（6:00-12:00）",
            TimeSlot::Afternoon => "午後（12:00-18:00）",
            TimeSlot::Evening => "夜（18:00-24:00）",
            TimeSlot::LateNight => "深夜（24:00-6:00）",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeSlot {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        TimeSlot::ALL
            .into_iter()
            .find(|slot| slot.key().eq_ignore_ascii_case(s) || slot.label() == s)
            .ok_or_else(|| {
                format!("unknown time slot: {s} (expected: morning, afternoon, evening, late-night)")
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContactMethod {
    #[serde(rename = "Slack")]
    Slack,
    #[default]
    #[serde(rename = "メール")]
    Email,
    #[serde(rename = "電話")]
    Phone,
}

impl ContactMethod {
    pub const ALL: [ContactMethod; 3] = [
        ContactMethod::Slack,
        ContactMethod::Email,
        ContactMethod::Phone,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ContactMethod::Slack => "slack",
            ContactMethod::Email => "email",
            ContactMethod::Phone => "phone",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContactMethod::Slack => "Slack",
            ContactMethod::Email => "メール",
            ContactMethod::Phone => "電話",
        }
    }
}

impl fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContactMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ContactMethod::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s) || c.label() == s)
            .ok_or_else(|| format!("unknown contact method: {s} (expected: slack, email, phone)"))
    }
}

/// Availability and skill preferences used by the task generator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub available_days: Vec<Weekday>,
    #[serde(default)]
    pub available_time_slots: Vec<TimeSlot>,
    #[serde(default)]
    pub weekly_hours: u32,
    #[serde(default)]
    pub skills: Vec<SkillType>,
    #[serde(default)]
    pub preferred_contact: ContactMethod,
}

/// Add `item` when `on`, remove every copy of it otherwise.
fn toggle<T: PartialEq>(items: &mut Vec<T>, item: T, on: bool) {
    if on {
        if !items.contains(&item) {
            items.push(item);
        }
    } else {
        items.retain(|existing| *existing != item);
    }
}

impl UserProfile {
    pub fn set_day(&mut self, day: Weekday, on: bool) {
        toggle(&mut self.available_days, day, on);
    }

    pub fn set_time_slot(&mut self, slot: TimeSlot, on: bool) {
        toggle(&mut self.available_time_slots, slot, on);
    }

    pub fn set_skill(&mut self, skill: SkillType, on: bool) {
        toggle(&mut self.skills, skill, on);
    }

    pub fn validate(&self) -> Result<()> {
        if !WEEKLY_HOURS_RANGE.contains(&self.weekly_hours) {
            return Err(Error::ProfileValidation(format!(
                "weekly_hours must be between {} and {}, got {}",
                WEEKLY_HOURS_RANGE.start(),
                WEEKLY_HOURS_RANGE.end(),
                self.weekly_hours
            )));
        }
        Ok(())
    }
}

/// Fetch the current profile. Falls back to the default profile when the
/// service has none or the fetch fails; the flag reports whether a stored
/// profile was found.
pub async fn load_profile<S: RemoteService>(service: &S) -> (UserProfile, bool) {
    match service.fetch_profile().await {
        Ok(Some(profile)) => {
            debug!("loaded stored profile");
            (profile, true)
        }
        Ok(None) => {
            debug!("no stored profile, using defaults");
            (UserProfile::default(), false)
        }
        Err(e) => {
            warn!(error = %e, "failed to load profile, using defaults");
            (UserProfile::default(), false)
        }
    }
}

/// Validate and persist a profile wholesale.
pub async fn save_profile<S: RemoteService>(service: &S, profile: &UserProfile) -> Result<()> {
    profile.validate()?;
    if let Err(e) = service.save_profile(profile).await {
        warn!(error = %e, "failed to save profile");
        return Err(e);
    }
    debug!(weekly_hours = profile.weekly_hours, "profile saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_set_like() {
        let mut profile = UserProfile::default();
        profile.set_day(Weekday::Monday, true);
        profile.set_day(Weekday::Monday, true);
        profile.set_day(Weekday::Friday, true);
        assert_eq!(profile.available_days, vec![Weekday::Monday, Weekday::Friday]);

        profile.set_day(Weekday::Monday, false);
        assert_eq!(profile.available_days, vec![Weekday::Friday]);

        profile.set_skill(SkillType::Design, false);
        assert!(profile.skills.is_empty());
    }

    #[test]
    fn test_default_profile() {
        let profile = UserProfile::default();
        assert_eq!(profile.weekly_hours, 0);
        assert_eq!(profile.preferred_contact, ContactMethod::Email);
        assert!(profile.available_time_slots.is_empty());
    }

    #[test]
    fn test_validate_weekly_hours_bounds() {
        let mut profile = UserProfile::default();
        assert!(profile.validate().is_err());
        profile.weekly_hours = 1;
        assert!(profile.validate().is_ok());
        profile.weekly_hours = 40;
        assert!(profile.validate().is_ok());
        profile.weekly_hours = 41;
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("between 1 and 40"));
    }

    #[test]
    fn test_wire_format_uses_labels() {
        let mut profile = UserProfile {
            weekly_hours: 10,
            preferred_contact: ContactMethod::Slack,
            ..Default::default()
        };
        profile.set_day(Weekday::Saturday, true);
        profile.set_time_slot(TimeSlot::Evening, true);
        profile.set_skill(SkillType::Translation, true);

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "available_days": ["土曜日"],
                "available_time_slots": ["夜（18:00-24:00）"],
                "weekly_hours": 10,
                "skills": ["翻訳"],
                "preferred_contact": "Slack"
            })
        );
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!("Tue".parse(), Ok(Weekday::Tuesday));
        assert_eq!("late-night".parse(), Ok(TimeSlot::LateNight));
        assert_eq!("電話".parse(), Ok(ContactMethod::Phone));
        assert!("fax".parse::<ContactMethod>().is_err());
        assert!("noon".parse::<TimeSlot>().is_err());
    }
}
