use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::content::GeneratedContent;
use crate::error::ValidationError;

/// Urgency shared by schedule items and calendar events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    #[default]
    Standard,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Critical, Priority::High, Priority::Standard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Standard => "standard",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid(
                    "priority",
                    format!("'{s}' is not one of critical, high, standard"),
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    /// 24-hour "HH:MM".
    pub time: String,
    pub task: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPlan {
    pub id: String,
    pub date: NaiveDate,
    pub prompt: String,
    pub schedule: Vec<ScheduleItem>,
    pub goals: Vec<String>,
    pub journal_prompt: String,
    #[serde(default)]
    pub journal_entry: String,
    pub created_at: DateTime<Utc>,
}

impl DailyPlan {
    /// Wrap validated content in a new plan dated on `now`'s calendar day.
    pub fn from_generated(prompt: impl Into<String>, content: GeneratedContent, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: now.date_naive(),
            prompt: prompt.into(),
            schedule: content.schedule,
            goals: content.goals,
            journal_prompt: content.journal_prompt,
            journal_entry: String::new(),
            created_at: now,
        }
    }

    pub fn has_journal_entry(&self) -> bool {
        !self.journal_entry.trim().is_empty()
    }
}

/// Accepts only zero-padded 24-hour "HH:MM".
pub fn is_valid_time(time: &str) -> bool {
    let bytes = time.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    let digits = |a: u8, b: u8| -> Option<u32> {
        if a.is_ascii_digit() && b.is_ascii_digit() {
            Some(u32::from(a - b'0') * 10 + u32::from(b - b'0'))
        } else {
            None
        }
    };
    matches!(
        (digits(bytes[0], bytes[1]), digits(bytes[3], bytes[4])),
        (Some(h), Some(m)) if h < 24 && m < 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_format() {
        assert!(is_valid_time("09:00"));
        assert!(is_valid_time("23:59"));
        assert!(!is_valid_time("9:00"));
        assert!(!is_valid_time("24:00"));
        assert!(!is_valid_time("12:60"));
        assert!(!is_valid_time("12-30"));
        assert!(!is_valid_time("ab:cd"));
    }

    #[test]
    fn priority_round_trip() {
        for p in Priority::ALL {
            assert_eq!(p.as_str().parse::<Priority>().unwrap(), p);
        }
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn plan_json_uses_camel_case() {
        let plan = DailyPlan {
            id: "p1".into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 4).unwrap(),
            prompt: "Crush it".into(),
            schedule: vec![],
            goals: vec![],
            journal_prompt: "Why?".into(),
            journal_entry: String::new(),
            created_at: DateTime::parse_from_rfc3339("2024-05-04T08:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["journalPrompt"], "Why?");
        assert_eq!(json["date"], "2024-05-04");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn missing_journal_entry_defaults_empty() {
        let json = r#"{"id":"p","date":"2024-01-01","prompt":"x","schedule":[],"goals":[],
            "journalPrompt":"y","createdAt":"2024-01-01T00:00:00Z"}"#;
        let plan: DailyPlan = serde_json::from_str(json).unwrap();
        assert!(!plan.has_journal_entry());
    }
}
