use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::plan::{is_valid_time, DailyPlan, Priority};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_generated: bool,
}

impl CalendarEvent {
    /// A user-created event with a fresh id.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
        time: impl Into<String>,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let time = time.into();
        if title.trim().is_empty() {
            return Err(ValidationError::invalid("title", "must not be empty"));
        }
        if !is_valid_time(&time) {
            return Err(ValidationError::invalid("time", format!("'{time}' is not HH:MM")));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title,
            description: description.into(),
            date,
            time,
            priority,
            created_at: now,
            is_generated: false,
        })
    }
}

/// Events on `date`, ordered by time of day.
pub fn events_on_date(events: &[CalendarEvent], date: NaiveDate) -> Vec<&CalendarEvent> {
    let mut found: Vec<&CalendarEvent> = events.iter().filter(|e| e.date == date).collect();
    found.sort_by(|a, b| a.time.cmp(&b.time));
    found
}

pub fn plan_on_date(plans: &[DailyPlan], date: NaiveDate) -> Option<&DailyPlan> {
    plans.iter().find(|p| p.date == date)
}

/// One event per schedule item. Ids are derived from the plan id and the
/// item's position, so deriving twice yields the same ids.
pub fn events_from_plan(plan: &DailyPlan, date: NaiveDate, now: DateTime<Utc>) -> Vec<CalendarEvent> {
    plan.schedule
        .iter()
        .enumerate()
        .map(|(index, item)| CalendarEvent {
            id: format!("{}-{}", plan.id, index),
            title: item.task.clone(),
            description: format!("Generated from Force Forecast plan: {}", plan.prompt),
            date,
            time: item.time.clone(),
            priority: item.priority,
            created_at: now,
            is_generated: true,
        })
        .collect()
}

/// Append the candidates whose id is not already present. Returns how many
/// were added.
pub fn insert_missing(events: &mut Vec<CalendarEvent>, candidates: Vec<CalendarEvent>) -> usize {
    let mut added = 0;
    for candidate in candidates {
        if !events.iter().any(|e| e.id == candidate.id) {
            events.push(candidate);
            added += 1;
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::ScheduleItem;
    use chrono::TimeZone;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn event(title: &str, date: NaiveDate, time: &str) -> CalendarEvent {
        CalendarEvent::new(title, "", date, time, Priority::Standard, now()).unwrap()
    }

    fn plan() -> DailyPlan {
        DailyPlan {
            id: "abc".into(),
            date: ymd(2024, 5, 1),
            prompt: "Win".into(),
            schedule: vec![
                ScheduleItem {
                    time: "08:00".into(),
                    task: "Plan".into(),
                    priority: Priority::High,
                },
                ScheduleItem {
                    time: "10:00".into(),
                    task: "Build".into(),
                    priority: Priority::Critical,
                },
            ],
            goals: vec!["a".into(), "b".into(), "c".into()],
            journal_prompt: "?".into(),
            journal_entry: String::new(),
            created_at: now(),
        }
    }

    #[test]
    fn events_filtered_and_sorted_by_time() {
        let day = ymd(2024, 5, 2);
        let events = vec![
            event("late", day, "18:00"),
            event("other day", ymd(2024, 5, 3), "07:00"),
            event("early", day, "06:30"),
        ];
        let titles: Vec<_> = events_on_date(&events, day).iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["early", "late"]);
    }

    #[test]
    fn new_event_validates() {
        let day = ymd(2024, 5, 2);
        assert!(CalendarEvent::new(" ", "", day, "09:00", Priority::High, now()).is_err());
        assert!(CalendarEvent::new("x", "", day, "9am", Priority::High, now()).is_err());
    }

    #[test]
    fn derived_events_mirror_schedule() {
        let day = ymd(2024, 5, 7);
        let derived = events_from_plan(&plan(), day, now());
        assert_eq!(derived.len(), 2);
        assert_eq!(derived[0].id, "abc-0");
        assert_eq!(derived[1].id, "abc-1");
        assert_eq!(derived[1].title, "Build");
        assert_eq!(derived[1].priority, Priority::Critical);
        assert_eq!(derived[0].description, "Generated from Force Forecast plan: Win");
        assert!(derived.iter().all(|e| e.is_generated && e.date == day));
    }

    #[test]
    fn deriving_twice_adds_nothing() {
        let mut events = Vec::new();
        let day = ymd(2024, 5, 7);
        assert_eq!(insert_missing(&mut events, events_from_plan(&plan(), day, now())), 2);
        assert_eq!(insert_missing(&mut events, events_from_plan(&plan(), day, now())), 0);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn plan_lookup_by_date() {
        let plans = vec![plan()];
        assert!(plan_on_date(&plans, ymd(2024, 5, 1)).is_some());
        assert!(plan_on_date(&plans, ymd(2024, 5, 2)).is_none());
    }

    #[test]
    fn is_generated_defaults_false() {
        let json = r#"{"id":"e","title":"t","date":"2024-05-01","time":"09:00",
            "priority":"high","createdAt":"2024-05-01T00:00:00Z"}"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert!(!event.is_generated);
        assert_eq!(event.description, "");
    }
}
