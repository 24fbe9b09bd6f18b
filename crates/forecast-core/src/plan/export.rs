use indoc::formatdoc;

use super::model::DailyPlan;
use crate::error::Result;

/// Pretty JSON array, in the order given.
pub fn export_plans(plans: &[DailyPlan]) -> Result<String> {
    Ok(serde_json::to_string_pretty(plans)?)
}

pub fn import_plans(json: &str) -> Result<Vec<DailyPlan>> {
    Ok(serde_json::from_str(json)?)
}

pub fn export_file_name(plan: &DailyPlan) -> String {
    format!("force-forecast-{}.txt", plan.date)
}

/// Fixed-layout command brief for a single plan.
pub fn plan_as_text(plan: &DailyPlan) -> String {
    let schedule = plan
        .schedule
        .iter()
        .map(|item| format!("{} - {}", item.time, item.task))
        .collect::<Vec<_>>()
        .join("\n");
    let goals = plan
        .goals
        .iter()
        .enumerate()
        .map(|(i, goal)| format!("{}. {}", i + 1, goal))
        .collect::<Vec<_>>()
        .join("\n");
    let response = if plan.has_journal_entry() {
        plan.journal_entry.as_str()
    } else {
        "No entry recorded"
    };

    formatdoc! {"
        FORCE FORECAST - DAILY COMMAND BRIEF
        Date: {date}
        Mission Directive: {prompt}

        === TACTICAL SCHEDULE ===
        {schedule}

        === STRATEGIC OBJECTIVES ===
        {goals}

        === MINDSET CONDITIONING ===
        Prompt: {journal_prompt}
        Response: {response}

        === MISSION NOTES ===
        Generated: {created_at}
        Plan ID: {id}

        The Force is strong with this one.",
        date = plan.date,
        prompt = plan.prompt,
        schedule = schedule,
        goals = goals,
        response = response,
        journal_prompt = plan.journal_prompt,
        created_at = plan.created_at.to_rfc3339(),
        id = plan.id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Priority, ScheduleItem};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn sample() -> DailyPlan {
        DailyPlan {
            id: "plan-42".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            prompt: "Dominate".into(),
            schedule: vec![
                ScheduleItem {
                    time: "06:00".into(),
                    task: "Train".into(),
                    priority: Priority::High,
                },
                ScheduleItem {
                    time: "09:00".into(),
                    task: "Deep work".into(),
                    priority: Priority::Critical,
                },
            ],
            goals: vec!["A".into(), "B".into(), "C".into()],
            journal_prompt: "What holds you back?".into(),
            journal_entry: String::new(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 9, 5, 0, 0).unwrap(),
        }
    }

    #[test]
    fn text_layout() {
        let text = plan_as_text(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "FORCE FORECAST - DAILY COMMAND BRIEF");
        assert_eq!(lines[1], "Date: 2024-03-09");
        assert_eq!(lines[2], "Mission Directive: Dominate");
        assert_eq!(lines[4], "=== TACTICAL SCHEDULE ===");
        assert_eq!(lines[5], "06:00 - Train");
        assert_eq!(lines[6], "09:00 - Deep work");
        assert_eq!(lines[8], "=== STRATEGIC OBJECTIVES ===");
        assert_eq!(lines[9], "1. A");
        assert_eq!(lines[11], "3. C");
        assert!(text.contains("Response: No entry recorded"));
        assert!(text.contains("Plan ID: plan-42"));
        assert_eq!(*lines.last().unwrap(), "The Force is strong with this one.");
    }

    #[test]
    fn text_includes_journal_entry() {
        let mut plan = sample();
        plan.journal_entry = "Nothing.".into();
        assert!(plan_as_text(&plan).contains("Response: Nothing."));
    }

    #[test]
    fn file_name_uses_date() {
        assert_eq!(export_file_name(&sample()), "force-forecast-2024-03-09.txt");
    }

    #[test]
    fn import_rejects_garbage() {
        assert!(import_plans("{not json").is_err());
    }
}
