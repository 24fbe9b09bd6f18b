//! Validation of model output.
//!
//! Generated content is accepted whole or not at all.

use serde::{Deserialize, Serialize};

use super::model::{is_valid_time, Priority, ScheduleItem};
use crate::error::GenerationError;

pub const GOAL_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub schedule: Vec<ScheduleItem>,
    pub goals: Vec<String>,
    pub journal_prompt: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContent {
    schedule: Vec<RawItem>,
    goals: Vec<String>,
    journal_prompt: String,
}

#[derive(Deserialize)]
struct RawItem {
    time: String,
    task: String,
    priority: String,
}

impl GeneratedContent {
    pub fn parse(text: &str) -> Result<Self, GenerationError> {
        let raw: RawContent = serde_json::from_str(text.trim())
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;

        let mut schedule = Vec::with_capacity(raw.schedule.len());
        for (i, item) in raw.schedule.into_iter().enumerate() {
            if !is_valid_time(&item.time) {
                return Err(GenerationError::Malformed(format!(
                    "schedule[{i}].time '{}' is not HH:MM",
                    item.time
                )));
            }
            if item.task.trim().is_empty() {
                return Err(GenerationError::Malformed(format!(
                    "schedule[{i}].task is empty"
                )));
            }
            let priority: Priority = item
                .priority
                .parse()
                .map_err(|e| GenerationError::Malformed(format!("schedule[{i}]: {e}")))?;
            schedule.push(ScheduleItem {
                time: item.time,
                task: item.task,
                priority,
            });
        }

        if raw.goals.len() != GOAL_COUNT {
            return Err(GenerationError::Malformed(format!(
                "expected {GOAL_COUNT} goals, got {}",
                raw.goals.len()
            )));
        }

        Ok(Self {
            schedule,
            goals: raw.goals,
            journal_prompt: raw.journal_prompt,
        })
    }
}
