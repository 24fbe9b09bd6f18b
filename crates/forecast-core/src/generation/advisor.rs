//! Chat advisors.
//!
//! `ChatAdvisor` forwards to a language model and never fails: any error
//! becomes the fixed fallback reply. `KeywordAdvisor` answers offline from
//! canned lines keyed by topic.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::warn;

use super::model::{CompletionRequest, LanguageModel};
use super::prompts::{chat_prompt, FALLBACK_REPLY};
use crate::battle::Dice;
use crate::plan::DailyPlan;

#[async_trait]
pub trait Advisor: Send + Sync {
    async fn reply(&self, message: &str, plan: Option<&DailyPlan>) -> String;
}

pub struct ChatAdvisor<M: LanguageModel + ?Sized> {
    model: Arc<M>,
}

impl<M: LanguageModel + ?Sized> ChatAdvisor<M> {
    pub fn new(model: Arc<M>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl<M: LanguageModel + ?Sized> Advisor for ChatAdvisor<M> {
    async fn reply(&self, message: &str, plan: Option<&DailyPlan>) -> String {
        let request = CompletionRequest::text(chat_prompt(message, plan));
        match self.model.complete(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "chat request failed");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Focus,
    Motivation,
    Time,
    Obstacles,
    Schedule,
    Goals,
    General,
}

const TOPIC_KEYWORDS: [(Topic, &[&str]); 6] = [
    (Topic::Focus, &["focus", "distract", "concentrat"]),
    (Topic::Motivation, &["motivat", "tired", "lazy", "resistance", "give up", "quit"]),
    (Topic::Time, &["time", "late", "deadline", "procrastinat", "efficien"]),
    (Topic::Obstacles, &["obstacle", "stuck", "problem", "blocked", "destroy"]),
    (Topic::Schedule, &["schedule", "plan", "calendar", "task"]),
    (Topic::Goals, &["goal", "objective", "target", "ambition"]),
];

const FOCUS: [&str; 3] = [
    "Your focus is your weapon. Eliminate all distractions. Channel your anger into laser precision on the task at hand.",
    "The weak scatter their energy. You will concentrate yours. One objective. Total domination. No mercy for interruptions.",
    "Focus is power. Every moment of distraction is a moment your enemies gain ground. Destroy the noise. Execute with precision.",
];
const MOTIVATION: [&str; 3] = [
    "Pain is temporary. Victory is eternal. Push through the resistance - it's the only thing standing between you and absolute power.",
    "Your enemies hope you'll quit. Prove them wrong. Let their doubt fuel your unstoppable advance toward domination.",
    "Weakness is a choice. Strength is a decision. Choose power. Choose to crush every obstacle in your path.",
];
const TIME: [&str; 3] = [
    "Time is your most precious resource. Guard it ruthlessly. Every wasted minute is a victory for your competitors.",
    "The efficient dominate the wasteful. Optimize every action. Cut the fat. Execute with surgical precision.",
    "Time management is power management. Control your schedule, control your destiny. No mercy for time thieves.",
];
const OBSTACLES: [&str; 3] = [
    "Obstacles are opportunities in disguise. Use them to grow stronger. What doesn't destroy you makes you unstoppable.",
    "Every barrier is a test of your resolve. Crush it. Prove you deserve the power you seek.",
    "Your obstacles are temporary. Your victory will be permanent. Find the weakness. Exploit it. Dominate.",
];
const SCHEDULE: [&str; 3] = [
    "Your schedule is your battle plan. Execute it without mercy. No deviations. No excuses. Only results.",
    "Each task is a conquest. Approach it with the intensity of a Sith Lord. Dominate. Move to the next target.",
    "Time blocks are your weapons. Use them to slice through inefficiency and carve out your empire.",
];
const GOALS: [&str; 3] = [
    "Your goals are not wishes - they are commands you give to the universe. Execute them with absolute authority.",
    "Weak goals create weak results. Your objectives must be aggressive, specific, and non-negotiable.",
    "Every goal achieved is another step toward total domination. Show no mercy to mediocrity.",
];
const GENERAL: [&str; 3] = [
    "The Force flows through those who take action. What specific challenge requires my tactical analysis?",
    "Power respects power. Tell me what obstacle stands in your way, and I'll help you annihilate it.",
    "Your potential is unlimited, but only if you're willing to pay the price. What victory do you seek today?",
];

const TASK_ADVICE: [(&str, &str); 6] = [
    ("deep work", "Deep work is where legends are forged. Eliminate all distractions. Turn off notifications. Enter the zone and emerge victorious."),
    ("meeting", "Meetings are battlefields of influence. Come prepared. Dominate the conversation. Leave with what you came for."),
    ("email", "Email is a weapon. Use it strategically. Be direct. Be powerful. Don't let your inbox control you - you control it."),
    ("exercise", "Physical strength feeds mental power. Push your limits. Your body is your vessel - make it unstoppable."),
    ("planning", "Planning is preparation for domination. Think three moves ahead. Anticipate obstacles. Prepare for victory."),
    ("learning", "Knowledge is power. Absorb it ruthlessly. Apply it immediately. Let others remain ignorant while you advance."),
];

impl Topic {
    /// First topic whose keywords appear in `message`.
    pub fn classify(message: &str) -> Topic {
        let lower = message.to_lowercase();
        TOPIC_KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
            .map(|(topic, _)| *topic)
            .unwrap_or(Topic::General)
    }

    pub fn lines(&self) -> &'static [&'static str] {
        match self {
            Topic::Focus => &FOCUS,
            Topic::Motivation => &MOTIVATION,
            Topic::Time => &TIME,
            Topic::Obstacles => &OBSTACLES,
            Topic::Schedule => &SCHEDULE,
            Topic::Goals => &GOALS,
            Topic::General => &GENERAL,
        }
    }
}

/// Advice for a kind of task mentioned in `text`, if any.
pub fn task_advice(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    TASK_ADVICE
        .iter()
        .find(|(kind, _)| lower.contains(kind))
        .map(|(_, advice)| *advice)
}

pub struct KeywordAdvisor {
    dice: Mutex<Box<dyn Dice + Send>>,
}

impl KeywordAdvisor {
    pub fn new(dice: Box<dyn Dice + Send>) -> Self {
        Self {
            dice: Mutex::new(dice),
        }
    }

    /// Task advice wins when the message names a task kind. When it asks
    /// about schedule or tasks, the first plan item with known advice is used.
    /// Otherwise a line from the message's topic.
    pub fn respond(&self, message: &str, plan: Option<&DailyPlan>) -> String {
        if let Some(advice) = task_advice(message) {
            return advice.to_string();
        }
        let topic = Topic::classify(message);
        if topic == Topic::Schedule {
            if let Some(advice) = plan
                .into_iter()
                .flat_map(|p| p.schedule.iter())
                .find_map(|item| task_advice(&item.task))
            {
                return advice.to_string();
            }
        }
        let lines = topic.lines();
        let mut dice = self.dice.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        lines[dice.pick(lines.len())].to_string()
    }
}

#[async_trait]
impl Advisor for KeywordAdvisor {
    async fn reply(&self, message: &str, plan: Option<&DailyPlan>) -> String {
        self.respond(message, plan)
    }
}
