//! Prompt text, canned directives and chat copy.

use crate::battle::Dice;
use crate::plan::DailyPlan;

pub const DEFAULT_DIRECTIVES: [&str; 4] = [
    "Crush today with maximum output and zero mercy.",
    "Dominate every obstacle and emerge victorious.",
    "Transform weakness into power and fear into strength.",
    "Execute with precision and eliminate all inefficiencies.",
];

pub const GREETING: &str =
    "Your tactical advisor is online. How shall we crush today's objectives, my lord?";

pub const QUICK_ACTIONS: [&str; 4] = [
    "How can I stay focused on my critical tasks?",
    "Help me optimize my schedule for maximum efficiency.",
    "I need motivation to push through resistance.",
    "I'm facing an obstacle. Help me destroy it.",
];

pub const FALLBACK_REPLY: &str = "The dark side is silent. Try again.";

pub const ADVISOR_PERSONA: &str =
    "Respond as a tactical Sith advisor: concise, direct, and menacing. Avoid pleasantries.";

/// The trimmed directive, or a random default when it is blank.
pub fn resolve_directive<D: Dice + ?Sized>(directive: &str, dice: &mut D) -> String {
    let trimmed = directive.trim();
    if trimmed.is_empty() {
        DEFAULT_DIRECTIVES[dice.pick(DEFAULT_DIRECTIVES.len())].to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn directive_prompt(directive: &str) -> String {
    format!(
        "Mission Directive: {directive}\n\
         Generate a JSON object with:\n\
         - schedule: an array of objects with time, task, and priority for a productive day\n\
         - goals: an array of 3 ambitious goals\n\
         - journalPrompt: a single motivational journal prompt.\n\
         Respond ONLY with valid JSON."
    )
}

/// Plan context (when present), the user's message, then the persona line.
pub fn chat_prompt(message: &str, plan: Option<&DailyPlan>) -> String {
    let context = plan
        .and_then(|p| serde_json::to_string(p).ok())
        .map(|json| format!("Today's plan: {json}"))
        .unwrap_or_default();
    format!("{context}\nUser: {message}\n{ADVISOR_PERSONA}")
}

/// Reverse word order.
pub fn yoda_speak(text: &str) -> String {
    text.split_whitespace().rev().collect::<Vec<_>>().join(" ")
}
