//! Content generation and chat.

mod advisor;
pub mod credentials;
mod forecaster;
mod gemini;
mod model;
pub mod prompts;

pub use advisor::{task_advice, Advisor, ChatAdvisor, KeywordAdvisor, Topic};
pub use credentials::api_key;
pub use forecaster::Forecaster;
pub use gemini::{plan_response_schema, GeminiClient};
pub use model::{CompletionRequest, LanguageModel, ResponseFormat};
pub use prompts::{
    chat_prompt, directive_prompt, resolve_directive, yoda_speak, DEFAULT_DIRECTIVES,
    FALLBACK_REPLY, GREETING, QUICK_ACTIONS,
};
