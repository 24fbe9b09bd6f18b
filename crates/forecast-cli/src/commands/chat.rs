use std::sync::Arc;

use clap::Args;
use forecast_core::generation::{
    api_key, yoda_speak, Advisor, ChatAdvisor, GeminiClient, KeywordAdvisor, GREETING,
    QUICK_ACTIONS,
};
use forecast_core::storage::PlanStore;
use forecast_core::{Config, Database, GenerationError, RandDice};
use serde::Serialize;
use tracing::info;

use super::{print_json, CliResult};

#[derive(Args)]
pub struct ChatArgs {
    /// Message for the advisor. Without one, the greeting and quick actions are shown.
    message: Vec<String>,
    /// Answer from the built-in keyword advisor without calling the API
    #[arg(long)]
    offline: bool,
    /// Reverse the reply's word order
    #[arg(long)]
    yoda: bool,
}

#[derive(Serialize)]
struct Reply<'a> {
    advisor: &'a str,
    content: String,
}

fn keyword_advisor() -> Box<dyn Advisor> {
    Box::new(KeywordAdvisor::new(Box::new(RandDice::from_entropy())))
}

fn choose_advisor(offline: bool) -> Result<(Box<dyn Advisor>, &'static str), Box<dyn std::error::Error>> {
    if offline {
        return Ok((keyword_advisor(), "keyword"));
    }
    match api_key() {
        Ok(key) => {
            let config = Config::load_or_default();
            let client = GeminiClient::new(&config.generation, key)?;
            Ok((Box::new(ChatAdvisor::new(Arc::new(client))), "gemini"))
        }
        Err(GenerationError::MissingApiKey) => {
            info!("no API key configured, using keyword advisor");
            Ok((keyword_advisor(), "keyword"))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn run(args: ChatArgs) -> CliResult {
    let message = args.message.join(" ");
    if message.trim().is_empty() {
        return print_json(&serde_json::json!({
            "greeting": GREETING,
            "quick_actions": QUICK_ACTIONS,
        }));
    }

    let db = Database::open()?;
    let plan = PlanStore::plans(&db).latest()?;
    let (advisor, name) = choose_advisor(args.offline)?;

    let mut content = advisor.reply(&message, plan.as_ref()).await;
    if args.yoda {
        content = yoda_speak(&content);
    }
    print_json(&Reply {
        advisor: name,
        content,
    })
}
