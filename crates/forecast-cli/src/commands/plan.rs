use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::Subcommand;
use forecast_core::generation::{api_key, Forecaster, GeminiClient};
use forecast_core::plan::{export_file_name, export_plans, import_plans, plan_as_text};
use forecast_core::storage::PlanStore;
use forecast_core::{Config, Database, RandDice, ValidationError};

use super::{find_plan, print_json, CliResult};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Generate today's plan from a mission directive
    Generate {
        /// Mission directive (a default directive is used when omitted)
        #[arg(default_value = "")]
        directive: String,
    },
    /// List all plans as JSON
    List,
    /// Show one plan (latest when no id is given)
    Show {
        id: Option<String>,
        /// Print the text command brief instead of JSON
        #[arg(long)]
        text: bool,
    },
    /// Record the journal response for a plan
    Journal {
        /// Plan ID
        id: String,
        /// Journal entry text
        entry: String,
    },
    /// Delete a plan
    Delete {
        /// Plan ID
        id: String,
    },
    /// Export all plans as JSON, or one plan as a text brief
    Export {
        /// Export the text brief of this plan (latest when combined with --text alone)
        #[arg(long)]
        id: Option<String>,
        /// Text brief instead of the JSON array
        #[arg(long)]
        text: bool,
        /// Output file, or a directory for the text brief's default file name
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Import plans from a JSON export
    Import {
        /// Path to the JSON file
        path: PathBuf,
    },
}

pub async fn run(action: PlanAction) -> CliResult {
    let db = Database::open()?;
    let store = PlanStore::plans(&db);

    match action {
        PlanAction::Generate { directive } => {
            let config = Config::load_or_default();
            let client = GeminiClient::new(&config.generation, api_key()?)?;
            let forecaster = Forecaster::new(Arc::new(client));
            let plan = forecaster
                .forecast(&directive, &mut RandDice::from_entropy(), Utc::now())
                .await?;
            store.upsert(plan.clone())?;
            print_json(&plan)?;
        }
        PlanAction::List => {
            print_json(&store.list()?)?;
        }
        PlanAction::Show { id, text } => {
            let plan = find_plan(&db, id.as_deref())?;
            if text {
                println!("{}", plan_as_text(&plan));
            } else {
                print_json(&plan)?;
            }
        }
        PlanAction::Journal { id, entry } => {
            let mut plan = find_plan(&db, Some(&id))?;
            plan.journal_entry = entry;
            store.upsert(plan.clone())?;
            print_json(&plan)?;
        }
        PlanAction::Delete { id } => {
            if !store.delete(&id)? {
                return Err(ValidationError::NotFound { kind: "plan", id }.into());
            }
            print_json(&serde_json::json!({ "deleted": id }))?;
        }
        PlanAction::Export { id, text, out } => {
            if text || id.is_some() {
                let plan = find_plan(&db, id.as_deref())?;
                let brief = plan_as_text(&plan);
                match out {
                    Some(path) => {
                        let path = if path.is_dir() {
                            path.join(export_file_name(&plan))
                        } else {
                            path
                        };
                        std::fs::write(&path, brief)?;
                        print_json(&serde_json::json!({ "written": path }))?;
                    }
                    None => println!("{brief}"),
                }
            } else {
                let json = export_plans(&store.list()?)?;
                match out {
                    Some(path) => {
                        std::fs::write(&path, json)?;
                        print_json(&serde_json::json!({ "written": path }))?;
                    }
                    None => println!("{json}"),
                }
            }
        }
        PlanAction::Import { path } => {
            let content = std::fs::read_to_string(&path)?;
            let plans = import_plans(&content)?;
            let count = plans.len();
            for plan in plans {
                store.upsert(plan)?;
            }
            print_json(&serde_json::json!({ "imported": count }))?;
        }
    }
    Ok(())
}
