use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "forecast", version, about = "Force Forecast CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Daily plans
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Ask the tactical advisor
    Chat(commands::chat::ChatArgs),
    /// Battle simulator
    Battle {
        #[command(subcommand)]
        action: commands::battle::BattleAction,
    },
    /// Pomodoro timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Focus music playlist
    Music {
        #[command(subcommand)]
        action: commands::music::MusicAction,
    },
    /// Calendar grid and events
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Log filter comes from FORECAST_LOG (default `warn`); logs go to stderr so
/// stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("FORECAST_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan { action } => commands::plan::run(action).await,
        Commands::Chat(args) => commands::chat::run(args).await,
        Commands::Battle { action } => commands::battle::run(action).await,
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Music { action } => commands::music::run(action),
        Commands::Calendar { action } => commands::calendar::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
