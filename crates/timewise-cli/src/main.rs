use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "timewise", version, about = "Timewise day planner CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe a change in plain words ("add gym at 6pm for 1h")
    Prompt {
        #[command(flatten)]
        args: commands::prompt::PromptArgs,
    },
    /// Show today's resolved timeline
    Today {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit individual events
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
    /// Set where today's flexible events start: HH:MM, "now" or "clear"
    StartAt {
        value: String,
    },
    /// Planner settings (lead time, day hours, buffer)
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Export the planner state as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<std::path::PathBuf>,
    },
    /// Replace the planner state with an exported file
    Import {
        path: std::path::PathBuf,
    },
    /// Upcoming reminders for the next 24 hours
    Reminders {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = timewise_core::Config::load_or_default().logging.level;
        EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("warn"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Prompt { args } => commands::prompt::run(args),
        Commands::Today { json } => commands::today::run(json),
        Commands::Event { action } => commands::event::run(action),
        Commands::StartAt { value } => commands::start_at::run(&value),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Export { output } => commands::transfer::export(output),
        Commands::Import { path } => commands::transfer::import(&path),
        Commands::Reminders { json } => commands::reminders::run(json),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
