use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use trivium::app::{restore_terminal, App};
use trivium::config::{AnswerOrder, AppConfig};
use trivium::error::user_friendly_message;
use trivium::models::Difficulty;
use trivium::{Result, TriviumError, APP_NAME, LOG_FILE};

#[derive(Parser)]
#[command(name = "trivium", version, about = "Terminal trivia quiz")]
struct Cli {
    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Trivia provider endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Number of questions (1-50)
    #[arg(long)]
    amount: Option<u8>,

    /// Category id (e.g. 9 for General Knowledge)
    #[arg(long)]
    category: Option<String>,

    /// Difficulty: easy, medium, hard
    #[arg(long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// Shuffle answers once per quiz instead of sorting them
    #[arg(long)]
    shuffle: bool,

    /// Write the effective configuration and exit
    #[arg(long)]
    write_config: bool,
}

fn parse_difficulty(value: &str) -> std::result::Result<Difficulty, String> {
    Difficulty::ALL
        .into_iter()
        .find(|d| d.as_str().eq_ignore_ascii_case(value))
        .ok_or_else(|| format!("unknown difficulty '{}' (easy, medium, hard)", value))
}

fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_NAME).join(LOG_FILE))
}

/// Send tracing output to a file; stdout belongs to the TUI.
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trivium=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| TriviumError::Config(format!("Failed to initialise logging: {}", e)))
}

fn effective_config(cli: &Cli) -> Result<(AppConfig, PathBuf)> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => AppConfig::config_file_path()?,
    };
    let mut config = AppConfig::load_from(&path)?;

    if let Some(endpoint) = &cli.endpoint {
        config = config.with_endpoint(endpoint.clone());
    }
    if let Some(amount) = cli.amount {
        config = config.with_amount(amount);
    }
    if let Some(category) = &cli.category {
        config = config.with_category(category.clone());
    }
    if let Some(difficulty) = cli.difficulty {
        config = config.with_difficulty(difficulty);
    }
    if cli.shuffle {
        config = config.with_answer_order(AnswerOrder::Shuffled);
    }

    config.validate()?;
    Ok((config, path))
}

async fn run(cli: Cli) -> Result<()> {
    let (config, config_path) = effective_config(&cli)?;

    if cli.write_config {
        config.save_to(&config_path)?;
        println!("Configuration written to {}", config_path.display());
        return Ok(());
    }

    if let Some(log_path) = cli.log_file.clone().or_else(default_log_path) {
        init_logging(&log_path)?;
    }
    info!(version = env!("CARGO_PKG_VERSION"), "trivium starting");

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        default_hook(panic_info);
    }));

    let mut app = App::new(&config)?;
    app.init()?;
    let result = app.run().await;
    app.restore()?;

    if let Err(e) = &result {
        error!(error = %e, "application error");
    }
    info!("trivium exiting");
    result
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", user_friendly_message(&e));
        process::exit(1);
    }
}
