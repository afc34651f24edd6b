//! Stock Selection Bot console
//!
//! Drives the selection bot from stdin as the configured operator.
//!
//! # Usage
//!
//! ```bash
//! # Provider keys may also live in the settings file
//! export FMP_API_KEY="your-key"
//!
//! cargo run --bin value-bot -p value-bot -- --config config.json
//! ```

use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use value_bot::bot::{Command, SelectionBot};
use value_bot::{DataProviderManager, SelectionConfig, SqliteStore, TickerRegistry};
use value_utils::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "value-bot")]
#[command(about = "Keep a stock selection through chat commands", long_about = None)]
struct Args {
    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite database file, overrides the settings file
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn load_config(args: &Args) -> anyhow::Result<SelectionConfig> {
    let mut config = match &args.config {
        Some(path) => SelectionConfig::from_file(path)?,
        None => SelectionConfig::default(),
    }
    .with_env_overrides();

    if let Some(database) = &args.database {
        config.database_file.clone_from(database);
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let format = if args.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    value_utils::init_tracing_with("warn,value_bot=info", format);

    info!("Starting bot version {}", value_bot::VERSION);

    let config = Arc::new(load_config(&args)?);
    let store = Arc::new(SqliteStore::new(&config.database_file));
    let providers = DataProviderManager::from_config(&config)?;
    let registry = TickerRegistry::new(store, providers, Arc::clone(&config))
        .context("Failed to open the selection database")?;

    // Preload tickers from the settings
    registry.reload_from_config().await;

    let mut bot = SelectionBot::new(registry)?;
    let chat_id = bot.chat_id().to_string();
    println!("{}\n", bot.greeting());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!(">>> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let exit = matches!(Command::parse(input), Ok(Command::Exit));

        for reply in bot.handle_message(&chat_id, input).await {
            println!("{reply}");
        }
        println!();

        if exit {
            break;
        }
    }

    Ok(())
}
