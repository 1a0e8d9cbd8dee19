//! newsdesk CLI entry point

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use newsdesk::{
    commands::{
        cmd_ask, cmd_clear, cmd_init, cmd_process, cmd_session, cmd_status, print_answer,
        print_clear_report, print_process_report, print_status,
    },
    config::Config,
    error::Result,
    progress::LogWriterFactory,
};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(version, about = "Research assistant: index web articles and ask questions with RAG", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize newsdesk configuration
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Fetch and index up to three article URLs (replaces the index)
    Process {
        /// Article URLs
        #[arg(num_args = 1..=3, required = true)]
        urls: Vec<String>,
    },

    /// Ask a question about the indexed articles
    Ask {
        /// The question
        question: String,
    },

    /// Start an interactive session
    Session,

    /// Drop the indexed articles
    Clear,

    /// Show system status
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env before anything reads the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(LogWriterFactory::default()))
        .with(filter)
        .init();

    // Handle init command specially (doesn't need existing config)
    if let Commands::Init { force } = cli.command {
        return handle_init(cli.config, force).await;
    }

    // Handle completions command (doesn't need config)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "newsdesk", &mut std::io::stdout());
        return Ok(());
    }

    // Load configuration
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Init { .. } | Commands::Completions { .. } => unreachable!(),

        Commands::Process { urls } => {
            let report = cmd_process(&config, &urls).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_process_report(&report);
            }
        }

        Commands::Ask { question } => {
            let answer = cmd_ask(&config, &question).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&answer)?);
            } else {
                print_answer(&answer);
            }
        }

        Commands::Session => {
            cmd_session(&config).await?;
        }

        Commands::Clear => {
            let report = cmd_clear(&config).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_clear_report(&report);
            }
        }

        Commands::Status => {
            let status = cmd_status(&config).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print_status(&status);
            }
        }
    }

    Ok(())
}

async fn handle_init(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    // If the user names a config file, its parent is the base directory
    let base_dir = config_path.map(|path| {
        if path.extension().map_or(false, |e| e == "toml") {
            path.parent()
                .map(PathBuf::from)
                .unwrap_or_else(Config::default_base_dir)
        } else {
            path
        }
    });

    let config = cmd_init(base_dir, force).await?;

    println!("✓ newsdesk initialized successfully");
    println!("  Config: {}", config.paths.config_file.display());
    println!("\nNext steps:");
    println!("  1. Edit the config file to customize settings");
    println!("  2. Start Qdrant: docker run -p 6333:6333 -p 6334:6334 qdrant/qdrant");
    println!("  3. Index articles: newsdesk process <URL>...");
    println!("  4. Ask questions: newsdesk ask \"What happened?\"");

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(Config::default_config_path);

    if !config_path.exists() {
        eprintln!(
            "Config file not found: {}\nRun 'newsdesk init' first.",
            config_path.display()
        );
        std::process::exit(1);
    }

    Config::load(&config_path)
}
