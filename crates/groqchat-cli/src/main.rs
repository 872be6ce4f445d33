//! groqchat entry point.
//!
//! Binary name: `groqchat`
//!
//! Parses CLI arguments, sets up tracing, then either prints the model
//! menu or starts the interactive chat loop.

mod chat;
mod state;

use clap::{Parser, Subcommand};
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use groqchat_types::llm::GroqModel;

use state::AppState;

/// Chat with Groq's ultra-fast inference from your terminal.
#[derive(Parser)]
#[command(name = "groqchat", version, about, long_about = None)]
struct Cli {
    /// Model to chat with.
    #[arg(
        long,
        env = "GROQCHAT_MODEL",
        default_value = "llama-3.1-8b-instant",
        global = true
    )]
    model: GroqModel,

    /// Groq API key. Get a free one at console.groq.com.
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session (the default).
    Chat,

    /// List the selectable models.
    Models,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,groqchat_core=debug,groqchat_infra=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let credential = cli.api_key.map(SecretString::from);
            let state = AppState::new(credential, cli.model);
            chat::run_chat_loop(state).await?;
        }

        Commands::Models => {
            println!();
            for model in GroqModel::all() {
                if *model == GroqModel::default() {
                    println!(
                        "  {} {}",
                        console::style(model.id()).cyan().bold(),
                        console::style("(default)").dim()
                    );
                } else {
                    println!("  {}", console::style(model.id()).cyan());
                }
            }
            println!();
        }
    }

    Ok(())
}
