//! Main chat loop orchestration.
//!
//! Coordinates the session lifecycle: welcome banner, input loop with
//! streamed responses, slash commands, the credential gate, and inline
//! error display. One submission is in flight at a time; the readline
//! loop serializes input.

use std::io::Write;

use console::style;
use secrecy::SecretString;
use tracing::info;

use groqchat_core::chat::transcript::Transcript;
use groqchat_types::chat::TurnRole;
use groqchat_types::llm::GroqModel;

use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

/// Run the interactive chat loop.
pub async fn run_chat_loop(mut state: AppState) -> anyhow::Result<()> {
    let session_id = uuid::Uuid::now_v7().to_string();
    print_welcome_banner(state.model().id(), &session_id);

    let renderer = ChatRenderer::new();
    let mut transcript = Transcript::new();

    let (mut chat_input, _writer) = ChatInput::with_prompt("You >")
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let event = chat_input.next_event().await;
        match event {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => {
                // Slash commands
                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Clear => {
                            transcript.clear();
                            chat_input.clear_screen();
                            println!("  {}", style("Chat cleared.").dim());
                        }
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::History => {
                            print_history(&renderer, &transcript);
                        }
                        ChatCommand::Model(name) => match name.parse::<GroqModel>() {
                            Ok(model) => {
                                state.set_model(model);
                                println!(
                                    "\n  {} Model set to {}\n",
                                    style("*").cyan().bold(),
                                    style(model.id()).cyan()
                                );
                            }
                            Err(e) => {
                                println!("\n  {} {e}\n", style("!").yellow().bold());
                            }
                        },
                        ChatCommand::Key => {
                            prompt_for_key(&mut state)?;
                        }
                        ChatCommand::Malformed(usage) => {
                            println!("\n  {} {usage}\n", style("!").yellow().bold());
                        }
                        ChatCommand::Unknown(cmd_name) => {
                            println!(
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(cmd_name).dim()
                            );
                        }
                    }
                    continue;
                }

                // Credential gate: without a key, no request is issued and
                // the message is not recorded.
                if !state.has_credential() {
                    println!(
                        "\n  {} Enter your Groq API key to start chatting.",
                        style("!").yellow().bold()
                    );
                    if prompt_for_key(&mut state)? {
                        println!("  {}\n", style("Send your message again.").dim());
                    }
                    continue;
                }

                let Some(engine) = state.engine() else {
                    continue;
                };

                // Thinking spinner until the first fragment arrives
                let spinner = indicatif::ProgressBar::new_spinner();
                spinner.set_style(
                    indicatif::ProgressStyle::default_spinner()
                        .template("{spinner:.cyan} {msg}")
                        .unwrap(),
                );
                spinner.set_message("thinking...");
                spinner.enable_steady_tick(std::time::Duration::from_millis(80));

                let mut first_fragment_received = false;
                let result = engine
                    .submit(&mut transcript, &text, |fragment| {
                        if !first_fragment_received {
                            spinner.finish_and_clear();
                            first_fragment_received = true;
                            print!("\n  {} ", style("Groq >").cyan().bold());
                            let _ = std::io::stdout().flush();
                        }
                        renderer.print_fragment(fragment);
                    })
                    .await;

                match result {
                    Ok(outcome) => {
                        if !first_fragment_received {
                            spinner.finish_and_clear();
                        }
                        println!();
                        renderer.print_stats_footer(
                            outcome.usage.output_tokens,
                            outcome.response_ms,
                            state.model().id(),
                        );
                        println!();
                        info!(
                            output_tokens = outcome.usage.output_tokens,
                            response_ms = outcome.response_ms,
                            "turn completed"
                        );
                    }
                    Err(e) => {
                        spinner.finish_and_clear();
                        eprintln!("\n  {} Error: {e}", style("!").red().bold());
                        eprintln!(
                            "  {}\n",
                            style("Your message stays in the chat; send another to retry.").dim()
                        );
                    }
                }
            }
        }
    }

    Ok(())
}

/// Re-print the transcript, rendering assistant turns as markdown.
fn print_history(renderer: &ChatRenderer, transcript: &Transcript) {
    println!();
    if transcript.is_empty() {
        println!("  {}", style("Nothing here yet.").dim());
    }
    for turn in transcript.turns() {
        match turn.role {
            TurnRole::User => {
                println!("  {} {}", style("You >").green().bold(), turn.content);
            }
            TurnRole::Assistant => {
                let rendered = renderer.render_final(&turn.content);
                println!("  {} {}", style("Groq >").cyan().bold(), rendered.trim_end());
            }
        }
    }
    println!();
}

/// Ask for an API key (hidden input). Returns whether a key was set.
///
/// An empty answer leaves the session unconfigured.
fn prompt_for_key(state: &mut AppState) -> anyhow::Result<bool> {
    println!(
        "  {}",
        style("Get a free API key at https://console.groq.com").dim()
    );

    let entered = dialoguer::Password::new()
        .with_prompt("  Groq API key")
        .allow_empty_password(true)
        .interact()?;

    let entered = entered.trim().to_string();
    if entered.is_empty() {
        println!("  {}\n", style("No key entered.").dim());
        return Ok(false);
    }

    let masked = state.set_credential(SecretString::from(entered));
    println!("\n  {} Key set ({masked})", style("*").cyan().bold());
    Ok(true)
}
