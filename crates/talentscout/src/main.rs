//! Terminal front end for the TalentScout interview agent.
//!
//! Reads the API key from `OPENROUTER_KEY` or `OPENAI_API_KEY`, asking for
//! one on the terminal when neither is set. Candidate messages are read from
//! stdin one line at a time; logs go to stderr (filter with `RUST_LOG`).
//!
//! # Examples
//!
//! ```sh
//! # Default model via OpenRouter
//! talentscout
//!
//! # Specific model, print the captured record when the interview ends
//! talentscout --model anthropic/claude-sonnet-4 --summary
//!
//! # Avoid model calls whose reply would be thrown away
//! talentscout --skip-discarded-calls
//! ```

use std::io::{self, IsTerminal, Write};
use std::process;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use talentscout::interview::is_exit_command;
use talentscout::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const FAILURE_NOTICE: &str = "Sorry, something went wrong while contacting the assistant.";

/// Interview a job candidate in the terminal.
#[derive(Parser)]
#[command(name = "talentscout")]
struct Cli {
    /// Model to use (defaults to the provider's GPT-4 identifier)
    #[arg(long)]
    model: Option<String>,

    /// Sampling temperature (0.0 = deterministic, 2.0 = very creative)
    #[arg(long, default_value_t = 0.7)]
    temperature: f32,

    /// Maximum tokens per response (0 = provider default)
    #[arg(long, default_value_t = 0)]
    max_tokens: u32,

    /// Chat completions URL (defaults to the provider's endpoint)
    #[arg(long)]
    api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Skip model calls whose reply would be replaced anyway
    #[arg(long)]
    skip_discarded_calls: bool,

    /// Print the captured candidate record as JSON when the interview ends
    #[arg(long)]
    summary: bool,

    /// Debug-level logging for this crate (overridden by RUST_LOG)
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    fn interview_config(&self) -> InterviewConfig {
        let mut config = InterviewConfig::default()
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
            .with_request_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(model) = &self.model {
            config = config.with_model(model);
        }
        if let Some(url) = &self.api_url {
            config = config.with_api_url(url);
        }
        if self.skip_discarded_calls {
            config = config.with_gateway_policy(GatewayPolicy::SkipDiscarded);
        }
        config
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "talentscout=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn prompt(label: &str) {
    print!("{label}");
    // Best effort: a closed stdout shows up on the next println.
    let _ = io::stdout().flush();
}

/// Next non-blank line from stdin, or `None` at end of input.
async fn next_line(lines: &mut Lines<BufReader<Stdin>>) -> Option<String> {
    loop {
        match lines.next_line().await {
            Ok(Some(line)) if line.trim().is_empty() => continue,
            Ok(Some(line)) => return Some(line.trim_end().to_string()),
            Ok(None) => return None,
            Err(e) => {
                error!("Failed to read input: {e}");
                return None;
            }
        }
    }
}

/// Effect of one key press on a hidden input line.
#[derive(Debug, PartialEq, Eq)]
enum HiddenKey {
    Edited,
    Submit,
    Cancel,
}

fn apply_hidden_key(line: &mut String, key: KeyEvent) -> HiddenKey {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return HiddenKey::Cancel;
    }
    match key.code {
        KeyCode::Enter => return HiddenKey::Submit,
        KeyCode::Esc => return HiddenKey::Cancel,
        KeyCode::Backspace => {
            line.pop();
        }
        KeyCode::Char(c) => line.push(c),
        _ => {}
    }
    HiddenKey::Edited
}

/// Read one line from the terminal without echoing it.
fn read_hidden_line() -> io::Result<String> {
    enable_raw_mode()?;
    let mut line = String::new();
    let result = loop {
        let key = match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
            Ok(_) => continue,
            Err(e) => break Err(e),
        };
        match apply_hidden_key(&mut line, key) {
            HiddenKey::Edited => {}
            HiddenKey::Submit => break Ok(()),
            HiddenKey::Cancel => {
                break Err(io::Error::new(io::ErrorKind::Interrupted, "input cancelled"));
            }
        }
    };
    disable_raw_mode()?;
    println!();
    result.map(|()| line)
}

/// Whether to ask for the greeting again after `error`, given the operator's
/// answer to the retry prompt (`None` at end of input).
fn retry_greeting(error: &InterviewError, answer: Option<&str>) -> bool {
    error.is_retryable() && answer.is_some_and(|a| !is_exit_command(a))
}

/// Credentials from the environment, or a key typed by the operator.
///
/// On a terminal the key is read without echo; piped input is read as a
/// plain line.
async fn acquire_credentials(lines: &mut Lines<BufReader<Stdin>>) -> Option<ApiCredentials> {
    match ApiCredentials::from_env() {
        Ok(creds) => Some(creds),
        Err(e) => {
            info!("{e}");
            eprintln!("No API key found in OPENROUTER_KEY or OPENAI_API_KEY.");
            let key = if io::stdin().is_terminal() {
                prompt("Enter your OpenRouter or OpenAI API key (input hidden): ");
                match tokio::task::spawn_blocking(read_hidden_line).await {
                    Ok(Ok(key)) => key,
                    Ok(Err(e)) => {
                        error!("Failed to read API key: {e}");
                        return None;
                    }
                    Err(e) => {
                        error!("API key reader panicked: {e}");
                        return None;
                    }
                }
            } else {
                prompt("Enter your OpenRouter or OpenAI API key: ");
                next_line(lines).await?
            };
            let key = key.trim().to_string();
            if key.is_empty() {
                return None;
            }
            let provider = Provider::infer_from_key(&key);
            Some(ApiCredentials::new(key, provider))
        }
    }
}

fn report_failure(e: &InterviewError) {
    error!("Turn failed: {e}");
    if e.is_retryable() {
        println!("Assistant: {FAILURE_NOTICE} Please send your message again.");
    } else {
        println!("Assistant: {FAILURE_NOTICE} Please check the API key and model settings.");
    }
}

fn print_summary(session: &Session) {
    match serde_json::to_string_pretty(session.candidate()) {
        Ok(json) => println!("{json}"),
        Err(e) => error!("Failed to serialize candidate record: {e}"),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.interview_config();
    if let Err(e) = config.validate() {
        eprintln!("Error: {e}");
        process::exit(2);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let Some(credentials) = acquire_credentials(&mut lines).await else {
        eprintln!("Error: an API key is required to start the interview.");
        process::exit(1);
    };

    let client = match config.build_client(&credentials) {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: the assistant could not be started. Please check your settings.");
            process::exit(1);
        }
    };
    info!(
        "Using model {} at {} ({:?})",
        client.model(),
        client.endpoint(),
        credentials.provider
    );

    let interviewer = Interviewer::new(&client, config);
    let mut session = Session::new();

    println!("TalentScout Hiring Assistant (type 'exit' to finish)\n");

    loop {
        let error = match interviewer.open(&mut session).await {
            Ok(greeting) => {
                println!("Assistant: {greeting}\n");
                break;
            }
            Err(e) => e,
        };
        report_failure(&error);
        let answer = if error.is_retryable() {
            prompt("Press Enter to try again, or type 'exit' to quit: ");
            lines.next_line().await.ok().flatten()
        } else {
            None
        };
        if !retry_greeting(&error, answer.as_deref()) {
            process::exit(1);
        }
    }

    while !session.is_finished() {
        prompt("You: ");
        let Some(input) = next_line(&mut lines).await else {
            println!();
            break;
        };

        match interviewer.handle_turn(&mut session, &input).await {
            Ok(reply) => println!("Assistant: {reply}\n"),
            Err(e) => report_failure(&e),
        }
    }

    info!(
        "Interview ended at stage {} after {} messages",
        session.stage(),
        session.history().len()
    );

    if cli.summary {
        print_summary(&session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn hidden_line_collects_and_edits_characters() {
        let mut line = String::new();
        for c in "sk-or-x".chars() {
            assert_eq!(apply_hidden_key(&mut line, press(KeyCode::Char(c))), HiddenKey::Edited);
        }
        apply_hidden_key(&mut line, press(KeyCode::Backspace));
        assert_eq!(line, "sk-or-");
        assert_eq!(apply_hidden_key(&mut line, press(KeyCode::Enter)), HiddenKey::Submit);
        assert_eq!(line, "sk-or-");
    }

    #[test]
    fn ctrl_c_cancels_hidden_input() {
        let mut line = String::from("abc");
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(apply_hidden_key(&mut line, key), HiddenKey::Cancel);
        assert_eq!(line, "abc");
    }

    #[test]
    fn retryable_greeting_failure_is_retried_until_exit() {
        let timeout = InterviewError::Gateway(GatewayError::Timeout);
        assert!(retry_greeting(&timeout, Some("")));
        assert!(!retry_greeting(&timeout, Some("exit")));
        assert!(!retry_greeting(&timeout, None));

        let unauthorized = InterviewError::Gateway(GatewayError::Http {
            status: 401,
            body: "bad key".into(),
        });
        assert!(!retry_greeting(&unauthorized, Some("")));
    }
}
