//! Interactive terminal client for the chart assistant.
//!
//! Reads one message per line from stdin and prints each bot turn followed
//! by its chart presentation as JSON. Lines starting with `/` are commands
//! acting on the latest bot message:
//!
//! - `/visualize` - accept a chart suggestion
//! - `/chart <kind>` - render as bar, line, pie or area
//! - `/options` - go back to the style picker
//! - `/clear` - drop the transcript
//! - `/quit` - exit
//!
//! Ctrl-C while waiting for the backend cancels the request.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use chart_assistant::adapters::backend::{WebhookBackend, WebhookConfig};
use chart_assistant::adapters::rate_limiter::FixedWindowRateLimiter;
use chart_assistant::adapters::storage::FileConversationStore;
use chart_assistant::application::{ChatSession, SessionError};
use chart_assistant::config::AppConfig;
use chart_assistant::domain::chart::{ChartKind, ExtractionOrchestrator};
use chart_assistant::domain::conversation::Message;
use chart_assistant::ports::ConversationStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    config.validate()?;

    let store =
        FileConversationStore::new(&config.storage.conversation_id_path).with_limits(config.limits);
    let conversation_id = store.get_or_create().await?;

    let backend = WebhookBackend::new(
        WebhookConfig::new(config.backend.url.clone()).with_timeout(config.backend.timeout()),
    )?;

    let mut session = ChatSession::new(
        conversation_id,
        Arc::new(backend),
        Box::new(FixedWindowRateLimiter::new(config.rate_limit)),
        ExtractionOrchestrator::new(config.charts.clone()),
    )
    .with_limits(config.limits)
    .with_request_timeout(config.backend.timeout());

    info!(conversation_id = %conversation_id, "Chart assistant ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match Command::parse(line) {
            Some(Command::Quit) => break,
            Some(command) => run_command(&mut session, command),
            None => send(&mut session, line).await,
        }
    }

    Ok(())
}

enum Command {
    Visualize,
    Chart(Option<ChartKind>),
    Options,
    Clear,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let command = match parts.next()? {
            "/visualize" => Command::Visualize,
            "/chart" => Command::Chart(parts.next().and_then(|kind| kind.parse().ok())),
            "/options" => Command::Options,
            "/clear" => Command::Clear,
            "/quit" => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}

async fn send(session: &mut ChatSession, content: &str) {
    let outcome = tokio::select! {
        result = session.send(content) => Some(result.map(Message::clone)),
        _ = tokio::signal::ctrl_c() => None,
    };

    match outcome {
        Some(Ok(message)) => print_message(&message),
        Some(Err(SessionError::Rejected(_))) => {
            if let Some(message) = session.messages().last() {
                print_message(message);
            }
        }
        Some(Err(err)) => error!(error = %err, "Message not sent"),
        None => match session.cancel_pending() {
            Ok(message) => print_message(message),
            Err(err) => error!(error = %err, "Nothing to cancel"),
        },
    }
}

fn run_command(session: &mut ChatSession, command: Command) {
    if let Command::Clear = command {
        session.clear();
        println!("Conversa limpa.");
        return;
    }

    let Some(id) = session.last_bot_message().map(|m| *m.id()) else {
        println!("Nenhuma resposta para exibir.");
        return;
    };

    let result = match command {
        Command::Visualize => session.visualize(&id).map(|_| ()),
        Command::Chart(Some(kind)) => session.select_chart_kind(&id, kind).map(|_| ()),
        Command::Chart(None) => {
            let kinds: Vec<String> = ChartKind::ALL
                .iter()
                .map(|k| format!("{} ({})", k.as_str(), k.label()))
                .collect();
            println!("Uso: /chart <{}>", kinds.join(" | "));
            return;
        }
        Command::Options => session.reopen_chart_options(&id).map(|_| ()),
        Command::Clear | Command::Quit => return,
    };

    match result {
        Ok(()) => {
            if let Some(message) = session.find_message(&id) {
                print_presentation(message);
            }
        }
        Err(err) => error!(error = %err, "Chart action failed"),
    }
}

fn print_message(message: &Message) {
    println!("{}", message.content());
    print_presentation(message);
}

fn print_presentation(message: &Message) {
    if message.presentation().is_none() {
        return;
    }
    match serde_json::to_string_pretty(message.presentation()) {
        Ok(json) => println!("{}", json),
        Err(err) => error!(error = %err, "Failed to serialize chart"),
    }
}
