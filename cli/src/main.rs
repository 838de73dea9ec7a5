mod render;
mod repl;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use widget::{
    ChatController, ImageUpload, Message, MockBackend, QueryBackend, QueryError, RelayBackend, VisibilityEvent,
};

use crate::render::{render_message, visibility_banner};
use crate::repl::{HELP, ReplCommand};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("--mock has no relay to ping")]
    NoRelay,
    #[error("request was ignored (a query of that kind is already pending or the input was empty)")]
    Ignored,
    #[error("stdin read failed: {0}")]
    Stdin(#[from] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "bugchat", about = "Terminal client for the bug search assistant")]
struct Cli {
    #[arg(long, env = "BUGRELAY_BASE_URL", default_value = widget::relay::DEFAULT_BASE_URL)]
    base_url: String,

    /// Answer every query with the built-in demo results instead of the relay.
    #[arg(long, default_value_t = false)]
    mock: bool,

    /// Print the conversation as JSON instead of text.
    #[arg(long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the relay is up.
    Ping,
    /// Search for bugs matching an error message.
    Ask { text: String },
    /// Upload a screenshot and print the assistant's answer.
    Image { path: PathBuf },
    /// Interactive chat session on stdin.
    Chat,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Ping => run_ping(&cli.base_url, cli.mock).await,
        Command::Ask { text } => {
            let backend = build_backend(&cli.base_url, cli.mock)?;
            let mut chat = open_chat();
            if !chat.ask(backend.as_ref(), &text).await {
                return Err(CliError::Ignored);
            }
            print_conversation(chat.messages(), cli.json)
        }
        Command::Image { path } => {
            let backend = build_backend(&cli.base_url, cli.mock)?;
            let upload = ImageUpload::from_path(&path).await?;
            let mut chat = open_chat();
            if !chat.send_image(backend.as_ref(), vec![upload]).await {
                return Err(CliError::Ignored);
            }
            print_conversation(chat.messages(), cli.json)
        }
        Command::Chat => {
            let backend = build_backend(&cli.base_url, cli.mock)?;
            let mut chat = open_chat();
            run_chat(&mut chat, backend.as_ref()).await
        }
    }
}

/// A controller with the widget already launched.
fn open_chat() -> ChatController {
    let mut chat = ChatController::new();
    chat.dispatch(VisibilityEvent::Launcher);
    chat
}

fn build_backend(base_url: &str, mock: bool) -> Result<Box<dyn QueryBackend>, CliError> {
    if mock {
        return Ok(Box::new(MockBackend::new()));
    }
    Ok(Box::new(RelayBackend::new(base_url)?))
}

async fn run_ping(base_url: &str, mock: bool) -> Result<(), CliError> {
    if mock {
        return Err(CliError::NoRelay);
    }
    let relay = RelayBackend::new(base_url)?;
    let text = relay.ping().await?;
    println!("{text}");
    Ok(())
}

fn print_conversation(messages: &[Message], json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(messages)?);
    } else {
        for message in messages {
            println!("{}", render_message(message));
        }
    }
    Ok(())
}

async fn run_chat(chat: &mut ChatController, backend: &dyn QueryBackend) -> Result<(), CliError> {
    eprintln!("{HELP}");
    eprintln!("{}", visibility_banner(chat.visibility()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut shown = chat.messages().len();

    while let Some(line) = lines.next_line().await? {
        match ReplCommand::parse(&line) {
            ReplCommand::Empty => continue,
            ReplCommand::Quit => break,
            ReplCommand::Help => eprintln!("{HELP}"),
            ReplCommand::History => {
                print_conversation(chat.messages(), false)?;
                continue;
            }
            ReplCommand::Unknown(cmd) => eprintln!("unknown command: {cmd} (try /help)"),
            ReplCommand::Visibility(event) => {
                let state = chat.dispatch(event);
                eprintln!("{}", visibility_banner(state));
            }
            ReplCommand::Dropzone => {
                chat.toggle_dropzone();
                let state = if chat.dropzone_open() { "open" } else { "closed" };
                eprintln!("(drop zone {state})");
            }
            _ if !chat.visibility().is_expanded() => {
                eprintln!("{}", visibility_banner(chat.visibility()));
            }
            ReplCommand::Ask(text) => {
                eprintln!("(searching...)");
                chat.ask(backend, &text).await;
            }
            ReplCommand::Image(path) => match ImageUpload::from_path(&path).await {
                Ok(upload) => {
                    eprintln!("(uploading {}...)", upload.name);
                    chat.send_image(backend, vec![upload]).await;
                }
                Err(e) => eprintln!("{e}"),
            },
        }

        for message in &chat.messages()[shown..] {
            println!("{}", render_message(message));
        }
        shown = chat.messages().len();
    }
    Ok(())
}
