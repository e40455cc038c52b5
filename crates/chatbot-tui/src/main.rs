use std::path::PathBuf;
use anyhow::{Result, anyhow};
use chatbot_core::{ChatClient, ChatView, ChatSession, Config, Language, Localizer};
use clap::{Parser, Subcommand};

mod app;
mod handler;
mod input;
mod logging;
mod tui;
mod ui;
mod view;

use app::App;
use tui::{EventHandler, Tui};

#[derive(Parser)]
#[command(name = "chatbot", version)]
#[command(about = "Terminal chat client with a Japanese/English UI")]
struct Cli {
    /// Chat server base URL (overrides CHATBOT_SERVER_URL and the settings file)
    #[arg(short, long)]
    server: Option<String>,
    /// UI language for this run: ja or en
    #[arg(short, long, value_parser = parse_language)]
    lang: Option<Language>,
    /// Settings file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the chat server is up and has a model configured
    Health,
    /// Send a single message and print the reply
    Ask {
        /// Your message
        message: String,
    },
}

fn parse_language(s: &str) -> Result<Language, String> {
    Language::from_code(s).ok_or_else(|| format!("unknown language '{}', expected ja or en", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging goes up before settings are read so their diagnostics are kept
    let _log_guard = match cli.command {
        None => Some(logging::init_tui()),
        Some(_) => {
            logging::init_cli();
            None
        }
    };

    let settings_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = Config::load_from(&settings_path).unwrap_or_else(|e| {
        tracing::warn!(path = %settings_path.display(), error = %e, "ignoring unreadable settings");
        Config::new()
    });

    let server_url = cli
        .server
        .or_else(|| std::env::var("CHATBOT_SERVER_URL").ok())
        .unwrap_or_else(|| config.server_url().to_string());
    let client = ChatClient::with_timeout(&server_url, config.request_timeout());

    let mut i18n = Localizer::load(settings_path);
    if let Some(language) = cli.lang {
        i18n = i18n.with_language(language);
    }

    match cli.command {
        Some(Commands::Health) => check_health(&client).await,
        Some(Commands::Ask { message }) => ask(&client, &i18n, &message).await,
        None => run_tui(client, i18n).await,
    }
}

async fn run_tui(client: ChatClient, i18n: Localizer) -> Result<()> {
    tui::install_panic_hook();

    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(tui::TICK_RATE);
    let mut app = App::new(client, i18n, events.sender());

    tracing::info!(
        server = app.client.base_url(),
        language = app.i18n.language().as_str(),
        "chat client started"
    );

    let result = run_loop(&mut terminal, &mut app, &mut events).await;
    tui::restore()?;
    result
}

async fn run_loop(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event),
            None => break,
        }
    }
    Ok(())
}

async fn check_health(client: &ChatClient) -> Result<()> {
    let health = client.health().await?;
    println!("server:        {}", client.base_url());
    println!("status:        {}", health.status);
    println!("ai configured: {}", if health.ai_configured { "yes" } else { "no" });

    if !health.ai_configured {
        return Err(anyhow!("the chat server has no AI model configured"));
    }
    Ok(())
}

/// Prints assistant replies to stdout; nothing else is visible.
struct PrintView;

impl ChatView for PrintView {
    fn add_message(&mut self, content: &str, is_user: bool) {
        if !is_user {
            println!("{}", content);
        }
    }
    fn show_typing_indicator(&mut self) {}
    fn hide_typing_indicator(&mut self) {}
    fn reset_input(&mut self) {}
    fn set_send_enabled(&mut self, _enabled: bool) {}
    fn focus_input(&mut self) {}
}

async fn ask(client: &ChatClient, i18n: &Localizer, message: &str) -> Result<()> {
    let mut session = ChatSession::new();
    match session.send(message, client, i18n, &mut PrintView).await {
        Some(true) => Ok(()),
        Some(false) => Err(anyhow!("no reply from {}", client.base_url())),
        None => Err(anyhow!("message is empty")),
    }
}
