use anyhow::Result;
use chatline_core::constants::defaults;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod theme;

#[derive(Parser)]
#[command(name = "chatline")]
#[command(about = "Chatline - chat with a hosted language model")]
#[command(version)]
struct Cli {
    /// Send a single message and exit
    #[arg(short, long)]
    prompt: Option<String>,

    /// Inference provider (huggingface, openai)
    #[arg(long)]
    provider: Option<String>,

    /// Model identifier for the selected provider
    #[arg(short, long)]
    model: Option<String>,

    /// Number of user/assistant exchanges to keep
    #[arg(long)]
    max_turns: Option<usize>,

    /// Where the conversation is persisted
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Settings file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also append logs to this file (chatbot.log when given without a path)
    #[arg(long, num_args = 0..=1, default_missing_value = defaults::LOG_FILE)]
    log_file: Option<PathBuf>,

    /// Color theme (dark, light, plain)
    #[arg(long, default_value = "dark")]
    theme: String,
}

impl Cli {
    fn settings(&self) -> chatline_core::Settings {
        let mut settings = match self.config {
            Some(ref path) => chatline_core::Settings::load_from(path),
            None => chatline_core::Settings::load(),
        };

        if let Some(ref provider) = self.provider {
            settings.provider = provider.clone();
        }
        if let Some(ref model) = self.model {
            match settings.provider_id() {
                Some(chatline_core::ProviderId::OpenAI) => settings.openai.model = model.clone(),
                _ => settings.huggingface.model = model.clone(),
            }
        }
        if let Some(max_turns) = self.max_turns {
            settings.chat.max_turns = max_turns;
        }
        if let Some(ref history_file) = self.history_file {
            settings.chat.history_file = history_file.clone();
        }
        settings
    }
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let file_layer = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let settings = cli.settings();
    tracing::debug!(
        provider = %settings.provider,
        history_file = %settings.chat.history_file.display(),
        "settings resolved"
    );

    if let Some(ref prompt) = cli.prompt {
        app::run_single_prompt(settings, prompt).await?;
    } else {
        app::run_repl(settings, theme::Theme::by_name(&cli.theme)).await?;
    }

    Ok(())
}
