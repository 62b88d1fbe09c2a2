use clap::Parser;
use imagehook::{
    logger::{self, LogLevel, LoggerConfig},
    render::{Fanout, HtmlRenderer, TerminalRenderer},
    RequestOrchestrator, Session, WebhookConfig,
};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(name = "imagehook", version, about = "Generate an image from a text prompt through a workflow webhook")]
struct Cli {
    /// Image description. Without it, one prompt per line is read from stdin.
    prompt: Option<String>,

    /// Webhook URL (overrides IMAGEHOOK_WEBHOOK_URL)
    #[arg(long)]
    url: Option<String>,

    /// Request timeout in seconds, 0 to wait forever (overrides IMAGEHOOK_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Where the generated image is saved; the extension follows the content type if omitted
    #[arg(short, long, default_value = "generated_image")]
    output: PathBuf,

    /// Also keep an HTML snapshot of the page at this path
    #[arg(long)]
    html: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let logger_config = if cli.json_logs {
        LoggerConfig::production()
    } else {
        LoggerConfig::new()
    };
    let level = if cli.verbose { LogLevel::Debug } else { LogLevel::Info };
    logger::init_with_config(logger_config.with_level(level))?;

    match dotenv::dotenv() {
        Ok(path) => log::debug!("✅ Loaded {}", path.display()),
        Err(_) => log::debug!("No .env file found, using process environment"),
    }

    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let mut config = WebhookConfig::from_env()?;
    if let Some(url) = cli.url {
        config = config.with_url(url);
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout_secs(secs);
    }
    logger::log_config_info(&config);

    let mut renderers: Vec<Box<dyn imagehook::Renderer + Send>> =
        vec![Box::new(TerminalRenderer::stdout().with_output(cli.output))];
    if let Some(path) = cli.html {
        renderers.push(Box::new(HtmlRenderer::new().with_file(path)));
    }

    let orchestrator = RequestOrchestrator::with_reqwest(config)?;
    let mut session = Session::new(orchestrator, Fanout(renderers));

    let cancel = session.cancel_handle();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if !cancel.cancel() {
                log::info!("👋 Bye");
                std::process::exit(130);
            }
        }
    });

    if let Some(prompt) = cli.prompt {
        let state = session.submit(&prompt).await;
        return match state.status() {
            Some(status) if status.is_error() => Err(status.text.clone().into()),
            _ => Ok(()),
        };
    }

    session.render();
    log::info!("✍️  Enter a prompt per line, Ctrl-D to quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        session.submit(&line).await;
    }

    Ok(())
}
