use webchess_client::app::App;
use webchess_client::clients::GameServerClient;
use webchess_client::config;
use webchess_client::poller::LogPoller;
use webchess_client::runtime::Runtime;
use webchess_client::ui::terminal::Terminal;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Logs go to stderr so they stay out of the board on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = config::Config::from_env()?;
    tracing::info!(server = %config.server_url, "Connecting to game server");

    let api = GameServerClient::new(&config)?;
    let app = App::new(&config);
    let terminal = Terminal::stdout(config.log_lines);
    let poller = LogPoller::new(config.log_poll_interval);

    let mut runtime = Runtime::new(app, api, terminal, poller);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    runtime.run(stdin).await?;

    Ok(())
}
