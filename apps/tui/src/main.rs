use clap::Parser;
use color_eyre::Result;

use senate_trades_tui::api::ApiClient;
use senate_trades_tui::app::App;
use senate_trades_tui::cli::CliArgs;
use senate_trades_tui::config::Config;
use senate_trades_tui::{event, logging, terminal};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = Config::load()?;

    let headless = args.headless || args.json || !is_terminal();
    logging::init(args.debug, headless, config.log_file.as_deref())?;
    tracing::info!(api_base = config.api_base.as_str(), "configuration loaded");

    let client = ApiClient::new(config.timeout)?;
    let mut app = App::new(config.api_base, args.page);

    if headless {
        return event::run_headless(&mut app, &client, &args.query, args.json).await;
    }

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app, &client, &args.query).await;
    terminal::cleanup(true, true);

    result
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
