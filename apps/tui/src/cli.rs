use clap::{CommandFactory, Parser, ValueEnum};
use std::path::PathBuf;

/// Which dashboard page to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PageKind {
    /// Transactions table and top tickers
    #[default]
    Index,
    /// Monthly unique-senator series for one ticker
    Timeseries,
}

impl PageKind {
    pub const fn other(self) -> Self {
        match self {
            Self::Index => Self::Timeseries,
            Self::Timeseries => Self::Index,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Index => "Transactions",
            Self::Timeseries => "Monthly series",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "senate_trades_tui", version, about = "Senate stock-transaction dashboard")]
pub struct CliArgs {
    /// Fetch once, print and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the API base URL
    #[arg(long = "api-base", value_name = "URL")]
    pub api_base: Option<String>,

    /// Override the request timeout
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Initial filters as a query string, e.g. "side=BUY&ticker=AAPL"
    #[arg(long, value_name = "QUERY", default_value = "")]
    pub query: String,

    /// Page to open
    #[arg(long, value_enum, default_value_t = PageKind::Index)]
    pub page: PageKind,

    /// Write logs to this file
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(base) = &self.api_base {
            std::env::set_var("API_BASE", base);
        }
        if let Some(secs) = self.timeout {
            std::env::set_var("REQUEST_TIMEOUT_SECS", secs.to_string());
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("LOG_FILE", path);
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_open_the_index_page() {
        let args = CliArgs::try_parse_from(["senate_trades_tui"]).expect("no args is valid");
        assert_eq!(args.page, PageKind::Index);
        assert!(args.query.is_empty());
        assert!(!args.headless);
    }

    #[test]
    fn flags_are_parsed() {
        let args = CliArgs::try_parse_from([
            "senate_trades_tui",
            "--page",
            "timeseries",
            "--query",
            "ticker=AAPL&mode=buy",
            "--headless",
            "--json",
            "--timeout",
            "5",
        ])
        .expect("valid flags");
        assert_eq!(args.page, PageKind::Timeseries);
        assert_eq!(args.query, "ticker=AAPL&mode=buy");
        assert!(args.headless && args.json);
        assert_eq!(args.timeout, Some(5));
    }

    #[test]
    fn debug_flag_is_not_exported_to_env() {
        std::env::remove_var("DEBUG");
        let args = CliArgs::try_parse_from(["senate_trades_tui", "--debug"]).expect("valid flags");
        assert!(args.debug);

        args.apply_env_overrides();
        assert!(std::env::var("DEBUG").is_err());
    }

    #[test]
    fn help_mentions_query_flag() {
        assert!(CliArgs::help_text().contains("--query"));
    }
}
