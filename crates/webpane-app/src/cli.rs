use clap::Parser;

/// WebPane, an embedded-web demo shell with a host/page message bridge.
#[derive(Parser, Debug)]
#[command(name = "webpane", version, about)]
pub struct Args {
    /// URL to open instead of the bundled demo page.
    #[arg(short = 'u', long)]
    pub url: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Custom user agent for the engine pane.
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
