use std::path::PathBuf;

use clap::Parser;

/// feedsync: follow a chat conversation from the terminal.
#[derive(Parser, Debug)]
#[command(name = "feedsync", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base URL of the chat service.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Raw Cookie header carrying the session and CSRF cookies.
    #[arg(long)]
    pub cookie: Option<String>,

    /// Log filter directive (e.g. `feedsync=debug`).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
