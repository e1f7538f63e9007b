// SPDX-FileCopyrightText: 2026 reviewdeck contributors
// SPDX-License-Identifier: AGPL-3.0-only

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "reviewdeck")]
#[command(version)]
#[command(about = "Web dashboard for AI code review", long_about = None)]
pub struct Cli {
    /// Address to listen on (host:port)
    #[arg(short, long, env = "REVIEWDECK_LISTEN")]
    pub listen: Option<String>,

    /// Model name on the inference endpoint
    #[arg(short, long, env = "REVIEWDECK_MODEL")]
    pub model: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Initialize config file
    Init,
    /// Show current configuration
    Config,
    /// Check endpoint connectivity and credentials
    Doctor,
    /// Generate shell completions
    Completions { shell: clap_complete::Shell },
    /// Store the API token in the system keychain
    #[cfg(feature = "secure-storage")]
    SetKey,
    /// Check whether an API token is stored in the system keychain
    #[cfg(feature = "secure-storage")]
    GetKey,
}
