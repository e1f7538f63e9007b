// SPDX-FileCopyrightText: 2026 reviewdeck contributors
//
// SPDX-License-Identifier: AGPL-3.0-only

use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod domain;
mod error;
mod server;
mod services;

use cli::{Cli, Commands};
use config::Config;
#[cfg(feature = "secure-storage")]
use error::Error;
use error::Result;

#[tokio::main]
async fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("reviewdeck=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reviewdeck=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::env::var("NO_COLOR").is_err())
        .init();

    // Subcommands that must work without a loadable config
    if let Some(ref cmd) = cli.command {
        match cmd {
            Commands::Init => {
                exit_on_error(handle_init());
                return;
            }
            Commands::Completions { shell } => {
                let mut cmd = <Cli as clap::CommandFactory>::command();
                clap_complete::generate(*shell, &mut cmd, "reviewdeck", &mut std::io::stdout());
                return;
            }
            #[cfg(feature = "secure-storage")]
            Commands::SetKey => {
                exit_on_error(set_api_token());
                return;
            }
            #[cfg(feature = "secure-storage")]
            Commands::GetKey => {
                exit_on_error(get_api_token());
                return;
            }
            Commands::Config | Commands::Doctor => {}
        }
    }

    // Credential and config load. Missing token is fatal here: the process
    // never binds a socket or touches the network without one.
    let config = match Config::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(1);
        }
    };

    if let Some(ref cmd) = cli.command {
        let result = match cmd {
            Commands::Config => show_config(&config),
            Commands::Doctor => run_doctor(&config).await,
            _ => Ok(()),
        };
        exit_on_error(result);
        return;
    }

    info!(
        model = %config.model,
        listen = %config.listen_addr,
        "starting reviewdeck"
    );

    let shutdown = async {
        let ctrl_c = async {
            signal::ctrl_c().await.ok();
        };

        #[cfg(unix)]
        let terminate = async {
            if let Ok(mut sig) = signal::unix::signal(signal::unix::SignalKind::terminate()) {
                sig.recv().await;
            } else {
                std::future::pending::<()>().await;
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => info!("received Ctrl+C, shutting down"),
            _ = terminate => info!("received SIGTERM, shutting down"),
        }
    };

    if let Err(e) = server::run_with_shutdown(config, shutdown).await {
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(1);
    }

    info!("server stopped");
}

fn exit_on_error(result: Result<()>) {
    if let Err(e) = result {
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(1);
    }
}

fn handle_init() -> Result<()> {
    let path = Config::create_default()?;
    println!("Created config: {}", path.display());
    Ok(())
}

fn show_config(config: &Config) -> Result<()> {
    println!("Model: {}", config.model);
    println!("Base URL: {}", config.base_url);
    println!(
        "API token: {}",
        if config.api_token.is_some() {
            "configured"
        } else {
            "missing"
        }
    );
    println!("Listen address: {}", config.listen_addr);
    println!("Timeout: {}s", config.timeout_secs);
    println!("Temperature: {}", config.temperature);
    println!("Max new tokens: {}", config.max_new_tokens);
    println!("Max code chars: {}", config.max_code_chars);
    Ok(())
}

async fn run_doctor(config: &Config) -> Result<()> {
    eprintln!("Running diagnostics...\n");

    eprintln!("Configuration");
    eprintln!("  Model:    {}", config.model);
    eprintln!("  Endpoint: {}", config.base_url);
    eprintln!("  Timeout:  {}s", config.timeout_secs);
    if let Some(ref path) = Config::config_path() {
        let status = if path.exists() { "found" } else { "not found" };
        eprintln!("  Config file: {} ({})", path.display(), status);
    }
    eprintln!();

    eprint!("Endpoint check ({}): ", config.base_url);
    let provider = services::llm::create_provider(config);
    match provider.verify().await {
        Ok(()) => {
            eprintln!("OK");
            eprintln!("\nDiagnostics complete.");
            Ok(())
        }
        Err(e) => {
            eprintln!("FAILED");
            Err(e)
        }
    }
}

#[cfg(feature = "secure-storage")]
fn set_api_token() -> Result<()> {
    eprintln!("Enter API token for {} (input will be hidden):", config::PROVIDER_NAME);

    let token = dialoguer::Password::new()
        .with_prompt("API token")
        .interact()
        .map_err(|e| Error::Dialog(e.to_string()))?;

    if token.trim().is_empty() {
        return Err(Error::Config("API token cannot be empty".into()));
    }

    let entry = keyring::Entry::new("reviewdeck", config::PROVIDER_NAME)
        .map_err(|e| Error::Keyring(e.to_string()))?;
    entry
        .set_password(&token)
        .map_err(|e| Error::Keyring(e.to_string()))?;

    eprintln!("API token stored in keychain");
    Ok(())
}

#[cfg(feature = "secure-storage")]
fn get_api_token() -> Result<()> {
    let entry = keyring::Entry::new("reviewdeck", config::PROVIDER_NAME)
        .map_err(|e| Error::Keyring(e.to_string()))?;

    match entry.get_password() {
        Ok(_) => {
            eprintln!("API token is stored in keychain");
            Ok(())
        }
        Err(keyring::Error::NoEntry) => {
            eprintln!("No API token found in keychain");
            eprintln!("  Store one with: reviewdeck set-key");
            Ok(())
        }
        Err(e) => Err(Error::Keyring(e.to_string())),
    }
}
