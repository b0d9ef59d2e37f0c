use anyhow::Context;
use clap::Parser;
use path_aliases::cli::Cli;
use path_aliases::{Generator, SessionMode};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.silent);

    let mode = if cli.watch {
        SessionMode::Serve
    } else {
        SessionMode::Build
    };

    let mut generator =
        Generator::new(mode, cli.to_options()).context("Failed to start the alias generator")?;
    generator.init().context("Failed to generate aliases")?;

    let aliases = generator.aliases();
    if !cli.silent {
        println!("Generated {} aliases:", aliases.len());
        for alias in &aliases {
            println!("  {} -> {}", alias.find, alias.replacement);
        }
    }

    if cli.watch {
        if !cli.silent {
            println!("\nWatching for directory changes. Press Ctrl+C to stop.");
        }
        // the watch session lives until the process exits
        loop {
            std::thread::park();
        }
    }

    Ok(())
}

fn init_tracing(silent: bool) {
    let default_filter = if silent { "error" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
