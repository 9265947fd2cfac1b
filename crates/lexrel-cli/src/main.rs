//! lexrel CLI - Command-line editor for the word-relation table.

use clap::Parser;
use lexrel_cli::commands;
use lexrel_cli::repl;
use lexrel_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> lexrel_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load or create config
    let mut config = Config::load().unwrap_or_else(|_| {
        let cfg = Config::default();
        cfg.save().ok();
        cfg
    });

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Handle commands
    match cli.command {
        None | Some(Command::Repl) => {
            // Enter interactive editor mode
            repl::run_repl(&mut config, &formatter, color_enabled).await?;
        }
        Some(Command::Profile(args)) => {
            commands::execute_profile(args, &mut config, &formatter)?;
        }
        Some(cmd) => {
            // Commands that drive an editor session
            let mut session = commands::open_session(&config, color_enabled).await?;

            match cmd {
                Command::Add(args) => {
                    commands::execute_add(args, &mut session, &formatter).await?;
                }
                Command::List => {
                    commands::execute_list(&session, &formatter)?;
                }
                Command::Edit(args) => {
                    commands::execute_edit(args, &mut session, &formatter).await?;
                }
                Command::Remove(args) => {
                    commands::execute_remove(args, &mut session, &formatter).await?;
                }
                _ => unreachable!(),
            }
        }
    }

    Ok(())
}
