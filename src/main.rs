use anyhow::Result;
use clap::Parser;

use wander::core::FeedService;

fn main() -> Result<()> {
    let cli = wander::cli::Cli::parse();

    match cli.command.clone() {
        Some(wander::cli::CliCommand::Tui) | None => {
            let config = wander::config::from_cli(&cli)?;
            wander::tui::run(config)?;
        }
        Some(command) => {
            wander::logging::init_cli_logger();
            let config = wander::config::from_cli(&cli)?;
            let service = FeedService::new(config)?;
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            wander::commands::execute(&service, command, &mut handle)?;
        }
    }

    Ok(())
}
