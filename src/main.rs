use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Subcommand};

fn main() -> anyhow::Result<()> {
    let mut cli = Cli::parse();

    if let Some(Subcommand::Completion(completion)) = cli.subcommand.take() {
        cli::print_completion(completion);
        return Ok(());
    }

    let default_level = cli.default_log_level();
    let _ = tracing_subscriber::fmt()
        // Fallback to the `default_level` log filter if the environment
        // variable is not set _or_ contains an invalid value
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let Some(output) = cli.output.as_deref() else {
        anyhow::bail!("no output file given");
    };
    let path = cli::run(&cli, output)?;
    println!("{}", path.display());
    Ok(())
}
